//! GeoDermal - travel skin and hair environmental-risk questionnaire
//!
//! CLI entry point.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use geodermal::cli::{Cli, Command, get_log_path};
use geodermal::client::{AnalysisClient, HttpAnalysisClient};
use geodermal::config::Config;
use geodermal::nav::Route;
use geodermal::results::{ResultsController, run_results};
use geodermal::session::{FileSessionStore, SessionStore};
use geodermal::wizard::{RustylineReader, WizardController, run_wizard};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        debug!(%url, "main: base URL overridden on command line");
        config.api.base_url = url.clone();
    }
    info!(base_url = %config.api.base_url, session = %config.session.path.display(), "GeoDermal loaded config");

    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session.path));

    let command = cli.command.unwrap_or(Command::Wizard);
    debug!(?command, "main: dispatching command");
    match command {
        Command::Wizard => navigate(Route::Wizard, &config, store).await,
        Command::Results => navigate(Route::Results, &config, store).await,
        Command::Reset => cmd_reset(store.as_ref()),
        Command::Health => cmd_health(&config).await,
        Command::Stats => cmd_stats(&config).await,
    }
}

/// Move between the wizard and the results view until the user quits
async fn navigate(start: Route, config: &Config, store: Arc<dyn SessionStore>) -> Result<()> {
    debug!(%start, "navigate: called");
    let client: Arc<dyn AnalysisClient> =
        Arc::new(HttpAnalysisClient::from_config(&config.api).context("Failed to create analysis client")?);
    let mut reader = RustylineReader::new()?;
    let mut out = io::stdout();

    let mut route = start;
    loop {
        info!(%route, "Navigating");
        let next = match route {
            Route::Wizard => {
                let mut wizard = WizardController::new(store.clone());
                run_wizard(&mut wizard, &mut reader, &mut out)?
            }
            Route::Results => {
                let mut results = ResultsController::new(store.clone(), client.clone());
                run_results(&mut results, &mut reader, &mut out).await?
            }
        };
        match next {
            Some(r) => route = r,
            None => {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }
}

fn cmd_reset(store: &dyn SessionStore) -> Result<()> {
    debug!("cmd_reset: called");
    store.clear().context("Failed to clear saved answers")?;
    println!("{} Saved answers cleared", "✓".green());
    Ok(())
}

async fn cmd_health(config: &Config) -> Result<()> {
    debug!("cmd_health: called");
    let client = HttpAnalysisClient::from_config(&config.api)?;
    match client.health().await {
        Ok(body) => {
            println!("{} Backend reachable at {}", "✓".green(), client.base_url().cyan());
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            Err(e.into())
        }
    }
}

async fn cmd_stats(config: &Config) -> Result<()> {
    debug!("cmd_stats: called");
    let client = HttpAnalysisClient::from_config(&config.api)?;
    let body = client.stats().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
