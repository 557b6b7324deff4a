//! Interactive terminal driver for the results view

use std::io::Write;
use std::time::Duration;

use colored::Colorize;
use eyre::Result;
use tracing::{debug, info};

use super::controller::{FetchState, FetchTicket, MountOutcome, ResultsController};
use super::render::{render_failure, render_report};
use crate::nav::Route;
use crate::wizard::LineReader;

const SPINNER_INTERVAL: Duration = Duration::from_millis(500);

/// Wait for a fetch while showing progress
///
/// Ctrl-C tears the view down; the response, if it still arrives, is dropped.
/// Returns `false` when the view was torn down.
async fn await_fetch(results: &mut ResultsController, ticket: FetchTicket, out: &mut dyn Write) -> Result<bool> {
    debug!(generation = ticket.generation(), "await_fetch: called");
    write!(out, "{}", "Analyzing your destination".dimmed())?;
    out.flush()?;

    let fetch = ticket.run(results.client());
    tokio::pin!(fetch);
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);
    let mut ticker = tokio::time::interval(SPINNER_INTERVAL);
    ticker.tick().await;

    loop {
        tokio::select! {
            completion = &mut fetch => {
                writeln!(out)?;
                results.complete(completion);
                return Ok(true);
            }
            _ = &mut interrupt => {
                writeln!(out)?;
                info!("Interrupted while loading, leaving results view");
                results.teardown();
                return Ok(false);
            }
            _ = ticker.tick() => {
                write!(out, "{}", ".".dimmed())?;
                out.flush()?;
            }
        }
    }
}

enum Choice {
    Retry,
    New,
    Quit,
}

fn ask(reader: &mut dyn LineReader, prompt: &str, allow_retry: bool) -> Result<Choice> {
    loop {
        let Some(line) = reader.read_line(&format!("{} ", prompt.bright_green()))? else {
            return Ok(Choice::Quit);
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "retry" if allow_retry => return Ok(Choice::Retry),
            "n" | "new" => return Ok(Choice::New),
            "q" | "quit" | "" => return Ok(Choice::Quit),
            _ => continue,
        }
    }
}

/// Enter the results view and drive it until the user leaves
///
/// Returns the route to follow next (the wizard, on redirect or restart), or
/// `None` when the user quit.
pub async fn run_results(
    results: &mut ResultsController,
    reader: &mut dyn LineReader,
    out: &mut dyn Write,
) -> Result<Option<Route>> {
    debug!("run_results: called");
    let mut pending = match results.mount() {
        MountOutcome::Redirect(route) => {
            writeln!(out, "{}", "No analysis in progress. Starting the questionnaire.".yellow())?;
            return Ok(Some(route));
        }
        MountOutcome::Fetch(ticket) => Some(ticket),
        MountOutcome::AlreadyMounted => None,
    };

    loop {
        if let Some(ticket) = pending.take()
            && !await_fetch(results, ticket, out).await?
        {
            return Ok(None);
        }

        let choice = match results.state().clone() {
            FetchState::Success(result) => {
                if let Some(answers) = results.answers() {
                    render_report(out, answers, &result)?;
                }
                ask(reader, "[n]ew analysis or [q]uit:", false)?
            }
            FetchState::Failure { message, .. } => {
                render_failure(out, &message)?;
                if results.can_retry() {
                    ask(reader, "[r]etry, [n]ew analysis or [q]uit:", true)?
                } else {
                    ask(reader, "[n]ew analysis or [q]uit:", false)?
                }
            }
            FetchState::Idle | FetchState::Loading => return Ok(None),
        };

        match choice {
            Choice::Retry => pending = results.retry(),
            Choice::New => return Ok(results.restart()?),
            Choice::Quit => return Ok(None),
        }
    }
}
