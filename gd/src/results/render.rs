//! Terminal rendering of analysis results

use std::collections::BTreeMap;
use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use crate::domain::{AnalysisResult, AnalysisType, EnvReport, WizardAnswers};
use crate::risk::{MAX_SCORE, OverallStatus, RiskLevel, Tier, clamp_score, classify, overall_status};

/// Risk categories shown for skin analyses, in display order
pub const SKIN_CATEGORIES: &[(&str, &str)] = &[
    ("dryness", "Dryness"),
    ("acne", "Acne"),
    ("irritation", "Irritation"),
    ("uv_damage", "UV Damage"),
    ("pigmentation", "Pigmentation"),
];

/// Risk categories shown for hair analyses, in display order
pub const HAIR_CATEGORIES: &[(&str, &str)] = &[
    ("dryness", "Dryness"),
    ("frizz", "Frizz"),
    ("breakage", "Breakage"),
    ("hairfall", "Hair Fall"),
    ("dandruff", "Dandruff"),
];

/// One row of the risk table
#[derive(Debug, Clone, PartialEq)]
pub struct RiskRow {
    pub key: &'static str,
    pub label: &'static str,
    pub score: f64,
    pub level: RiskLevel,
}

pub fn categories(analysis_type: AnalysisType) -> &'static [(&'static str, &'static str)] {
    match analysis_type {
        AnalysisType::Skin => SKIN_CATEGORIES,
        AnalysisType::Hair => HAIR_CATEGORIES,
    }
}

/// Rows for the categories of `analysis_type`; a category the backend omitted scores 0
pub fn risk_rows(analysis_type: AnalysisType, risks: &BTreeMap<String, f64>) -> Vec<RiskRow> {
    categories(analysis_type)
        .iter()
        .map(|&(key, label)| {
            let score = clamp_score(risks.get(key).copied().unwrap_or(0.0));
            RiskRow {
                key,
                label,
                score,
                level: classify(score),
            }
        })
        .collect()
}

fn tinted(text: &str, tier: Tier) -> ColoredString {
    match tier {
        Tier::Success => text.green(),
        Tier::Warning => text.yellow(),
        Tier::Error => text.red(),
    }
}

fn bar(score: f64) -> String {
    let filled = clamp_score(score).round() as usize;
    let width = MAX_SCORE as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn write_env_card(out: &mut dyn Write, env: &EnvReport) -> io::Result<()> {
    writeln!(out, "{}", "Environmental Conditions".bold())?;
    if let Some(name) = env.coords.as_ref().and_then(|c| c.display_name.as_deref()) {
        writeln!(out, "  {}", name.dimmed())?;
    }
    writeln!(out, "  Temperature  {:.1}°C", env.temperature_c)?;
    writeln!(out, "  UV Index     {:.1}", env.uv_index)?;
    writeln!(out, "  Humidity     {:.0}%", env.humidity)?;
    writeln!(out, "  AQI          {:.0}", env.aqi)?;
    writeln!(out, "  PM2.5        {:.1} µg/m³", env.pm25)?;
    Ok(())
}

/// Render a successful report
pub fn render_report(out: &mut dyn Write, answers: &WizardAnswers, result: &AnalysisResult) -> io::Result<()> {
    let analysis_type = answers.analysis_type.unwrap_or(AnalysisType::Skin);

    writeln!(out)?;
    writeln!(out, "{}", format!("Your {} Analysis Results", analysis_type.as_str()).bright_cyan().bold())?;
    if let Some(cities) = &answers.cities {
        writeln!(out, "  {} → {}", cities.home_city, cities.destination_city.bold())?;
    }
    writeln!(out)?;

    write_env_card(out, &result.env_report)?;
    writeln!(out)?;

    writeln!(out, "{}", "Risk Assessment".bold())?;
    for row in risk_rows(analysis_type, &result.risks) {
        let tier = row.level.tier();
        writeln!(
            out,
            "  {:<13} {} {:>4}/{}  {}",
            row.label,
            tinted(&bar(row.score), tier),
            row.score,
            MAX_SCORE,
            tinted(row.level.label(), tier)
        )?;
    }
    writeln!(out)?;

    let status = overall_status(&result.risks);
    let status_line = match status {
        OverallStatus::HighRisk => status.message().red().bold(),
        OverallStatus::Manageable => status.message().green().bold(),
    };
    writeln!(out, "{}", status_line)?;
    writeln!(out)?;

    if !result.recommendations.is_empty() {
        writeln!(out, "{}", "Recommendations".bold())?;
        for (i, rec) in result.recommendations.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, rec)?;
        }
        writeln!(out)?;
    }

    if let Some(confidence) = result.confidence {
        writeln!(out, "Confidence: {}", confidence.as_str())?;
    }
    Ok(())
}

/// Render a failed fetch with its user-facing message
pub fn render_failure(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {}", "Analysis failed:".red().bold(), message)?;
    Ok(())
}
