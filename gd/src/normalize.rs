//! Wizard answers → backend request normalization
//!
//! Duration classification runs an ordered list of text tests against the
//! stored duration string; the first match wins. The order matters: a value
//! like `"1-3 days"` satisfies both the `1-3` token and the word `day`, and
//! both resolve to `<48h` only because the first rule is checked first.
//!
//! `day`, `week` and `month` are matched as whole words (case-insensitive),
//! so the fixed tokens `1-2weeks`, `2-4weeks` and `1month+` and custom values
//! like `"7 days"` fall through to the later, more specific rules.

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::domain::{AnalysisRequest, AnalysisType, DurationCategory, TypeAnswers, WizardAnswers};

struct DurationPatterns {
    day_word: Regex,
    week_word: Regex,
    month_word: Regex,
    custom_days: Regex,
}

static PATTERNS: LazyLock<DurationPatterns> = LazyLock::new(|| DurationPatterns {
    day_word: Regex::new(r"(?i)\bday\b").expect("static pattern"),
    week_word: Regex::new(r"(?i)\bweek\b").expect("static pattern"),
    month_word: Regex::new(r"(?i)\bmonth\b").expect("static pattern"),
    custom_days: Regex::new(r"(?i)(\d+)\s*days?").expect("static pattern"),
});

/// Answers that cannot be turned into a request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Home and destination cities are required")]
    MissingCities,

    #[error("Analysis type is required")]
    MissingAnalysisType,
}

/// Map a free-form duration string to its category
///
/// A missing or blank duration falls back to `2-7d`, as does anything no rule recognises.
pub fn duration_category(duration: Option<&str>) -> DurationCategory {
    let Some(raw) = duration.map(str::trim).filter(|d| !d.is_empty()) else {
        debug!("duration_category: no duration, using default");
        return DurationCategory::UpToAWeek;
    };
    let lower = raw.to_lowercase();
    let patterns = &*PATTERNS;

    let category = if lower.contains("1-3") || patterns.day_word.is_match(&lower) {
        DurationCategory::UnderTwoDays
    } else if lower.contains("4-7") || patterns.week_word.is_match(&lower) {
        DurationCategory::UpToAWeek
    } else if lower.contains("1-2weeks") || lower.contains("2-4weeks") || patterns.month_word.is_match(&lower) {
        DurationCategory::UpToAMonth
    } else if lower.contains("1month+") {
        DurationCategory::Relocation
    } else if let Some(caps) = patterns.custom_days.captures(&lower) {
        // Digit runs too long for u64 are still a day count, just an enormous one
        let days = caps[1].parse::<u64>().unwrap_or(u64::MAX);
        DurationCategory::from_days(days)
    } else {
        DurationCategory::UpToAWeek
    };

    debug!(%raw, %category, "duration_category: classified");
    category
}

/// Full English month name for the given date, e.g. `"March"`
pub fn month_or_season(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Build the backend request, stamping it with the current local month
///
/// Not memoized: every call reads the clock again.
pub fn normalize(answers: &WizardAnswers) -> Result<AnalysisRequest, NormalizeError> {
    normalize_at(answers, Local::now().date_naive())
}

/// Build the backend request as of the given date
pub fn normalize_at(answers: &WizardAnswers, today: NaiveDate) -> Result<AnalysisRequest, NormalizeError> {
    debug!(step = answers.step, "normalize_at: called");
    let cities = answers
        .cities
        .as_ref()
        .filter(|c| c.is_complete())
        .ok_or(NormalizeError::MissingCities)?;
    let concern = answers.analysis_type.ok_or(NormalizeError::MissingAnalysisType)?;

    let (skin_type, hair_type) = match (concern, answers.type_answers.as_ref()) {
        (AnalysisType::Skin, Some(TypeAnswers::Skin(skin))) => (Some(skin.skin_type), None),
        (AnalysisType::Hair, Some(TypeAnswers::Hair(hair))) => (None, Some(hair.hair_type)),
        (concern, other) => {
            debug!(?concern, has_answers = other.is_some(), "normalize_at: no matching quiz answers");
            (None, None)
        }
    };

    Ok(AnalysisRequest {
        destination: cities.destination_city.clone(),
        home_city: cities.home_city.clone(),
        duration_category: duration_category(answers.duration.as_deref()),
        month_or_season: month_or_season(today),
        concern,
        skin_type,
        hair_type,
    })
}
