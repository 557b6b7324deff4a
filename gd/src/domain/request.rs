//! Backend analysis request payload

use std::fmt;

use serde::{Deserialize, Serialize};

use super::answers::{AnalysisType, HairType, SkinType};

/// Coarse trip-length bucket the backend works with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationCategory {
    #[serde(rename = "<48h")]
    UnderTwoDays,
    #[serde(rename = "2-7d")]
    UpToAWeek,
    #[serde(rename = "1-4w")]
    UpToAMonth,
    #[serde(rename = "relocation")]
    Relocation,
}

impl DurationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationCategory::UnderTwoDays => "<48h",
            DurationCategory::UpToAWeek => "2-7d",
            DurationCategory::UpToAMonth => "1-4w",
            DurationCategory::Relocation => "relocation",
        }
    }

    /// Bucket for an explicit day count
    pub fn from_days(days: u64) -> Self {
        match days {
            0..=1 => DurationCategory::UnderTwoDays,
            2..=7 => DurationCategory::UpToAWeek,
            8..=28 => DurationCategory::UpToAMonth,
            _ => DurationCategory::Relocation,
        }
    }
}

impl fmt::Display for DurationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload for `POST /api/analyze`
///
/// Exactly one of `skin_type` / `hair_type` is set; the other is left out of
/// the JSON body entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub destination: String,
    pub home_city: String,
    pub duration_category: DurationCategory,
    pub month_or_season: String,
    pub concern: AnalysisType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<SkinType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hair_type: Option<HairType>,
}
