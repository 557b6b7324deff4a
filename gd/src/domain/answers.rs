//! Wizard answers and their option sets
//!
//! The serialized form of [`WizardAnswers`] is the session handoff format, so
//! field names follow the camelCase layout the results view reads back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Analysis domain chosen at step 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Skin,
    Hair,
}

impl AnalysisType {
    /// Concern options offered by the quiz for this analysis type
    pub fn concern_options(&self) -> &'static [&'static str] {
        match self {
            AnalysisType::Skin => &["Acne", "Wrinkles", "Dark Spots", "Redness", "Dryness", "Oiliness"],
            AnalysisType::Hair => &["Frizz", "Dryness", "Oiliness", "Breakage", "Dullness", "Dandruff"],
        }
    }
}

/// Generates the option-set boilerplate shared by the quiz enums:
/// `ALL`, `as_str`, `Display` and case-insensitive `FromStr`.
macro_rules! option_set {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| format!("Unknown {}: '{}'", stringify!($name), s))
            }
        }
    };
}

option_set!(AnalysisType { Skin => "skin", Hair => "hair" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    Normal,
}

option_set!(SkinType { Oily => "oily", Dry => "dry", Combination => "combination", Normal => "normal" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    Medium,
    High,
}

option_set!(Sensitivity { Low => "low", Medium => "medium", High => "high" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HairType {
    Straight,
    Wavy,
    Curly,
    Coily,
}

option_set!(HairType { Straight => "straight", Wavy => "wavy", Curly => "curly", Coily => "coily" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Texture {
    Fine,
    Medium,
    Thick,
}

option_set!(Texture { Fine => "fine", Medium => "medium", Thick => "thick" });

/// Home and destination cities chosen at step 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPair {
    pub home_city: String,
    pub destination_city: String,
}

impl CityPair {
    pub fn new(home_city: impl Into<String>, destination_city: impl Into<String>) -> Self {
        Self {
            home_city: home_city.into(),
            destination_city: destination_city.into(),
        }
    }

    /// Both cities filled in (home and destination may be the same city)
    pub fn is_complete(&self) -> bool {
        !self.home_city.trim().is_empty() && !self.destination_city.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinAnswers {
    pub skin_type: SkinType,
    pub sensitivity: Sensitivity,
    #[serde(default)]
    pub concerns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HairAnswers {
    pub hair_type: HairType,
    pub texture: Texture,
    #[serde(default)]
    pub concerns: Vec<String>,
}

/// Quiz answers, shaped by the chosen analysis type
///
/// Untagged: the two variants are told apart by their primary field
/// (`skinType` vs `hairType`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeAnswers {
    Skin(SkinAnswers),
    Hair(HairAnswers),
}

impl TypeAnswers {
    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            TypeAnswers::Skin(_) => AnalysisType::Skin,
            TypeAnswers::Hair(_) => AnalysisType::Hair,
        }
    }

    pub fn concerns(&self) -> &[String] {
        match self {
            TypeAnswers::Skin(a) => &a.concerns,
            TypeAnswers::Hair(a) => &a.concerns,
        }
    }
}

/// Trip length options offered at step 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationOption {
    OneToThreeDays,
    FourToSevenDays,
    OneToTwoWeeks,
    TwoToFourWeeks,
    OneMonthPlus,
    Custom,
}

impl DurationOption {
    pub const ALL: [DurationOption; 6] = [
        DurationOption::OneToThreeDays,
        DurationOption::FourToSevenDays,
        DurationOption::OneToTwoWeeks,
        DurationOption::TwoToFourWeeks,
        DurationOption::OneMonthPlus,
        DurationOption::Custom,
    ];

    /// Token stored in the answers for the fixed options
    pub fn token(&self) -> &'static str {
        match self {
            DurationOption::OneToThreeDays => "1-3",
            DurationOption::FourToSevenDays => "4-7",
            DurationOption::OneToTwoWeeks => "1-2weeks",
            DurationOption::TwoToFourWeeks => "2-4weeks",
            DurationOption::OneMonthPlus => "1month+",
            DurationOption::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationOption::OneToThreeDays => "1-3 Days",
            DurationOption::FourToSevenDays => "4-7 Days",
            DurationOption::OneToTwoWeeks => "1-2 Weeks",
            DurationOption::TwoToFourWeeks => "2-4 Weeks",
            DurationOption::OneMonthPlus => "1+ Month",
            DurationOption::Custom => "Custom",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL.iter().copied().find(|o| o.token().eq_ignore_ascii_case(token))
    }
}

/// Answers accumulated across the wizard steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardAnswers {
    /// Current step (1..=4)
    #[serde(default = "first_step")]
    pub step: u8,
    #[serde(default)]
    pub cities: Option<CityPair>,
    #[serde(default)]
    pub analysis_type: Option<AnalysisType>,
    #[serde(default)]
    pub type_answers: Option<TypeAnswers>,
    #[serde(default)]
    pub duration: Option<String>,
}

fn first_step() -> u8 {
    1
}

impl Default for WizardAnswers {
    fn default() -> Self {
        Self {
            step: first_step(),
            cities: None,
            analysis_type: None,
            type_answers: None,
            duration: None,
        }
    }
}

impl WizardAnswers {
    /// Every field the results view needs has been filled in, and the quiz
    /// answers belong to the chosen analysis type
    pub fn is_complete(&self) -> bool {
        self.cities.as_ref().is_some_and(CityPair::is_complete)
            && self.analysis_type.is_some()
            && self.type_answers.as_ref().map(TypeAnswers::analysis_type) == self.analysis_type
            && self.duration.as_deref().is_some_and(|d| !d.trim().is_empty())
    }
}
