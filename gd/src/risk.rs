//! Risk score classification
//!
//! Scores run 0..=10. Anything outside that range is clamped to the nearest
//! bound before classification. Scores are compared unrounded, so `6.4` is
//! already high.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Lowest valid risk score
pub const MIN_SCORE: f64 = 0.0;

/// Highest valid risk score
pub const MAX_SCORE: f64 = 10.0;

/// Display severity tier for a risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Success,
    Warning,
    Error,
}

/// Classified risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            RiskLevel::Low => Tier::Success,
            RiskLevel::Moderate => Tier::Warning,
            RiskLevel::High => Tier::Error,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pull a score into the valid range
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Classify a single risk score
pub fn classify(score: f64) -> RiskLevel {
    match clamp_score(score) {
        s if s <= 3.0 => RiskLevel::Low,
        s if s <= 6.0 => RiskLevel::Moderate,
        _ => RiskLevel::High,
    }
}

/// Aggregate status across every score in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    HighRisk,
    Manageable,
}

impl OverallStatus {
    pub fn message(&self) -> &'static str {
        match self {
            OverallStatus::HighRisk => "High risk detected - Follow recommendations carefully",
            OverallStatus::Manageable => "Overall risk is manageable with proper care",
        }
    }
}

/// High risk if any single score is classified high, otherwise manageable
pub fn overall_status(risks: &BTreeMap<String, f64>) -> OverallStatus {
    if risks.values().any(|&s| classify(s) == RiskLevel::High) {
        OverallStatus::HighRisk
    } else {
        OverallStatus::Manageable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn risks(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(classify(0.0), RiskLevel::Low);
        assert_eq!(classify(3.0), RiskLevel::Low);
        assert_eq!(classify(4.0), RiskLevel::Moderate);
        assert_eq!(classify(6.0), RiskLevel::Moderate);
        assert_eq!(classify(7.0), RiskLevel::High);
        assert_eq!(classify(10.0), RiskLevel::High);
    }

    #[test]
    fn test_fractional_scores_are_not_rounded() {
        assert_eq!(classify(3.2), RiskLevel::Moderate);
        assert_eq!(classify(6.4), RiskLevel::High);
        assert_eq!(
            overall_status(&risks(&[("dryness", 6.4), ("acne", 1.0)])),
            OverallStatus::HighRisk
        );
    }

    #[test]
    fn test_labels_and_tiers() {
        assert_eq!(classify(2.0).label(), "Low");
        assert_eq!(classify(2.0).tier(), Tier::Success);
        assert_eq!(classify(5.0).label(), "Moderate");
        assert_eq!(classify(5.0).tier(), Tier::Warning);
        assert_eq!(classify(9.0).label(), "High");
        assert_eq!(classify(9.0).tier(), Tier::Error);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        assert_eq!(clamp_score(-4.0), 0.0);
        assert_eq!(clamp_score(42.0), 10.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(classify(-4.0), RiskLevel::Low);
        assert_eq!(classify(42.0), RiskLevel::High);
    }

    #[test]
    fn test_one_high_score_makes_the_report_high_risk() {
        let status = overall_status(&risks(&[("dryness", 7.0), ("acne", 2.0)]));
        assert_eq!(status, OverallStatus::HighRisk);
    }

    #[test]
    fn test_all_moderate_is_manageable() {
        assert_eq!(
            overall_status(&risks(&[("hairfall", 4.0), ("dandruff", 6.0)])),
            OverallStatus::Manageable
        );
        assert_eq!(overall_status(&BTreeMap::new()), OverallStatus::Manageable);
    }

    proptest! {
        #[test]
        fn prop_label_matches_thresholds(s in 0i64..=10) {
            let label = classify(s as f64).label();
            prop_assert_eq!(label == "Low", s <= 3);
            prop_assert_eq!(label == "High", s > 6);
            prop_assert_eq!(label == "Moderate", (4..=6).contains(&s));
        }

        #[test]
        fn prop_overall_is_high_iff_any_score_above_six(scores in proptest::collection::vec(0.0f64..=10.0, 0..8)) {
            let map: BTreeMap<String, f64> =
                scores.iter().enumerate().map(|(i, s)| (format!("risk{i}"), *s)).collect();
            let expected = if scores.iter().any(|&s| s > 6.0) {
                OverallStatus::HighRisk
            } else {
                OverallStatus::Manageable
            };
            prop_assert_eq!(overall_status(&map), expected);
        }
    }
}
