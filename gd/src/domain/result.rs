//! Environmental-risk report returned by the analysis backend

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Geocoded destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Environmental measurements, passed through from the backend untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvReport {
    #[serde(default)]
    pub coords: Option<Coords>,
    pub temperature_c: f64,
    pub humidity: f64,
    pub uv_index: f64,
    pub aqi: f64,
    pub pm25: f64,
}

/// Backend's qualitative reliability label for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Parse from the leading word, so decorated labels like `"low (mock data)"` still resolve
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let word = raw
            .trim()
            .split(|c: char| !c.is_ascii_alphabetic())
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match word.as_str() {
            "low" => Some(Confidence::Low),
            "medium" => Some(Confidence::Medium),
            "high" => Some(Confidence::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<Option<Confidence>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Confidence::parse_lenient))
}

/// Response body of `POST /api/analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub env_report: EnvReport,
    /// Scores as sent; fractional values are kept so classification sees them unrounded
    pub risks: BTreeMap<String, f64>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_confidence")]
    pub confidence: Option<Confidence>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "request": {"destination": "Mumbai"},
        "env_report": {
            "coords": {"lat": 19.07, "lon": 72.87, "display_name": "Mumbai, Maharashtra, India"},
            "aqi": 120,
            "pm25": 65,
            "humidity": 40,
            "temperature_c": 30,
            "uv_index": 7,
            "water_hardness_estimated_ppm": 180
        },
        "risks": {"dryness": 7, "acne": 3, "irritation": 4},
        "recommendations": ["Use a hydrating moisturizer.", "Apply SPF 50."],
        "explanations": {"why": ["AQI of 120"]},
        "confidence": "low (mock data)"
    }"#;

    #[test]
    fn test_parse_backend_response() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.env_report.aqi, 120.0);
        assert_eq!(
            result.env_report.coords.as_ref().and_then(|c| c.display_name.as_deref()),
            Some("Mumbai, Maharashtra, India")
        );
        assert_eq!(result.risks.get("dryness"), Some(&7.0));
        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(result.confidence, Some(Confidence::Low));
    }

    #[test]
    fn test_confidence_is_optional_and_lenient() {
        assert_eq!(Confidence::parse_lenient("HIGH"), Some(Confidence::High));
        assert_eq!(Confidence::parse_lenient("medium-ish"), Some(Confidence::Medium));
        assert_eq!(Confidence::parse_lenient("unknown"), None);

        let json = r#"{
            "env_report": {"temperature_c": 20, "humidity": 50, "uv_index": 3, "aqi": 40, "pm25": 10},
            "risks": {"frizz": 6.6},
            "recommendations": []
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.confidence, None);
        assert!(result.env_report.coords.is_none());
        assert_eq!(result.risks.get("frizz"), Some(&6.6));
    }

    #[test]
    fn test_fractional_score_above_six_is_high_risk() {
        let json = r#"{
            "env_report": {"temperature_c": 20, "humidity": 50, "uv_index": 3, "aqi": 40, "pm25": 10},
            "risks": {"dryness": 6.4, "acne": 1}
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.risks.get("dryness"), Some(&6.4));
        assert_eq!(
            crate::risk::overall_status(&result.risks),
            crate::risk::OverallStatus::HighRisk
        );
    }

    #[test]
    fn test_missing_env_report_is_rejected() {
        let json = r#"{"risks": {}, "recommendations": []}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }
}
