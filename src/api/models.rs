use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Local>,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    #[serde(default)]
    pub memory_available: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_cpu: f64,
    #[serde(default)]
    pub current_cpu: Option<f64>,
    #[serde(default)]
    pub prediction_horizon: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub timestamp: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMetrics {
    pub cpu_usage: f64,
    pub memory_usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingStatusView {
    pub scaling_decision: ScalingDecision,
    pub current_metrics: StatusMetrics,
    #[serde(default)]
    pub last_prediction: Option<f64>,
    pub model_status: ModelStatus,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScalingDecision {
    ScaleUp,
    ScaleDown,
    NoAction,
    Other(String),
}

impl ScalingDecision {
    pub fn as_str(&self) -> &str {
        match self {
            ScalingDecision::ScaleUp => "scale_up",
            ScalingDecision::ScaleDown => "scale_down",
            ScalingDecision::NoAction => "no_action",
            ScalingDecision::Other(raw) => raw,
        }
    }

    pub fn display_label(&self) -> String {
        self.as_str().replacen('_', " ", 1).to_uppercase()
    }
}

impl From<String> for ScalingDecision {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "scale_up" => ScalingDecision::ScaleUp,
            "scale_down" => ScalingDecision::ScaleDown,
            "no_action" => ScalingDecision::NoAction,
            _ => ScalingDecision::Other(raw),
        }
    }
}

impl From<ScalingDecision> for String {
    fn from(decision: ScalingDecision) -> Self {
        decision.as_str().to_string()
    }
}

impl fmt::Display for ScalingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelStatus {
    Loaded,
    NotLoaded(String),
}

impl ModelStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelStatus::Loaded)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ModelStatus::Loaded => "loaded",
            ModelStatus::NotLoaded(raw) => raw,
        }
    }
}

impl From<String> for ModelStatus {
    fn from(raw: String) -> Self {
        if raw == "loaded" {
            ModelStatus::Loaded
        } else {
            ModelStatus::NotLoaded(raw)
        }
    }
}

impl From<ModelStatus> for String {
    fn from(status: ModelStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Accepts RFC 3339 timestamps and the naive `isoformat()` output the
/// service emits; naive values are read as local wall-clock time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;

    Some(
        Local
            .from_local_datetime(&naive)
            .earliest()
            // Nonexistent local time (DST gap)
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive).with_timezone(&Local)),
    )
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_metrics_from_service_payload() {
        let body = r#"{
            "timestamp": "2024-05-01T14:03:27.518211",
            "cpu_usage": 37.5,
            "memory_usage": 61.2,
            "memory_available": 4096000
        }"#;

        let metrics: MetricsSnapshot = serde_json::from_str(body).unwrap();
        assert_eq!(metrics.cpu_usage, 37.5);
        assert_eq!(metrics.memory_available, Some(4096000));
        assert_eq!(metrics.timestamp.hour(), 14);
        assert_eq!(metrics.timestamp.minute(), 3);
        assert_eq!(metrics.timestamp.second(), 27);
    }

    #[test]
    fn test_metrics_missing_field_is_rejected() {
        let body = r#"{"timestamp": "2024-05-01T14:03:27", "memory_usage": 61.2}"#;
        assert!(serde_json::from_str::<MetricsSnapshot>(body).is_err());
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let body = r#"{"timestamp": "yesterday", "cpu_usage": 1.0, "memory_usage": 2.0}"#;
        assert!(serde_json::from_str::<MetricsSnapshot>(body).is_err());
    }

    #[test]
    fn test_rfc3339_timestamp() {
        assert!(parse_timestamp("2024-05-01T14:03:27+02:00").is_some());
        assert!(parse_timestamp("2024-05-01T14:03:27Z").is_some());
    }

    #[test]
    fn test_prediction_optional_fields() {
        let minimal: Prediction = serde_json::from_str(r#"{"predicted_cpu": 55.0}"#).unwrap();
        assert_eq!(minimal.predicted_cpu, 55.0);
        assert!(minimal.timestamp.is_none());

        let full: Prediction = serde_json::from_str(
            r#"{"timestamp": "2024-05-01T14:03:28", "current_cpu": 40.0,
                "predicted_cpu": 55.0, "prediction_horizon": "5 minutes"}"#,
        )
        .unwrap();
        assert_eq!(full.prediction_horizon.as_deref(), Some("5 minutes"));
        assert_eq!(full.current_cpu, Some(40.0));
    }

    #[test]
    fn test_status_with_absent_prediction() {
        let body = r#"{
            "timestamp": "2024-05-01T14:03:29",
            "current_metrics": {"timestamp": "2024-05-01T14:03:29", "cpu_usage": 12.0,
                                "memory_usage": 48.0, "memory_available": 1},
            "last_prediction": null,
            "scaling_decision": "No prediction available",
            "model_status": "not loaded"
        }"#;

        let status: ScalingStatusView = serde_json::from_str(body).unwrap();
        assert_eq!(status.last_prediction, None);
        assert_eq!(
            status.scaling_decision,
            ScalingDecision::Other("No prediction available".to_string())
        );
        assert!(!status.model_status.is_loaded());
        assert_eq!(status.current_metrics.memory_usage, 48.0);
    }

    #[test]
    fn test_decision_parsing() {
        assert_eq!(ScalingDecision::from("scale_up".to_string()), ScalingDecision::ScaleUp);
        assert_eq!(ScalingDecision::from("scale_down".to_string()), ScalingDecision::ScaleDown);
        assert_eq!(ScalingDecision::from("no_action".to_string()), ScalingDecision::NoAction);
        assert_eq!(
            ScalingDecision::from("unknown_mode".to_string()),
            ScalingDecision::Other("unknown_mode".to_string())
        );
    }

    #[test]
    fn test_decision_display_label() {
        assert_eq!(ScalingDecision::ScaleUp.display_label(), "SCALE UP");
        assert_eq!(ScalingDecision::NoAction.display_label(), "NO ACTION");
        assert_eq!(
            ScalingDecision::Other("very_unknown_mode".to_string()).display_label(),
            "VERY UNKNOWN_MODE"
        );
    }

    #[test]
    fn test_decision_serializes_as_wire_string() {
        let json = serde_json::to_string(&ScalingDecision::ScaleDown).unwrap();
        assert_eq!(json, "\"scale_down\"");
    }
}
