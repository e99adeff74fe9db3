use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value as JsonValue;
use std::time::Instant;

/// Status vocabulary for health reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Ok => "ok",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HealthStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(HealthStatus::Ok),
            _ => Err(anyhow::anyhow!("Invalid health status: {}", s)),
        }
    }
}

/// Liveness payload served by `GET /api/health`.
///
/// Every field defaults when absent or `null` so a client never fails on a partial body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthReport {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub uptime: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub environment: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl HealthReport {
    /// Build a fresh `ok` report for a process that started at `started_at`.
    pub fn ok(started_at: Instant, message: &str, environment: &str) -> Self {
        Self {
            status: HealthStatus::Ok.to_string(),
            timestamp: Utc::now(),
            uptime: started_at.elapsed().as_secs_f64(),
            message: message.to_string(),
            environment: environment.to_string(),
        }
    }

    /// Decode a response body. Only a JSON object is accepted; serde would
    /// otherwise read an array positionally into the struct.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: JsonValue = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value)
    }

    pub fn health_status(&self) -> Option<HealthStatus> {
        self.status.parse().ok()
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn decodes_full_payload() {
        let report: HealthReport = serde_json::from_value(json!({
            "status": "ok",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "uptime": 3665,
            "message": "Service is healthy",
            "environment": "production"
        }))
        .unwrap();

        assert_eq!(report.health_status(), Some(HealthStatus::Ok));
        assert_eq!(report.uptime, 3665.0);
        assert_eq!(report.timestamp.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(report.environment, "production");
    }

    #[test]
    fn absent_fields_decode_to_empty_values() {
        let report: HealthReport = serde_json::from_value(json!({ "status": "ok" })).unwrap();

        assert_eq!(report.status, "ok");
        assert_eq!(report.uptime, 0.0);
        assert_eq!(report.message, "");
        assert_eq!(report.environment, "");
        assert_eq!(report.timestamp, DateTime::<Utc>::default());
    }

    #[test]
    fn null_fields_decode_as_absent() {
        let report = HealthReport::from_json(br#"{"status":"ok","uptime":null,"timestamp":null}"#).unwrap();

        assert_eq!(report.status, "ok");
        assert_eq!(report.uptime, 0.0);
        assert_eq!(report.timestamp, DateTime::<Utc>::default());
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        let bodies: [&[u8]; 4] = [b"[]", b"null", b"42", br#""ok""#];
        for body in bodies {
            let err = HealthReport::from_json(body).unwrap_err();
            assert!(err.to_string().starts_with("expected a JSON object"), "{}", err);
        }
    }

    #[test]
    fn mistyped_field_is_rejected() {
        assert!(HealthReport::from_json(br#"{"uptime":"abc"}"#).is_err());
        assert!(HealthReport::from_json(br#"{"timestamp":"yesterday"}"#).is_err());
    }

    #[test]
    fn unknown_status_is_not_in_vocabulary() {
        let report = HealthReport {
            status: "degraded".to_string(),
            ..Default::default()
        };
        assert_eq!(report.health_status(), None);
    }

    #[test]
    fn uptime_grows_from_start_instant() {
        let started_at = Instant::now() - Duration::from_secs(5);
        let first = HealthReport::ok(started_at, "Service is healthy", "test");
        let second = HealthReport::ok(started_at, "Service is healthy", "test");

        assert!(first.uptime >= 5.0);
        assert!(second.uptime >= first.uptime);
        assert_eq!(first.status, "ok");
    }
}
