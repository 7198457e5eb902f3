//! Core Types for logsynth
//!
//! Flat structured log records: `timestamp`, `level`, `message`, then the
//! category-specific fields in insertion order. Types are co-located here as
//! the single source of truth.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Millisecond-precision UTC layout used for every emitted timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Render a timestamp the way it appears in the output
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

// ============================================================================
// Severity
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// Severity band for a completed HTTP request
    pub fn for_status(status: u16) -> Level {
        if status < 400 {
            Level::Info
        } else if status < 500 {
            Level::Warn
        } else {
            Level::Error
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Field values
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    String(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            FieldValue::Int(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::String(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<u16> for FieldValue {
    fn from(i: u16) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: &'static str,
    pub value: FieldValue,
}

// ============================================================================
// Events and records
// ============================================================================

/// A record body before the clock stamps it.
///
/// Categories and anchors build events; the synthesizer turns each one into a
/// [`LogRecord`] at the current simulated time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub level: Level,
    pub message: String,
    pub fields: Vec<KeyValue>,
}

impl Event {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, keeping insertion order
    pub fn with(mut self, key: &'static str, value: impl Into<FieldValue>) -> Self {
        self.fields.push(KeyValue {
            key,
            value: value.into(),
        });
        self
    }
}

/// Individual log record - primary unit of output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub fields: Vec<KeyValue>,
}

impl LogRecord {
    pub fn new(timestamp: DateTime<Utc>, event: Event) -> Self {
        Self {
            timestamp,
            level: event.level,
            message: event.message,
            fields: event.fields,
        }
    }

    /// Get field value by key
    pub fn get_field(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| &kv.value)
    }

    /// Get service name from fields
    pub fn service_name(&self) -> Option<&str> {
        self.get_field("service").and_then(|v| v.as_str())
    }
}

impl Serialize for LogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.fields.len()))?;
        map.serialize_entry("timestamp", &format_timestamp(&self.timestamp))?;
        map.serialize_entry("level", &self.level)?;
        map.serialize_entry("message", &self.message)?;
        for kv in &self.fields {
            map.serialize_entry(kv.key, &kv.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 6, 0, 45).unwrap()
    }

    #[test]
    fn test_record_serializes_in_insertion_order() {
        let event = Event::new(Level::Warn, "GET /api/v1/users completed")
            .with("status", 404u16)
            .with("duration", "42ms")
            .with("service", "user-service");
        let record = LogRecord::new(sample_time(), event);

        let line = serde_json::to_string(&record).unwrap();
        assert_eq!(
            line,
            r#"{"timestamp":"2025-01-15T06:00:45.000Z","level":"warn","message":"GET /api/v1/users completed","status":404,"duration":"42ms","service":"user-service"}"#
        );
    }

    #[test]
    fn test_timestamp_keeps_milliseconds() {
        let ts = sample_time() + chrono::TimeDelta::milliseconds(7);
        assert_eq!(format_timestamp(&ts), "2025-01-15T06:00:45.007Z");
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(Level::for_status(200), Level::Info);
        assert_eq!(Level::for_status(301), Level::Info);
        assert_eq!(Level::for_status(399), Level::Info);
        assert_eq!(Level::for_status(400), Level::Warn);
        assert_eq!(Level::for_status(404), Level::Warn);
        assert_eq!(Level::for_status(500), Level::Error);
        assert_eq!(Level::for_status(503), Level::Error);
    }

    #[test]
    fn test_level_names_match_serde() {
        for level in Level::ALL {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.as_str()));
        }
    }

    #[test]
    fn test_field_lookup() {
        let record = LogRecord::new(
            sample_time(),
            Event::new(Level::Info, "Cache warmed for users table")
                .with("service", "user-service")
                .with("entries", 1200i64),
        );
        assert_eq!(record.service_name(), Some("user-service"));
        assert_eq!(record.get_field("entries").and_then(|v| v.as_i64()), Some(1200));
        assert!(record.get_field("status").is_none());
    }
}
