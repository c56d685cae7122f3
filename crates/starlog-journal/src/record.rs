//! Raw journal records
//!
//! One line of the journal is one record: a JSON object carrying an `event`
//! discriminator, a `timestamp`, and whatever other fields that game build
//! chose to write. The record is the immutable source of truth for exactly
//! one decode operation.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use starlog_common::{JournalError, Result};

/// A single raw journal record.
///
/// Construction is the only place structural validity is enforced: the value
/// must be a JSON object with a string `event` and a parseable UTC
/// `timestamp`. Everything else is optional and schema-drifting; the field
/// extraction layer (see [`crate::fields`]) absorbs that drift.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    event: String,
    timestamp: DateTime<Utc>,
    fields: Map<String, Value>,
}

impl RawRecord {
    /// Build a record from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(fields) = value else {
            return Err(JournalError::InvalidRecord(
                "record is not a JSON object".to_string(),
            ));
        };

        let event = match fields.get("event").and_then(Value::as_str) {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => {
                return Err(JournalError::InvalidRecord(
                    "record has no event discriminator".to_string(),
                ))
            },
        };

        let raw_ts = match fields.get("timestamp").and_then(Value::as_str) {
            Some(t) => t,
            None => {
                return Err(JournalError::InvalidRecord(
                    "record has no timestamp".to_string(),
                ))
            },
        };

        let timestamp = parse_timestamp(raw_ts)?;

        Ok(Self {
            event,
            timestamp,
            fields,
        })
    }

    /// Build a record from one journal line.
    pub fn from_line(line: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(line)
            .map_err(|e| JournalError::InvalidRecord(format!("not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// The event discriminator, exactly as written.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The record's UTC timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The full field map, including `event` and `timestamp`.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the record, keeping the untouched field map.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Borrow a single raw field value.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Parse the journal's fixed textual timestamp format (RFC 3339, UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| JournalError::InvalidTimestamp {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
