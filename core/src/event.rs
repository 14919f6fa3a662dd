// Event records ingested from the collection pipeline
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Naive layouts accepted for `createdAt`; all are read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// One immutable fact captured by the tracking pipeline.
///
/// Records are read-only input to the engine. `created_at` keeps the raw text
/// the storage layer handed over; use [`EventRecord::timestamp`] to parse it.
/// A record with an unparseable timestamp or an empty type is still a valid
/// value here: the analyzer decides what to skip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default)]
    pub id: String,

    #[serde(default, deserialize_with = "timestamp_text")]
    pub created_at: String,

    #[serde(rename = "type", default)]
    pub event_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl EventRecord {
    pub fn new(
        id: impl Into<String>,
        created_at: impl Into<String>,
        event_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            created_at: created_at.into(),
            event_type: event_type.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Parsed `created_at` in UTC, or `None` when it cannot be read
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Calendar day of the event, taken from its own timestamp
    pub fn calendar_day(&self) -> Option<NaiveDate> {
        self.timestamp().map(|ts| ts.date_naive())
    }

    /// Event type, if it is not blank
    pub fn kind(&self) -> Option<&str> {
        let kind = self.event_type.trim();
        if kind.is_empty() {
            None
        } else {
            Some(kind)
        }
    }

    /// Look up a top-level payload field
    pub fn payload_field(&self, key: &str) -> Option<&Value> {
        self.payload.as_ref().and_then(|p| p.get(key))
    }
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (any offset), offset timestamps with a space separator,
/// naive date-times (read as UTC), bare dates (midnight UTC) and integer
/// epoch milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(ts.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);
    }

    None
}

// Storage may emit `createdAt` as text or as epoch millis; anything else is
// kept as empty text so the record is skipped instead of failing the batch.
fn timestamp_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
