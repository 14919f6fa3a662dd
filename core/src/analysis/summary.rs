//! Pattern summary: an open mapping from metric name to value.
//!
//! Consumers look metrics up by name, so new metrics can be added without
//! breaking anyone. The well-known names live in [`keys`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Well-known metric names
pub mod keys {
    pub const TOTAL_EVENTS: &str = "totalEvents";
    pub const SKIPPED_EVENTS: &str = "skippedEvents";
    pub const AVERAGE_EVENTS_PER_DAY: &str = "averageEventsPerDay";
    pub const DISTINCT_DAYS: &str = "distinctDays";
    pub const FIRST_EVENT_AT: &str = "firstEventAt";
    pub const LAST_EVENT_AT: &str = "lastEventAt";
    pub const DAILY_COUNTS: &str = "dailyCounts";
    pub const BUSIEST_DAY: &str = "busiestDay";
    pub const BUSIEST_HOUR: &str = "busiestHour";
    pub const HOURLY_DISTRIBUTION: &str = "hourlyDistribution";
    pub const EVENT_TYPE_COUNTS: &str = "eventTypeCounts";
    pub const DISTINCT_EVENT_TYPES: &str = "distinctEventTypes";
    pub const DOMINANT_EVENT_TYPE: &str = "dominantEventType";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusiestDay {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusiestHour {
    /// Hour of day in UTC, 0..=23
    pub hour: u32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominantEventType {
    #[serde(rename = "type")]
    pub event_type: String,
    pub count: u64,
    /// Fraction of typed events, in (0, 1]
    pub share: f64,
}

/// Derived aggregate over an event batch. Empty input gives an empty summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternSummary {
    metrics: BTreeMap<String, Value>,
}

impl PatternSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.metrics.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metrics.get(key)
    }

    /// Add or replace a metric
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metrics.insert(key.into(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.metrics.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    /// Decode a structured metric
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn average_events_per_day(&self) -> Option<f64> {
        self.get_f64(keys::AVERAGE_EVENTS_PER_DAY)
    }

    pub fn total_events(&self) -> Option<u64> {
        self.get_u64(keys::TOTAL_EVENTS)
    }

    pub fn skipped_events(&self) -> Option<u64> {
        self.get_u64(keys::SKIPPED_EVENTS)
    }

    pub fn distinct_days(&self) -> Option<u64> {
        self.get_u64(keys::DISTINCT_DAYS)
    }

    pub fn distinct_event_types(&self) -> Option<u64> {
        self.get_u64(keys::DISTINCT_EVENT_TYPES)
    }

    pub fn busiest_day(&self) -> Option<BusiestDay> {
        self.get_as(keys::BUSIEST_DAY)
    }

    pub fn busiest_hour(&self) -> Option<BusiestHour> {
        self.get_as(keys::BUSIEST_HOUR)
    }

    pub fn dominant_event_type(&self) -> Option<DominantEventType> {
        self.get_as(keys::DOMINANT_EVENT_TYPE)
    }

    /// Event type -> count
    pub fn event_type_counts(&self) -> Option<BTreeMap<String, u64>> {
        self.get_as(keys::EVENT_TYPE_COUNTS)
    }

    /// `YYYY-MM-DD` -> count
    pub fn daily_counts(&self) -> Option<BTreeMap<String, u64>> {
        self.get_as(keys::DAILY_COUNTS)
    }

    pub fn hourly_distribution(&self) -> Option<Vec<u64>> {
        self.get_as(keys::HOURLY_DISTRIBUTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_summary_serializes_as_empty_object() {
        let summary = PatternSummary::new();
        assert_eq!(serde_json::to_value(&summary).unwrap(), json!({}));
    }

    #[test]
    fn open_mapping_accepts_custom_metrics() {
        let mut summary = PatternSummary::new();
        summary.insert("bounceRate", 0.25);
        summary.insert(keys::BUSIEST_HOUR, json!({"hour": 14, "count": 9}));

        assert_eq!(summary.get_f64("bounceRate"), Some(0.25));
        assert_eq!(
            summary.busiest_hour(),
            Some(BusiestHour { hour: 14, count: 9 })
        );
        assert!(summary.average_events_per_day().is_none());
        assert_eq!(summary.keys().collect::<Vec<_>>(), vec!["bounceRate", "busiestHour"]);
    }
}
