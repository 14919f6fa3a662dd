//! Insight templates: how each widget kind turns a pattern summary into a
//! title and default settings.

use crate::analysis::PatternSummary;
use crate::widget::kinds;
use crate::widget::Settings;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

/// Title and settings proposed for one insight widget
#[derive(Debug, Clone, PartialEq)]
pub struct InsightProposal {
    pub title: String,
    pub settings: Settings,
}

impl InsightProposal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            settings: Settings::new(),
        }
    }

    pub fn with_setting(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }
}

/// Turns a summary into a proposal for one widget kind.
///
/// Constraint checks (event volume, distinct days, required metrics) happen
/// in the generator before `propose` is called; a template may still decline
/// by returning `None` when the summary carries nothing worth showing.
pub trait InsightTemplate: Send + Sync {
    /// Widget kind this template proposes
    fn kind(&self) -> &str;

    fn propose(&self, summary: &PatternSummary) -> Option<InsightProposal>;
}

/// Smallest preset time range covering the summary's first..last span
pub fn time_range_for(summary: &PatternSummary) -> &'static str {
    let first = summary
        .get(crate::analysis::keys::FIRST_EVENT_AT)
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<DateTime<Utc>>().ok());
    let last = summary
        .get(crate::analysis::keys::LAST_EVENT_AT)
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<DateTime<Utc>>().ok());

    let Some(span) = first.zip(last).map(|(f, l)| l - f) else {
        return "all";
    };
    if span <= chrono::Duration::hours(24) {
        "24h"
    } else if span <= chrono::Duration::days(7) {
        "7d"
    } else if span <= chrono::Duration::days(30) {
        "30d"
    } else {
        "all"
    }
}

pub struct EventCountTemplate;

impl InsightTemplate for EventCountTemplate {
    fn kind(&self) -> &str {
        kinds::EVENT_COUNT
    }

    fn propose(&self, summary: &PatternSummary) -> Option<InsightProposal> {
        let total = summary.total_events()?;
        Some(
            InsightProposal::new(format!("Total events ({total})"))
                .with_setting("timeRange", time_range_for(summary)),
        )
    }
}

pub struct EventsOverTimeTemplate;

impl InsightTemplate for EventsOverTimeTemplate {
    fn kind(&self) -> &str {
        kinds::EVENTS_OVER_TIME
    }

    fn propose(&self, summary: &PatternSummary) -> Option<InsightProposal> {
        let average = summary.average_events_per_day()?;
        Some(
            InsightProposal::new(format!("Events per day (avg {average:.1})"))
                .with_setting("interval", "day")
                .with_setting("timeRange", time_range_for(summary)),
        )
    }
}

pub struct DominantEventTemplate;

impl InsightTemplate for DominantEventTemplate {
    fn kind(&self) -> &str {
        kinds::DOMINANT_EVENT
    }

    fn propose(&self, summary: &PatternSummary) -> Option<InsightProposal> {
        let dominant = summary.dominant_event_type()?;
        Some(
            InsightProposal::new(format!("Most common event: {}", dominant.event_type))
                .with_setting("eventType", dominant.event_type)
                .with_setting("showShare", true),
        )
    }
}

pub struct EventTypeBreakdownTemplate;

/// Types shown in a breakdown by default
const BREAKDOWN_LIMIT: u64 = 5;

impl InsightTemplate for EventTypeBreakdownTemplate {
    fn kind(&self) -> &str {
        kinds::EVENT_TYPE_BREAKDOWN
    }

    fn propose(&self, summary: &PatternSummary) -> Option<InsightProposal> {
        let distinct = summary.distinct_event_types()?;
        // A single type makes a one-slice chart
        if distinct < 2 {
            return None;
        }
        Some(
            InsightProposal::new(format!("Event types ({distinct})"))
                .with_setting("chartType", "pie")
                .with_setting("limit", distinct.min(BREAKDOWN_LIMIT)),
        )
    }
}

pub struct BusiestHourTemplate;

impl InsightTemplate for BusiestHourTemplate {
    fn kind(&self) -> &str {
        kinds::BUSIEST_HOUR
    }

    fn propose(&self, summary: &PatternSummary) -> Option<InsightProposal> {
        let peak = summary.busiest_hour()?;
        Some(
            InsightProposal::new(format!("Busiest hour: {:02}:00 UTC", peak.hour))
                .with_setting("highlightHour", peak.hour)
                .with_setting("timeRange", time_range_for(summary)),
        )
    }
}

pub struct BusiestDayTemplate;

impl InsightTemplate for BusiestDayTemplate {
    fn kind(&self) -> &str {
        kinds::BUSIEST_DAY
    }

    fn propose(&self, summary: &PatternSummary) -> Option<InsightProposal> {
        let day = summary.busiest_day()?;
        Some(
            InsightProposal::new(format!("Busiest day: {} ({} events)", day.date, day.count))
                .with_setting("date", day.date),
        )
    }
}

pub struct DailyAverageTemplate;

impl InsightTemplate for DailyAverageTemplate {
    fn kind(&self) -> &str {
        kinds::DAILY_AVERAGE
    }

    fn propose(&self, summary: &PatternSummary) -> Option<InsightProposal> {
        summary.average_events_per_day()?;
        Some(
            InsightProposal::new("Average events per day")
                .with_setting("precision", 1)
                .with_setting("timeRange", time_range_for(summary)),
        )
    }
}

/// One template per built-in widget kind
pub fn builtin_templates() -> Vec<Arc<dyn InsightTemplate>> {
    vec![
        Arc::new(EventCountTemplate),
        Arc::new(EventsOverTimeTemplate),
        Arc::new(DominantEventTemplate),
        Arc::new(EventTypeBreakdownTemplate),
        Arc::new(BusiestHourTemplate),
        Arc::new(BusiestDayTemplate),
        Arc::new(DailyAverageTemplate),
    ]
}
