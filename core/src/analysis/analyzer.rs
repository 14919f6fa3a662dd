use super::summary::{keys, BusiestDay, BusiestHour, DominantEventType, PatternSummary};
use crate::config::AnalysisConfig;
use crate::event::EventRecord;
use chrono::{DateTime, NaiveDate, SecondsFormat, Timelike, Utc};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Stateless summarizer over event batches.
///
/// Records whose timestamp cannot be parsed are left out of the date-based
/// metrics and counted under `skippedEvents`; records with a blank type are
/// left out of the type-based metrics. Neither aborts the pass.
#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    config: AnalysisConfig,
}

/// Analyze with the default configuration
pub fn analyze_patterns(events: &[EventRecord]) -> PatternSummary {
    PatternAnalyzer::default().analyze(events)
}

#[derive(Default)]
struct Tally<'a> {
    daily: BTreeMap<NaiveDate, u64>,
    hourly: [u64; 24],
    types: BTreeMap<&'a str, u64>,
    first: Option<DateTime<Utc>>,
    last: Option<DateTime<Utc>>,
    dated: u64,
    skipped: u64,
}

impl<'a> Tally<'a> {
    fn record(&mut self, event: &'a EventRecord) {
        if let Some(kind) = event.kind() {
            *self.types.entry(kind).or_default() += 1;
        }

        let Some(ts) = event.timestamp() else {
            self.skipped += 1;
            return;
        };

        self.dated += 1;
        *self.daily.entry(ts.date_naive()).or_default() += 1;
        self.hourly[ts.hour() as usize] += 1;
        self.first = Some(self.first.map_or(ts, |f| f.min(ts)));
        self.last = Some(self.last.map_or(ts, |l| l.max(ts)));
    }
}

impl PatternAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Summarize `events`. An empty batch yields an empty summary.
    pub fn analyze(&self, events: &[EventRecord]) -> PatternSummary {
        let mut summary = PatternSummary::new();
        if events.is_empty() {
            debug!(target: "pattern_analyzer", "No events; empty summary");
            return summary;
        }

        let mut tally = Tally::default();
        for event in events {
            tally.record(event);
        }

        summary.insert(keys::TOTAL_EVENTS, events.len() as u64);
        summary.insert(keys::SKIPPED_EVENTS, tally.skipped);

        Self::date_metrics(&tally, &mut summary);
        self.type_metrics(&tally, &mut summary);

        if tally.skipped > 0 {
            warn!(
                target: "pattern_analyzer",
                skipped = tally.skipped,
                total = events.len(),
                "Skipped events with unparseable timestamps"
            );
        }
        debug!(
            target: "pattern_analyzer",
            total = events.len(),
            metrics = summary.len(),
            "Analyzed event batch"
        );

        summary
    }

    fn date_metrics(tally: &Tally<'_>, summary: &mut PatternSummary) {
        if tally.daily.is_empty() {
            return;
        }

        let days = tally.daily.len() as u64;
        summary.insert(keys::DISTINCT_DAYS, days);
        summary.insert(
            keys::AVERAGE_EVENTS_PER_DAY,
            tally.dated as f64 / days as f64,
        );

        if let (Some(first), Some(last)) = (tally.first, tally.last) {
            summary.insert(
                keys::FIRST_EVENT_AT,
                first.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
            summary.insert(
                keys::LAST_EVENT_AT,
                last.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        }

        let daily: Map<String, Value> = tally
            .daily
            .iter()
            .map(|(day, n)| (day.format("%Y-%m-%d").to_string(), Value::from(*n)))
            .collect();
        summary.insert(keys::DAILY_COUNTS, Value::Object(daily));

        // Ascending iteration plus strict comparison keeps the earliest day on ties
        let mut busiest: Option<(NaiveDate, u64)> = None;
        for (day, n) in &tally.daily {
            if busiest.map_or(true, |(_, best)| *n > best) {
                busiest = Some((*day, *n));
            }
        }
        if let Some((day, count)) = busiest {
            summary.insert(
                keys::BUSIEST_DAY,
                json!(BusiestDay {
                    date: day.format("%Y-%m-%d").to_string(),
                    count,
                }),
            );
        }

        let mut peak: Option<BusiestHour> = None;
        for (hour, n) in tally.hourly.iter().enumerate() {
            if *n > 0 && peak.map_or(true, |p| *n > p.count) {
                peak = Some(BusiestHour {
                    hour: hour as u32,
                    count: *n,
                });
            }
        }
        if let Some(peak) = peak {
            summary.insert(keys::BUSIEST_HOUR, json!(peak));
        }
        summary.insert(keys::HOURLY_DISTRIBUTION, json!(tally.hourly.to_vec()));
    }

    fn type_metrics(&self, tally: &Tally<'_>, summary: &mut PatternSummary) {
        if tally.types.is_empty() {
            return;
        }

        let counts: Map<String, Value> = tally
            .types
            .iter()
            .map(|(kind, n)| (kind.to_string(), Value::from(*n)))
            .collect();
        summary.insert(keys::EVENT_TYPE_COUNTS, Value::Object(counts));
        summary.insert(keys::DISTINCT_EVENT_TYPES, tally.types.len() as u64);

        let typed: u64 = tally.types.values().sum();
        let top = tally.types.values().copied().max().unwrap_or(0);
        let mut leaders = tally.types.iter().filter(|(_, n)| **n == top);

        // A dominant type must lead outright and carry enough of the volume
        if let (Some((kind, count)), None) = (leaders.next(), leaders.next()) {
            let share = *count as f64 / typed as f64;
            if share >= self.config.dominance_threshold {
                summary.insert(
                    keys::DOMINANT_EVENT_TYPE,
                    json!(DominantEventType {
                        event_type: kind.to_string(),
                        count: *count,
                        share,
                    }),
                );
            }
        }
    }
}
