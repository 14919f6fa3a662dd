//! Built-in widget kinds and the registry bootstrap.
//!
//! Each kind describes itself through a pure function. The host process
//! hands the ordered list to [`bootstrap`] once at startup; nothing registers
//! itself as a side effect of being loaded.

use super::definition::{ConfigField, GridSize, WidgetConstraints, WidgetDefinition};
use super::registry::WidgetRegistry;
use crate::analysis::keys;
use crate::Result;
use tracing::info;

pub const EVENT_COUNT: &str = "event_count";
pub const EVENTS_OVER_TIME: &str = "events_over_time";
pub const DOMINANT_EVENT: &str = "dominant_event";
pub const EVENT_TYPE_BREAKDOWN: &str = "event_type_breakdown";
pub const BUSIEST_HOUR: &str = "busiest_hour";
pub const BUSIEST_DAY: &str = "busiest_day";
pub const DAILY_AVERAGE: &str = "daily_average";

pub const TIME_RANGES: [&str; 4] = ["24h", "7d", "30d", "all"];

fn time_range_field() -> ConfigField {
    ConfigField::select("timeRange", "Time range", TIME_RANGES).with_default("7d")
}

fn event_type_field() -> ConfigField {
    ConfigField::text("eventType", "Event type filter")
}

pub fn describe_event_count() -> WidgetDefinition {
    WidgetDefinition::new(EVENT_COUNT, "Event count")
        .with_constraints(
            WidgetConstraints::sized(GridSize::new(2, 2), GridSize::new(3, 2), GridSize::new(6, 4))
                .with_min_events(2)
                .requiring(keys::TOTAL_EVENTS),
        )
        .with_field(event_type_field())
        .with_field(time_range_field())
}

pub fn describe_events_over_time() -> WidgetDefinition {
    WidgetDefinition::new(EVENTS_OVER_TIME, "Events over time")
        .with_constraints(
            WidgetConstraints::sized(GridSize::new(4, 3), GridSize::new(6, 4), GridSize::new(12, 8))
                .with_min_events(2)
                .with_min_distinct_days(2)
                .requiring(keys::DAILY_COUNTS),
        )
        .with_field(ConfigField::select("interval", "Interval", ["hour", "day", "week"]).with_default("day"))
        .with_field(event_type_field())
        .with_field(time_range_field())
}

pub fn describe_dominant_event() -> WidgetDefinition {
    WidgetDefinition::new(DOMINANT_EVENT, "Most common event")
        .with_constraints(
            WidgetConstraints::sized(GridSize::new(2, 2), GridSize::new(3, 2), GridSize::new(6, 4))
                .with_min_events(3)
                .requiring(keys::DOMINANT_EVENT_TYPE),
        )
        .with_field(event_type_field())
        .with_field(ConfigField::toggle("showShare", "Show share of total").with_default(true))
}

pub fn describe_event_type_breakdown() -> WidgetDefinition {
    WidgetDefinition::new(EVENT_TYPE_BREAKDOWN, "Event type breakdown")
        .with_constraints(
            WidgetConstraints::sized(GridSize::new(3, 3), GridSize::new(4, 4), GridSize::new(8, 8))
                .with_min_events(2)
                .requiring(keys::EVENT_TYPE_COUNTS),
        )
        .with_field(ConfigField::select("chartType", "Chart type", ["pie", "bar", "table"]).with_default("pie"))
        .with_field(ConfigField::number("limit", "Max types shown").with_default(5))
}

pub fn describe_busiest_hour() -> WidgetDefinition {
    WidgetDefinition::new(BUSIEST_HOUR, "Busiest hour")
        .with_constraints(
            WidgetConstraints::sized(GridSize::new(4, 3), GridSize::new(6, 3), GridSize::new(12, 6))
                .with_min_events(5)
                .requiring(keys::BUSIEST_HOUR)
                .requiring(keys::HOURLY_DISTRIBUTION),
        )
        .with_field(ConfigField::number("highlightHour", "Highlighted hour (UTC)"))
        .with_field(time_range_field())
}

pub fn describe_busiest_day() -> WidgetDefinition {
    WidgetDefinition::new(BUSIEST_DAY, "Busiest day")
        .with_constraints(
            WidgetConstraints::sized(GridSize::new(2, 2), GridSize::new(3, 2), GridSize::new(6, 4))
                .with_min_events(2)
                .with_min_distinct_days(2)
                .requiring(keys::BUSIEST_DAY),
        )
        .with_field(ConfigField::text("date", "Day"))
}

pub fn describe_daily_average() -> WidgetDefinition {
    WidgetDefinition::new(DAILY_AVERAGE, "Average events per day")
        .with_constraints(
            WidgetConstraints::sized(GridSize::new(2, 2), GridSize::new(3, 2), GridSize::new(6, 4))
                .with_min_events(2)
                .requiring(keys::AVERAGE_EVENTS_PER_DAY),
        )
        .with_field(ConfigField::number("precision", "Decimal places").with_default(1))
        .with_field(time_range_field())
}

/// Built-in kinds in registration order. Order decides which kinds win
/// insight slots when more are eligible than fit.
pub fn builtin_definitions() -> Vec<WidgetDefinition> {
    vec![
        describe_event_count(),
        describe_events_over_time(),
        describe_dominant_event(),
        describe_event_type_breakdown(),
        describe_busiest_hour(),
        describe_busiest_day(),
        describe_daily_average(),
    ]
}

/// Register `definitions` in order. With `strict`, a kind that is already
/// present aborts the bootstrap with [`crate::BeaconError::DuplicateWidget`];
/// otherwise the later definition replaces the earlier one.
///
/// Returns the number of kinds in the registry afterwards.
pub fn bootstrap<I>(registry: &WidgetRegistry, definitions: I, strict: bool) -> Result<usize>
where
    I: IntoIterator<Item = WidgetDefinition>,
{
    for definition in definitions {
        if strict {
            registry.register_unique(definition)?;
        } else {
            registry.register(definition);
        }
    }

    info!(target: "widget_registry", kinds = registry.len(), strict, "Widget registry bootstrapped");
    Ok(registry.len())
}
