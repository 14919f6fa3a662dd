use std::sync::Arc;

use beacon_core::widget::kinds;
use beacon_core::{
    BeaconError, Engine, EngineConfig, EventRecord, FixedClock, SequentialIds, WidgetLayout,
};
use chrono::{DateTime, Utc};

fn engine() -> Engine {
    Engine::with_effects(
        EngineConfig::default(),
        Arc::new(FixedClock::new("2024-01-01T00:00:00Z".parse().unwrap())),
        Arc::new(SequentialIds::new("e")),
    )
    .unwrap()
}

fn batch() -> Vec<EventRecord> {
    vec![
        EventRecord::new("1", "2023-01-01T10:00:00Z", "click"),
        EventRecord::new("2", "2023-01-01T11:00:00Z", "click"),
        EventRecord::new("3", "2023-01-02T12:00:00Z", "pageview"),
    ]
}

#[test]
fn engine_bootstraps_builtin_kinds() {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    assert_eq!(engine.registry.len(), kinds::builtin_definitions().len());
    assert!(engine.registry.has_widget(kinds::EVENT_COUNT));
}

#[test]
fn strict_engine_bootstraps_cleanly() {
    let config = EngineConfig {
        strict_registration: true,
        ..EngineConfig::default()
    };
    assert!(Engine::new(config).is_ok());
}

#[test]
fn engine_runs_analysis_and_insights() {
    let engine = engine();
    assert_eq!(engine.analyze(&batch()).average_events_per_day(), Some(1.5));

    let widgets = engine.generate_insights(&batch());
    assert_eq!(widgets.len(), 4);
    assert!(widgets
        .iter()
        .all(|w| engine.registry.has_widget(&w.kind)));
    let frozen: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
    assert!(widgets.iter().all(|w| w.date_added == frozen));
}

#[test]
fn manual_widgets_share_the_engine_effects() {
    let engine = engine();
    let widget = engine.create_widget("anything", "Manual", WidgetLayout::new("m", 0, 0, 2, 2), None);
    assert_eq!(widget.id, "e-1");
}

#[test]
fn validated_creation_checks_registry() {
    let engine = engine();

    let err = engine
        .create_validated_widget("nope", "x", WidgetLayout::new("m", 0, 0, 3, 2), None)
        .unwrap_err();
    assert!(matches!(err, BeaconError::UnknownWidget(_)));

    let ok = engine
        .create_validated_widget(kinds::EVENT_COUNT, "Count", WidgetLayout::new("m", 0, 0, 3, 2), None)
        .unwrap();
    assert_eq!(ok.kind, kinds::EVENT_COUNT);
}
