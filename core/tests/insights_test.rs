use std::sync::Arc;

use beacon_core::analysis::keys;
use beacon_core::widget::kinds;
use beacon_core::{
    EventRecord, FixedClock, GridSize, InsightConfig, InsightGenerator, InsightProposal,
    InsightTemplate, PatternAnalyzer, PatternSummary, SequentialIds, WidgetConstraints,
    WidgetDefinition, WidgetFactory, WidgetRegistry,
};

fn ev(id: &str, at: &str, kind: &str) -> EventRecord {
    EventRecord::new(id, at, kind)
}

fn generator_with(registry: WidgetRegistry, config: InsightConfig) -> InsightGenerator {
    InsightGenerator::new(
        Arc::new(registry),
        Arc::new(WidgetFactory::with_effects(
            Arc::new(FixedClock::new("2023-02-01T00:00:00Z".parse().unwrap())),
            Arc::new(SequentialIds::new("ins")),
        )),
        PatternAnalyzer::default(),
        config,
    )
}

fn builtin_generator() -> InsightGenerator {
    generator_with(WidgetRegistry::with_builtin_kinds(), InsightConfig::default())
}

fn two_day_batch() -> Vec<EventRecord> {
    vec![
        ev("1", "2023-01-01T10:00:00Z", "click"),
        ev("2", "2023-01-01T11:00:00Z", "click"),
        ev("3", "2023-01-02T12:00:00Z", "pageview"),
    ]
}

#[test]
fn single_event_gives_no_insights() {
    let generator = builtin_generator();
    assert!(generator
        .generate(&[ev("1", "2023-01-01T10:00:00Z", "click")])
        .is_empty());
    assert!(generator.generate(&[]).is_empty());
}

#[test]
fn proposes_eligible_kinds_in_registry_order() {
    let widgets = builtin_generator().generate(&two_day_batch());
    let kinds: Vec<&str> = widgets.iter().map(|w| w.kind.as_str()).collect();

    assert_eq!(
        kinds,
        vec![
            kinds::EVENT_COUNT,
            kinds::EVENTS_OVER_TIME,
            kinds::DOMINANT_EVENT,
            kinds::EVENT_TYPE_BREAKDOWN,
        ]
    );
    assert_eq!(widgets[0].title, "Total events (3)");
    assert_eq!(widgets[1].title, "Events per day (avg 1.5)");
    assert_eq!(widgets[2].title, "Most common event: click");
    assert_eq!(widgets[2].setting("eventType"), Some(&serde_json::json!("click")));
}

#[test]
fn max_widgets_caps_output() {
    let config = InsightConfig {
        max_widgets: 2,
        ..InsightConfig::default()
    };
    let widgets = generator_with(WidgetRegistry::with_builtin_kinds(), config).generate(&two_day_batch());
    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0].kind, kinds::EVENT_COUNT);
    assert_eq!(widgets[1].kind, kinds::EVENTS_OVER_TIME);
}

#[test]
fn single_day_batch_skips_multi_day_kinds() {
    let events = vec![
        ev("1", "2023-01-01T10:00:00Z", "click"),
        ev("2", "2023-01-01T11:00:00Z", "click"),
        ev("3", "2023-01-01T12:00:00Z", "click"),
    ];
    let config = InsightConfig {
        max_widgets: 10,
        ..InsightConfig::default()
    };
    let widgets = generator_with(WidgetRegistry::with_builtin_kinds(), config).generate(&events);
    let kinds: Vec<&str> = widgets.iter().map(|w| w.kind.as_str()).collect();

    assert!(!kinds.contains(&kinds::EVENTS_OVER_TIME));
    assert!(!kinds.contains(&kinds::BUSIEST_DAY));
    // One type only: no breakdown chart
    assert!(!kinds.contains(&kinds::EVENT_TYPE_BREAKDOWN));
    assert!(kinds.contains(&kinds::EVENT_COUNT));
    assert!(kinds.contains(&kinds::DAILY_AVERAGE));
}

#[test]
fn repeated_generation_matches_on_content() {
    let generator = builtin_generator();
    let first = generator.generate(&two_day_batch());
    let second = generator.generate(&two_day_batch());

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_ne!(a.id, b.id);
        assert!(a.same_content_ignoring_layout_id(b));
    }
}

#[test]
fn layouts_fit_grid_and_do_not_overlap() {
    let config = InsightConfig {
        max_widgets: 10,
        grid_columns: 8,
        ..InsightConfig::default()
    };
    let mut events = two_day_batch();
    events.push(ev("4", "2023-01-02T12:30:00Z", "click"));
    events.push(ev("5", "2023-01-03T12:45:00Z", "click"));

    let widgets = generator_with(WidgetRegistry::with_builtin_kinds(), config).generate(&events);
    assert!(widgets.len() > 3);

    for (n, a) in widgets.iter().enumerate() {
        assert!(a.layout.right() <= 8);
        assert_ne!(a.id, a.layout.i);
        for b in &widgets[n + 1..] {
            assert!(!a.layout.overlaps(&b.layout), "{} overlaps {}", a.kind, b.kind);
        }
    }
}

#[test]
fn narrow_grid_only_proposes_kinds_that_fit() {
    let config = InsightConfig {
        max_widgets: 10,
        grid_columns: 3,
        ..InsightConfig::default()
    };
    let registry = WidgetRegistry::with_builtin_kinds();
    let widgets = generator_with(WidgetRegistry::with_builtin_kinds(), config).generate(&two_day_batch());

    assert!(!widgets.is_empty());
    for w in &widgets {
        assert!(
            WidgetFactory::validate(&registry, &w.kind, &w.layout).is_ok(),
            "{} placed at {}x{}",
            w.kind,
            w.layout.w,
            w.layout.h
        );
        assert!(w.layout.right() <= 3);
    }
    let kinds: Vec<&str> = widgets.iter().map(|w| w.kind.as_str()).collect();
    assert!(kinds.contains(&kinds::EVENT_COUNT));
    assert!(!kinds.contains(&kinds::EVENTS_OVER_TIME));
    assert!(!kinds.contains(&kinds::BUSIEST_HOUR));
    assert!(kinds.contains(&kinds::EVENT_TYPE_BREAKDOWN));
}

#[test]
fn kinds_without_templates_are_ignored() {
    let registry = WidgetRegistry::new();
    registry.register(WidgetDefinition::new("custom_table", "Custom"));
    registry.register(kinds::describe_event_count());

    let widgets = generator_with(registry, InsightConfig::default()).generate(&two_day_batch());
    assert_eq!(widgets.len(), 1);
    assert_eq!(widgets[0].kind, kinds::EVENT_COUNT);
}

struct PageviewTemplate;

impl InsightTemplate for PageviewTemplate {
    fn kind(&self) -> &str {
        "pageviews"
    }

    fn propose(&self, summary: &PatternSummary) -> Option<InsightProposal> {
        let views = summary.event_type_counts()?.get("pageview").copied()?;
        Some(InsightProposal::new(format!("Pageviews: {views}")).with_setting("eventType", "pageview"))
    }
}

#[test]
fn custom_templates_plug_into_registry_order() {
    let registry = WidgetRegistry::new();
    registry.register(
        WidgetDefinition::new("pageviews", "Pageviews").with_constraints(
            WidgetConstraints::sized(GridSize::new(2, 2), GridSize::new(2, 2), GridSize::new(4, 4))
                .requiring(keys::EVENT_TYPE_COUNTS),
        ),
    );
    registry.register(kinds::describe_event_count());

    let mut generator = generator_with(registry, InsightConfig::default());
    generator.register_template(Arc::new(PageviewTemplate));

    let widgets = generator.generate(&two_day_batch());
    assert_eq!(widgets[0].kind, "pageviews");
    assert_eq!(widgets[0].title, "Pageviews: 1");
    assert_eq!((widgets[0].layout.w, widgets[0].layout.h), (2, 2));
    assert_eq!(widgets[1].kind, kinds::EVENT_COUNT);
}

#[test]
fn per_kind_min_events_gates_proposal() {
    // busiest_hour wants at least five events
    let registry = WidgetRegistry::new();
    registry.register(kinds::describe_busiest_hour());
    let generator = generator_with(registry, InsightConfig::default());

    assert!(generator.generate(&two_day_batch()).is_empty());

    let mut events = two_day_batch();
    events.push(ev("4", "2023-01-02T12:30:00Z", "click"));
    events.push(ev("5", "2023-01-02T12:45:00Z", "click"));
    let widgets = generator.generate(&events);
    assert_eq!(widgets.len(), 1);
    assert_eq!(widgets[0].title, "Busiest hour: 12:00 UTC");
}

#[test]
fn report_carries_summary_even_without_widgets() {
    let generator = builtin_generator();
    let report = generator.generate_report(&[ev("1", "2023-01-01T10:00:00Z", "click")]);

    assert!(report.widgets.is_empty());
    assert_eq!(report.summary.total_events(), Some(1));

    let report = generator.generate_report(&two_day_batch());
    assert_eq!(report.summary.average_events_per_day(), Some(1.5));
    assert_eq!(report.widgets.len(), 4);
}
