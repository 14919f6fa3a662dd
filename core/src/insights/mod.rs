// Insight widget generation
//
// Runs the pattern analyzer over an event batch and proposes widgets for the
// registered kinds whose constraints the resulting summary satisfies.

mod layout;
mod templates;

pub use layout::GridPlacer;
pub use templates::{builtin_templates, time_range_for, InsightProposal, InsightTemplate};

use crate::analysis::{PatternAnalyzer, PatternSummary};
use crate::config::InsightConfig;
use crate::event::EventRecord;
use crate::widget::{WidgetConstraints, WidgetFactory, WidgetInstance, WidgetRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Summary plus the widgets proposed from it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub summary: PatternSummary,
    pub widgets: Vec<WidgetInstance>,
}

pub struct InsightGenerator {
    registry: Arc<WidgetRegistry>,
    factory: Arc<WidgetFactory>,
    analyzer: PatternAnalyzer,
    templates: HashMap<String, Arc<dyn InsightTemplate>>,
    config: InsightConfig,
}

impl InsightGenerator {
    /// Generator with a template for every built-in widget kind
    pub fn new(
        registry: Arc<WidgetRegistry>,
        factory: Arc<WidgetFactory>,
        analyzer: PatternAnalyzer,
        config: InsightConfig,
    ) -> Self {
        let mut generator = Self::without_templates(registry, factory, analyzer, config);
        for template in builtin_templates() {
            generator.register_template(template);
        }
        generator
    }

    pub fn without_templates(
        registry: Arc<WidgetRegistry>,
        factory: Arc<WidgetFactory>,
        analyzer: PatternAnalyzer,
        config: InsightConfig,
    ) -> Self {
        Self {
            registry,
            factory,
            analyzer,
            templates: HashMap::new(),
            config,
        }
    }

    /// Add or replace the template for `template.kind()`
    pub fn register_template(&mut self, template: Arc<dyn InsightTemplate>) {
        self.templates.insert(template.kind().to_string(), template);
    }

    pub fn has_template(&self, kind: &str) -> bool {
        self.templates.contains_key(kind)
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Propose insight widgets for `events`.
    ///
    /// Below `min_events` the batch carries too little signal and the result
    /// is empty. Each call mints fresh ids and timestamps, so compare widgets
    /// by content when checking repeatability.
    pub fn generate(&self, events: &[EventRecord]) -> Vec<WidgetInstance> {
        if !self.has_enough_signal(events) {
            return Vec::new();
        }
        let summary = self.analyzer.analyze(events);
        self.propose(&summary)
    }

    /// Like [`InsightGenerator::generate`], also returning the summary
    pub fn generate_report(&self, events: &[EventRecord]) -> InsightReport {
        let summary = self.analyzer.analyze(events);
        let widgets = if self.has_enough_signal(events) {
            self.propose(&summary)
        } else {
            Vec::new()
        };
        InsightReport { summary, widgets }
    }

    fn has_enough_signal(&self, events: &[EventRecord]) -> bool {
        if events.len() < self.config.min_events {
            debug!(
                target: "insight_generator",
                events = events.len(),
                min_events = self.config.min_events,
                "Not enough events for insights"
            );
            return false;
        }
        true
    }

    /// Materialize widgets for an existing summary. Kinds are visited in
    /// registry order and the first eligible ones take the available slots.
    pub fn propose(&self, summary: &PatternSummary) -> Vec<WidgetInstance> {
        let mut placer = GridPlacer::new(self.config.grid_columns);
        let mut widgets = Vec::new();

        for definition in self.registry.get_all_definitions() {
            if widgets.len() >= self.config.max_widgets {
                break;
            }
            let Some(template) = self.templates.get(&definition.kind) else {
                continue;
            };
            if definition.constraints.min_size.w > self.config.grid_columns {
                debug!(
                    target: "insight_generator",
                    kind = %definition.kind,
                    min_width = definition.constraints.min_size.w,
                    grid_columns = self.config.grid_columns,
                    "Kind does not fit the grid"
                );
                continue;
            }
            if !constraints_met(&definition.constraints, summary) {
                debug!(target: "insight_generator", kind = %definition.kind, "Constraints not met");
                continue;
            }
            let Some(proposal) = template.propose(summary) else {
                debug!(target: "insight_generator", kind = %definition.kind, "Template declined");
                continue;
            };

            let size = definition
                .constraints
                .clamp_size(definition.constraints.default_size);
            let layout = placer.place(self.factory.next_layout_id(), size);
            widgets.push(self.factory.create_widget(
                definition.kind,
                proposal.title,
                layout,
                Some(proposal.settings),
            ));
        }

        info!(target: "insight_generator", proposed = widgets.len(), "Generated insight widgets");
        widgets
    }
}

/// Whether `summary` carries enough signal for a kind with `constraints`
pub fn constraints_met(constraints: &WidgetConstraints, summary: &PatternSummary) -> bool {
    if let Some(min) = constraints.min_events {
        if summary.total_events().unwrap_or(0) < min {
            return false;
        }
    }
    if let Some(min) = constraints.min_distinct_days {
        if summary.distinct_days().unwrap_or(0) < min {
            return false;
        }
    }
    constraints
        .required_metrics
        .iter()
        .all(|key| summary.contains(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::keys;

    #[test]
    fn constraints_check_volume_days_and_metrics() {
        let constraints = WidgetConstraints::default()
            .with_min_events(3)
            .with_min_distinct_days(2)
            .requiring(keys::DAILY_COUNTS);

        let mut summary = PatternSummary::new();
        summary.insert(keys::TOTAL_EVENTS, 3u64);
        summary.insert(keys::DISTINCT_DAYS, 2u64);
        assert!(!constraints_met(&constraints, &summary));

        summary.insert(keys::DAILY_COUNTS, serde_json::json!({}));
        assert!(constraints_met(&constraints, &summary));

        summary.insert(keys::DISTINCT_DAYS, 1u64);
        assert!(!constraints_met(&constraints, &summary));
    }

    #[test]
    fn unconstrained_kind_accepts_any_summary() {
        assert!(constraints_met(
            &WidgetConstraints::default(),
            &PatternSummary::new()
        ));
    }
}
