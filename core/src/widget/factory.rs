use super::instance::{Settings, WidgetInstance, WidgetLayout};
use super::registry::WidgetRegistry;
use crate::effects::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::{BeaconError, Result};
use std::sync::Arc;
use tracing::debug;

/// Builds widget instances.
///
/// Construction is total: the factory does not check `kind` against the
/// registry nor the layout against the kind's constraints. Callers that want
/// that check run [`WidgetFactory::validate`] first.
#[derive(Clone)]
pub struct WidgetFactory {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for WidgetFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetFactory {
    pub fn new() -> Self {
        Self::with_effects(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    pub fn with_effects(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Create a new widget with a fresh id; `date_added` and `date_updated`
    /// are both the current instant. Missing settings become an empty map.
    pub fn create_widget(
        &self,
        kind: impl Into<String>,
        title: impl Into<String>,
        layout: WidgetLayout,
        settings: Option<Settings>,
    ) -> WidgetInstance {
        let now = self.clock.now();
        let widget = WidgetInstance {
            id: self.ids.next_id(),
            kind: kind.into(),
            title: title.into(),
            layout,
            settings: settings.unwrap_or_default(),
            date_added: now,
            date_updated: now,
        };

        debug!(target: "widget_factory", id = %widget.id, kind = %widget.kind, "Created widget");
        widget
    }

    /// A fresh identifier for a layout slot
    pub fn next_layout_id(&self) -> String {
        self.ids.next_id()
    }

    /// Check a prospective widget against the registry: the kind must be
    /// registered and the layout size must fit its constraints.
    pub fn validate(registry: &WidgetRegistry, kind: &str, layout: &WidgetLayout) -> Result<()> {
        let constraints = registry
            .get_constraints(kind)
            .ok_or_else(|| BeaconError::UnknownWidget(kind.to_string()))?;

        if !constraints.allows_size(layout.size()) {
            return Err(BeaconError::InvalidLayout {
                kind: kind.to_string(),
                reason: format!(
                    "size {}x{} outside {}x{}..={}x{}",
                    layout.w,
                    layout.h,
                    constraints.min_size.w,
                    constraints.min_size.h,
                    constraints.max_size.w,
                    constraints.max_size.h
                ),
            });
        }

        Ok(())
    }
}
