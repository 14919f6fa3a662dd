use super::definition::{ConfigField, WidgetConstraints, WidgetDefinition};
use crate::{BeaconError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
struct RegisteredWidget {
    // Registration slot; replacing a definition keeps its slot
    slot: u64,
    definition: Arc<WidgetDefinition>,
}

/// Catalog of widget kinds.
///
/// A passive key -> metadata store: it holds no construction logic. Populate
/// it once at startup (see [`crate::widget::kinds::bootstrap`]) and read it
/// thereafter. Each kind's entry is replaced as a whole, so readers never
/// observe a partial definition.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    definitions: DashMap<String, RegisteredWidget>,
    next_slot: AtomicU64,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in widget kinds
    pub fn with_builtin_kinds() -> Self {
        let registry = Self::new();
        for definition in super::kinds::builtin_definitions() {
            registry.register(definition);
        }
        registry
    }

    /// Register a widget kind. Re-registering a kind replaces its definition
    /// (last write wins).
    pub fn register(&self, definition: WidgetDefinition) {
        let kind = definition.kind.clone();
        let definition = Arc::new(definition);

        match self.definitions.entry(kind) {
            Entry::Occupied(mut entry) => {
                warn!(target: "widget_registry", kind = %entry.key(), "Replacing widget definition");
                entry.get_mut().definition = definition;
            }
            Entry::Vacant(entry) => {
                let slot = self.next_slot.fetch_add(1, Ordering::Relaxed);
                info!(target: "widget_registry", kind = %entry.key(), slot, "Registering widget kind");
                entry.insert(RegisteredWidget { slot, definition });
            }
        }
    }

    /// Register a widget kind, rejecting kinds that already exist.
    /// The catalog is left untouched on error.
    pub fn register_unique(&self, definition: WidgetDefinition) -> Result<()> {
        match self.definitions.entry(definition.kind.clone()) {
            Entry::Occupied(entry) => {
                warn!(target: "widget_registry", kind = %entry.key(), "Rejecting duplicate widget kind");
                Err(BeaconError::DuplicateWidget(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                let slot = self.next_slot.fetch_add(1, Ordering::Relaxed);
                info!(target: "widget_registry", kind = %entry.key(), slot, "Registering widget kind");
                entry.insert(RegisteredWidget {
                    slot,
                    definition: Arc::new(definition),
                });
                Ok(())
            }
        }
    }

    /// Get a definition by kind
    pub fn get_definition(&self, kind: &str) -> Option<WidgetDefinition> {
        let found = self.definitions.get(kind).map(|e| (*e.definition).clone());
        if found.is_none() {
            debug!(target: "widget_registry", kind, "Widget kind not found");
        }
        found
    }

    /// All definitions, in registration order
    pub fn get_all_definitions(&self) -> Vec<WidgetDefinition> {
        let mut entries: Vec<RegisteredWidget> =
            self.definitions.iter().map(|e| e.value().clone()).collect();
        entries.sort_by_key(|e| e.slot);
        entries
            .into_iter()
            .map(|e| (*e.definition).clone())
            .collect()
    }

    pub fn has_widget(&self, kind: &str) -> bool {
        self.definitions.contains_key(kind)
    }

    pub fn get_constraints(&self, kind: &str) -> Option<WidgetConstraints> {
        self.definitions
            .get(kind)
            .map(|e| e.definition.constraints.clone())
    }

    pub fn get_config_fields(&self, kind: &str) -> Option<Vec<ConfigField>> {
        self.definitions
            .get(kind)
            .map(|e| e.definition.config_fields.clone())
    }

    /// Registered kinds, in registration order
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<(u64, String)> = self
            .definitions
            .iter()
            .map(|e| (e.slot, e.key().clone()))
            .collect();
        kinds.sort();
        kinds.into_iter().map(|(_, kind)| kind).collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
