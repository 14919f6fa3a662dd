// Beacon Core Library
// Widget composition and event insight engine for analytics dashboards

pub mod analysis;
pub mod config;
pub mod effects;
pub mod event;
pub mod insights;
pub mod telemetry;
pub mod widget;

// Export core types
pub use analysis::{analyze_patterns, PatternAnalyzer, PatternSummary};
pub use config::{AnalysisConfig, EngineConfig, InsightConfig};
pub use effects::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidGenerator};
pub use event::EventRecord;
pub use insights::{InsightGenerator, InsightProposal, InsightReport, InsightTemplate};
pub use widget::{
    ConfigField, ConfigFieldType, GridSize, Settings, WidgetConstraints, WidgetDefinition,
    WidgetFactory, WidgetInstance, WidgetLayout, WidgetRegistry,
};

use std::sync::Arc;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeaconError {
    #[error("Unknown widget kind: {0}")]
    UnknownWidget(String),

    #[error("Widget kind already registered: {0}")]
    DuplicateWidget(String),

    #[error("Invalid layout for widget kind {kind}: {reason}")]
    InvalidLayout { kind: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}
pub type Result<T> = std::result::Result<T, BeaconError>;

/// Engine facade wiring the registry, factory, analyzer and insight generator
pub struct Engine {
    pub config: EngineConfig,
    pub registry: Arc<WidgetRegistry>,
    pub factory: Arc<WidgetFactory>,
    pub analyzer: PatternAnalyzer,
    pub insights: InsightGenerator,
}

impl Engine {
    /// Build an engine backed by the system clock and UUID v4 identifiers
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_effects(config, Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// Build an engine with caller-supplied time and identity capabilities
    pub fn with_effects(
        config: EngineConfig,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self> {
        tracing::info!("Bootstrapping Beacon engine...");

        let registry = Arc::new(WidgetRegistry::new());
        let registered = widget::kinds::bootstrap(
            &registry,
            widget::kinds::builtin_definitions(),
            config.strict_registration,
        )?;

        let factory = Arc::new(WidgetFactory::with_effects(clock, ids));
        let analyzer = PatternAnalyzer::new(config.analysis.clone());
        let insights = InsightGenerator::new(
            Arc::clone(&registry),
            Arc::clone(&factory),
            analyzer.clone(),
            config.insights.clone(),
        );

        tracing::info!(widget_kinds = registered, "Beacon engine ready");

        Ok(Self {
            config,
            registry,
            factory,
            analyzer,
            insights,
        })
    }

    /// Compute the pattern summary for a batch of events
    pub fn analyze(&self, events: &[EventRecord]) -> PatternSummary {
        self.analyzer.analyze(events)
    }

    /// Propose insight widgets for a batch of events
    pub fn generate_insights(&self, events: &[EventRecord]) -> Vec<WidgetInstance> {
        self.insights.generate(events)
    }

    /// Create a widget manually, without registry validation
    pub fn create_widget(
        &self,
        kind: impl Into<String>,
        title: impl Into<String>,
        layout: WidgetLayout,
        settings: Option<Settings>,
    ) -> WidgetInstance {
        self.factory.create_widget(kind, title, layout, settings)
    }

    /// Validate a placement against the registry, then create the widget
    pub fn create_validated_widget(
        &self,
        kind: &str,
        title: impl Into<String>,
        layout: WidgetLayout,
        settings: Option<Settings>,
    ) -> Result<WidgetInstance> {
        WidgetFactory::validate(&self.registry, kind, &layout)?;
        Ok(self.factory.create_widget(kind, title, layout, settings))
    }
}
