pub mod definition;
pub mod factory;
pub mod instance;
pub mod kinds;
pub mod registry;

// Re-export common types
pub use definition::{ConfigField, ConfigFieldType, GridSize, WidgetConstraints, WidgetDefinition};
pub use factory::WidgetFactory;
pub use instance::{Settings, WidgetInstance, WidgetLayout};
pub use registry::WidgetRegistry;
