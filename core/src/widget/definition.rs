//! Static metadata describing widget kinds.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Width and height in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub w: u32,
    pub h: u32,
}

impl GridSize {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

/// Structural limits of a widget kind.
///
/// The size bounds apply to placement. `min_events`, `min_distinct_days` and
/// `required_metrics` describe how much signal the kind needs before the
/// insight generator will propose it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConstraints {
    pub min_size: GridSize,
    pub max_size: GridSize,
    pub default_size: GridSize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_events: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_distinct_days: Option<u64>,

    /// Summary keys that must be present for this kind to be meaningful
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_metrics: Vec<String>,
}

impl Default for WidgetConstraints {
    fn default() -> Self {
        Self {
            min_size: GridSize::new(2, 2),
            max_size: GridSize::new(12, 8),
            default_size: GridSize::new(4, 3),
            min_events: None,
            min_distinct_days: None,
            required_metrics: Vec::new(),
        }
    }
}

impl WidgetConstraints {
    pub fn sized(min: GridSize, default: GridSize, max: GridSize) -> Self {
        Self {
            min_size: min,
            max_size: max,
            default_size: default,
            ..Self::default()
        }
    }

    pub fn with_min_events(mut self, n: u64) -> Self {
        self.min_events = Some(n);
        self
    }

    pub fn with_min_distinct_days(mut self, n: u64) -> Self {
        self.min_distinct_days = Some(n);
        self
    }

    pub fn requiring(mut self, metric: impl Into<String>) -> Self {
        self.required_metrics.push(metric.into());
        self
    }

    /// Whether a `w` x `h` placement lies within the size bounds
    pub fn allows_size(&self, size: GridSize) -> bool {
        (self.min_size.w..=self.max_size.w).contains(&size.w)
            && (self.min_size.h..=self.max_size.h).contains(&size.h)
    }

    /// Clamp a size into the bounds. Malformed bounds (min > max) resolve to max.
    pub fn clamp_size(&self, size: GridSize) -> GridSize {
        GridSize {
            w: size.w.max(self.min_size.w).min(self.max_size.w),
            h: size.h.max(self.min_size.h).min(self.max_size.h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFieldType {
    Text,
    Number,
    Select,
    Toggle,
}

/// A settings key a user or the insight generator may populate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    pub key: String,
    pub label: String,
    pub field_type: ConfigFieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl ConfigField {
    fn new(key: impl Into<String>, label: impl Into<String>, field_type: ConfigFieldType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            field_type,
            default: None,
            options: Vec::new(),
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ConfigFieldType::Text)
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ConfigFieldType::Number)
    }

    pub fn toggle(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ConfigFieldType::Toggle)
    }

    pub fn select<I, S>(key: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut field = Self::new(key, label, ConfigFieldType::Select);
        field.options = options.into_iter().map(Into::into).collect();
        field
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Metadata for one widget kind, keyed by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDefinition {
    #[serde(rename = "type")]
    pub kind: String,

    pub name: String,

    #[serde(default)]
    pub constraints: WidgetConstraints,

    #[serde(default)]
    pub config_fields: Vec<ConfigField>,
}

impl WidgetDefinition {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            constraints: WidgetConstraints::default(),
            config_fields: Vec::new(),
        }
    }

    pub fn with_constraints(mut self, constraints: WidgetConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_field(mut self, field: ConfigField) -> Self {
        self.config_fields.push(field);
        self
    }

    pub fn field(&self, key: &str) -> Option<&ConfigField> {
        self.config_fields.iter().find(|f| f.key == key)
    }
}
