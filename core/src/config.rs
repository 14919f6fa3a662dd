// Engine configuration
//
// Layering: built-in defaults, then BEACON_* environment variables, then an
// optional TOML file (BEACON_CONFIG, default ./beacon.toml).

use crate::{BeaconError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Insight generator policy
#[derive(Clone, Debug, PartialEq)]
pub struct InsightConfig {
    /// Fewer events than this produce no insight widgets
    pub min_events: usize,
    /// Upper bound on widgets proposed per call
    pub max_widgets: usize,
    /// Width of the dashboard grid in columns
    pub grid_columns: u32,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            min_events: 2,
            max_widgets: 4,
            grid_columns: 12,
        }
    }
}

/// Pattern analyzer tuning
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Minimum share of typed events for a type to count as dominant
    pub dominance_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dominance_threshold: 0.5,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineConfig {
    pub insights: InsightConfig,
    pub analysis: AnalysisConfig,
    /// Reject duplicate widget kinds at bootstrap instead of replacing them
    pub strict_registration: bool,
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| v.trim().parse().ok())
}

impl EngineConfig {
    /// Defaults with BEACON_* environment overrides
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = env_parse("BEACON_MIN_EVENTS") {
            cfg.insights.min_events = v;
        }
        if let Some(v) = env_parse("BEACON_MAX_INSIGHT_WIDGETS") {
            cfg.insights.max_widgets = v;
        }
        if let Some(v) = env_parse("BEACON_GRID_COLUMNS") {
            cfg.insights.grid_columns = v;
        }
        if let Some(v) = env_parse("BEACON_DOMINANCE_THRESHOLD") {
            cfg.analysis.dominance_threshold = v;
        }
        if let Some(v) = env_parse("BEACON_STRICT_REGISTRATION") {
            cfg.strict_registration = v;
        }
        cfg.sanitized()
    }

    /// Environment-driven config with an optional TOML overlay.
    ///
    /// A missing or unreadable file falls back to the environment config.
    pub fn load() -> Self {
        let base = Self::from_env();
        let path = std::env::var("BEACON_CONFIG").unwrap_or_else(|_| "beacon.toml".into());
        let p = Path::new(&path);
        if !p.exists() {
            tracing::info!(target: "beacon_config", path = %path, "No TOML config found; using defaults/env");
            return base;
        }
        match Self::load_file(p, base.clone()) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(target: "beacon_config", path = %path, error = %e, "Failed to load TOML; using defaults/env");
                base
            }
        }
    }

    /// Overlay a TOML file onto `base`
    pub fn load_file(path: &Path, base: Self) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text, base)
    }

    /// Overlay TOML text onto `base`
    pub fn from_toml_str(text: &str, base: Self) -> Result<Self> {
        let overlay: EngineToml = toml::from_str(text)?;
        overlay.overlay(base).validated()
    }

    /// Clamp values into their usable ranges
    pub fn sanitized(mut self) -> Self {
        self.insights.max_widgets = self.insights.max_widgets.max(1);
        self.insights.grid_columns = self.insights.grid_columns.max(1);
        let t = self.analysis.dominance_threshold;
        if !(t > 0.0 && t <= 1.0) {
            self.analysis.dominance_threshold = AnalysisConfig::default().dominance_threshold;
        }
        self
    }

    fn validated(self) -> Result<Self> {
        let t = self.analysis.dominance_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(BeaconError::ConfigError(format!(
                "dominance_threshold must be in (0, 1], got {t}"
            )));
        }
        if self.insights.grid_columns == 0 {
            return Err(BeaconError::ConfigError(
                "grid_columns must be at least 1".into(),
            ));
        }
        if self.insights.max_widgets == 0 {
            return Err(BeaconError::ConfigError(
                "max_widgets must be at least 1".into(),
            ));
        }
        Ok(self.sanitized())
    }
}

// =========================
// TOML overlay definitions
// =========================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineToml {
    pub strict_registration: Option<bool>,
    pub insights: Option<InsightToml>,
    pub analysis: Option<AnalysisToml>,
}

impl EngineToml {
    fn overlay(self, mut base: EngineConfig) -> EngineConfig {
        if let Some(v) = self.strict_registration {
            base.strict_registration = v;
        }
        if let Some(i) = self.insights {
            i.apply(&mut base.insights);
        }
        if let Some(a) = self.analysis {
            a.apply(&mut base.analysis);
        }
        base
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InsightToml {
    pub min_events: Option<usize>,
    pub max_widgets: Option<usize>,
    pub grid_columns: Option<u32>,
}

impl InsightToml {
    fn apply(self, i: &mut InsightConfig) {
        if let Some(x) = self.min_events {
            i.min_events = x;
        }
        if let Some(x) = self.max_widgets {
            i.max_widgets = x;
        }
        if let Some(x) = self.grid_columns {
            i.grid_columns = x;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnalysisToml {
    pub dominance_threshold: Option<f64>,
}

impl AnalysisToml {
    fn apply(self, a: &mut AnalysisConfig) {
        if let Some(x) = self.dominance_threshold {
            a.dominance_threshold = x;
        }
    }
}
