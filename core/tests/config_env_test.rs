//! Environment-driven configuration.
//!
//! Kept to a single test so no other test in this binary races on the
//! process environment.

use std::io::Write;

use beacon_core::EngineConfig;

#[test]
fn env_then_toml_layering() {
    std::env::set_var("BEACON_MIN_EVENTS", "5");
    std::env::set_var("BEACON_GRID_COLUMNS", "0");
    std::env::set_var("BEACON_DOMINANCE_THRESHOLD", "not-a-number");
    std::env::set_var("BEACON_STRICT_REGISTRATION", "true");

    let cfg = EngineConfig::from_env();
    assert_eq!(cfg.insights.min_events, 5);
    // Zero columns is clamped, unparseable values fall back to defaults
    assert_eq!(cfg.insights.grid_columns, 1);
    assert_eq!(cfg.analysis.dominance_threshold, 0.5);
    assert!(cfg.strict_registration);

    let dir = std::env::temp_dir().join(format!("beacon-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("beacon.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[insights]\ngrid_columns = 24\nmax_widgets = 6").unwrap();

    std::env::set_var("BEACON_CONFIG", &path);
    let loaded = EngineConfig::load();
    assert_eq!(loaded.insights.min_events, 5);
    assert_eq!(loaded.insights.grid_columns, 24);
    assert_eq!(loaded.insights.max_widgets, 6);

    std::env::set_var("BEACON_CONFIG", dir.join("missing.toml"));
    assert_eq!(EngineConfig::load(), EngineConfig::from_env());

    std::fs::remove_dir_all(&dir).unwrap();
}
