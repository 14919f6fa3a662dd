// Tracing subscriber setup for hosts embedding the engine
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,beacon_core=info";

/// Install a global fmt subscriber. The filter comes from `RUST_LOG`, falling
/// back to `default_filter` (or [`DEFAULT_FILTER`]).
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_filter: Option<&str>) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.unwrap_or(DEFAULT_FILTER)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Same as [`init_tracing`] but writes to the test harness's captured output
pub fn init_test_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init()
        .is_ok()
}
