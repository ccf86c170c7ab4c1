//! Diagnostic logging to stderr, separate from command output.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "MEALJOURNAL_LOG";
pub const LOG_FORMAT_ENV: &str = "MEALJOURNAL_LOG_FORMAT";
const DEFAULT_FILTER: &str = "mealjournal=warn";

/// Install the global subscriber. Filter comes from `MEALJOURNAL_LOG`
/// (falling back to `RUST_LOG`); `MEALJOURNAL_LOG_FORMAT=json` switches to
/// JSON lines. A second call is a no-op.
pub fn init() {
    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let env_filter =
        EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let res = if json {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(env_filter)
            .try_init()
    };

    if res.is_ok() {
        tracing::debug!(%filter, json, "logging initialized");
    }
}
