//! Structured logging setup
//!
//! - `RUST_LOG` environment filter, default `steam_history=info`
//! - JSON lines when `RUST_LOG_FORMAT=json`, human-readable otherwise
//! - Always written to stderr so stdout stays clean for command output

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "steam_history=info";

fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the global tracing subscriber.
///
/// Subsequent calls are no-ops.
pub fn init() {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref());

    let is_json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if is_json {
        let _ = subscriber.json().try_init();
    } else {
        let _ = subscriber.try_init();
    }
}
