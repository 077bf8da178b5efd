//! Telemetry initialization: structured logging via `tracing`.
//!
//! The filter is taken from `RUST_LOG` when set; otherwise handlers and
//! repositories log at `info` with sqlx statement noise capped at `warn`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Call once at startup, before anything logs.
pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
