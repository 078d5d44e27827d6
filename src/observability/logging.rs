//! Structured logging via the tracing subscriber stack.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level is applied to
/// this crate and tower-http stays at info. Safe to call more than once;
/// later calls are ignored.
pub fn init(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("rss_edge={default_level},tower_http=info").into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
