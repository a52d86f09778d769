//! Tracing setup
//!
//! Human-readable lines on stderr, filtered by `RUST_LOG` when it is set and
//! by `DEFAULT_FILTER` otherwise.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "borderless_host=info";

/// Filter from an explicit directive string, falling back to the default
pub fn filter_from(spec: Option<&str>) -> EnvFilter {
    spec.and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber; a second call is a no-op
pub fn init_logging() {
    let spec = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter_from(spec.as_deref()))
        .try_init()
        .ok();
}
