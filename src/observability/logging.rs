//! Structured logging.
//!
//! # Design Decisions
//! - tracing with EnvFilter: RUST_LOG wins, config level is the default
//! - Human-readable fmt layer; request IDs flow through tower-http
//! - Not-found traffic logs at debug: it is normal traffic shape

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber. Call once, from main.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
