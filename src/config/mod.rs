//! Configuration subsystem.
//!
//! # Design Decisions
//! - Parsed once at startup, immutable afterwards; shared read-only
//!   across all in-flight requests
//! - Serde handles shape; validation.rs handles semantics
//! - Every section has production-plausible defaults

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    GateConfig, ListenerConfig, LocationConfig, ObservabilityConfig, SiteConfig, TimeoutConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
