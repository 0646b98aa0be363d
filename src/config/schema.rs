//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gate. All types derive Serde traits for deserialization from config
//! files, and every section carries usable defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::TrailingSlash;

/// Root configuration for the static gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Site behavior: trailing slash, hashed assets, base path.
    pub site: SiteConfig,

    /// Upstream SSR application server.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Site-level routing and serving behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Trailing-slash canonicalization policy.
    pub trailing_slash: TrailingSlash,

    /// Directory name under which content-hashed build assets live.
    pub assets_dir: String,

    /// Mount point of the application ("/" when mounted at the root).
    pub base_path: String,

    /// Path prefix of app-internal action routes, after base stripping.
    /// POSTs under it are exempt from forced trailing slashes.
    pub actions_prefix: String,

    /// Location descriptors used to resolve the client directory.
    pub location: LocationConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            trailing_slash: TrailingSlash::default(),
            assets_dir: "_assets".to_string(),
            base_path: "/".to_string(),
            actions_prefix: "/_actions".to_string(),
            location: LocationConfig::default(),
        }
    }
}

/// Build-output location descriptors.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Client asset build output (file URL).
    pub client: String,

    /// Server build output (file URL); its folder name anchors the
    /// client directory resolution.
    pub server: String,

    /// On-disk path of the running server entry. Defaults to the
    /// current executable.
    pub entry: Option<PathBuf>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            client: "file:///srv/site/dist/client/".to_string(),
            server: "file:///srv/site/dist/server/".to_string(),
            entry: None,
        }
    }
}

/// Upstream SSR server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// SSR server authority (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
