//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, prefixes, and location descriptors
//! - Check value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;
use thiserror::Error;
use url::Url;

use crate::config::schema::GateConfig;

/// A single semantic configuration error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid {field} `{value}`")]
    Address { field: &'static str, value: String },

    #[error("{field} must start with '/': `{value}`")]
    MissingLeadingSlash { field: &'static str, value: String },

    #[error("site.assets_dir must be a bare directory name: `{0}`")]
    AssetsDir(String),

    #[error("{field} is not a file URL: `{value}`")]
    Location { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    // The upstream may be a hostname, so a full socket address is not
    // required; an HTTP authority is.
    if Authority::from_str(&config.upstream.address).is_err() {
        errors.push(ValidationError::Address {
            field: "upstream.address",
            value: config.upstream.address.clone(),
        });
    }

    for (field, value) in [
        ("site.base_path", &config.site.base_path),
        ("site.actions_prefix", &config.site.actions_prefix),
    ] {
        if !value.starts_with('/') {
            errors.push(ValidationError::MissingLeadingSlash {
                field,
                value: value.clone(),
            });
        }
    }

    let assets = &config.site.assets_dir;
    if assets.is_empty() || assets.trim_matches('/').contains('/') {
        errors.push(ValidationError::AssetsDir(assets.clone()));
    }

    for (field, value) in [
        ("site.location.client", &config.site.location.client),
        ("site.location.server", &config.site.location.server),
    ] {
        let is_file_url = Url::parse(value)
            .map(|url| url.scheme() == "file")
            .unwrap_or(false);
        if !is_file_url {
            errors.push(ValidationError::Location {
                field,
                value: value.clone(),
            });
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::Address {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
