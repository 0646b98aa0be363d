//! static-gate: a front server for hybrid static/server-rendered sites.
//!
//! For each incoming request the gate decides one of three things:
//! serve a file from the precompiled client directory, answer with a
//! 301 redirect to the canonical URL (trailing-slash policy), or hand
//! the request to the SSR fallback.
//!
//! # Architecture Overview
//!
//! ```text
//! Client Request
//!     → http/server.rs (axum, middleware layers)
//!     → routing/probe.rs (does the target name a directory?)
//!     → routing/normalizer.rs (redirect vs. serve pathname)
//!     → serve/handler.rs (orchestration)
//!         ├─ 301 Location: canonical URL
//!         ├─ serve/files.rs (stream from the client dir, cache policy)
//!         └─ SSR fallback (upstream application server)
//! ```
//!
//! Options and the resolved client directory are constructed once at
//! startup and shared read-only across all in-flight requests.

// Core subsystems
pub mod config;
pub mod http;
pub mod resolver;
pub mod routing;
pub mod serve;

// Cross-cutting concerns
pub mod observability;

pub use config::GateConfig;
pub use http::HttpServer;
pub use routing::{RoutingDecision, TrailingSlash};
pub use serve::StaticHandler;
