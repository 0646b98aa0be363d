//! HTTP protocol surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware layers)
//!     → serve::handler (redirect / static / fallback arbitration)
//!     → forward_to_ssr (upstream SSR server) when no file matches
//!     → Send to client
//! ```

pub mod server;

pub use server::HttpServer;
