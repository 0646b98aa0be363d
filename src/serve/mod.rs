//! Static serving subsystem.
//!
//! # Data Flow
//! ```text
//! RoutingDecision::Serve(pathname)
//!     → handler.rs (base stripping, dotfile policy, fallback arbitration)
//!     → files.rs (filesystem lookup, streaming)
//!     → cache.rs (immutable header for hashed assets)
//! ```
//!
//! # Design Decisions
//! - The file collaborator reports a closed set of outcomes; the
//!   orchestrator owns the at-most-one-fallback invariant
//! - "File found" is the point of no return: later errors are 500s

pub mod cache;
pub mod files;
pub mod handler;

pub use files::{DotfilePolicy, FileStreamer, ServeFiles, ServeOutcome};
pub use handler::StaticHandler;
