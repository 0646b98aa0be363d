//! Request routing decisions.
//!
//! # Data Flow
//! ```text
//! Incoming request (path, query, method)
//!     → probe.rs (does the target name a directory?)
//!     → normalizer.rs (trailing-slash policy state machine)
//!     → Return: Redirect(location) or Serve(pathname)
//! ```
//!
//! # Design Decisions
//! - Normalization is pure; the only filesystem input is the probe bit
//! - Probe failures read as "not a directory", never as errors
//! - A Redirect decision stops the request: no file lookup, no fallback
//! - Deterministic: same input always yields the same decision

pub mod normalizer;
pub mod probe;

pub use normalizer::{looks_like_subresource, PathFacts, RoutingDecision, TrailingSlash};
