//! Trailing-slash canonicalization.
//!
//! # Responsibilities
//! - Decide redirect vs. serve target for each request path
//! - Rewrite directory requests to their index.html
//! - Exempt subresources and action POSTs from forced slashes
//!
//! # Design Decisions
//! - Pure function of request facts: same input, same decision
//! - Exactly one decision per request, never both
//! - `never` composes with `ignore` instead of falling through
//! - No regex in the hot path (byte scan for the extension heuristic)
//! - Query strings are re-attached verbatim, never re-encoded

use serde::{Deserialize, Serialize};

/// Trailing-slash policy for incoming request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// Strip the trailing slash from directory requests (301).
    Never,
    /// Serve paths as-is; directory requests map to their index.html.
    #[default]
    Ignore,
    /// Force a trailing slash on route-like paths (301).
    Always,
}

/// Per-request facts the normalizer decides on.
#[derive(Debug, Clone, Copy)]
pub struct PathFacts<'a> {
    /// Raw URL path as received.
    pub path: &'a str,
    /// Raw query string without the leading `?`, if any.
    pub query: Option<&'a str>,
    /// Whether the path names an existing directory under the client root.
    pub is_directory: bool,
    /// Whether the path looks like a file rather than a route.
    pub subresource: bool,
    /// Whether this is an exempted action-style POST.
    pub action_post: bool,
}

/// Outcome of path normalization. Exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Redirect to the canonical location with status 301.
    Redirect { location: String },
    /// Serve this pathname from the client directory.
    Serve { pathname: String },
}

impl TrailingSlash {
    /// Produce the routing decision for one request.
    pub fn decide(self, facts: &PathFacts<'_>) -> RoutingDecision {
        match self {
            TrailingSlash::Never => decide_never(facts),
            TrailingSlash::Ignore => decide_ignore(facts),
            TrailingSlash::Always => decide_always(facts),
        }
    }
}

/// `never`: directory requests lose their trailing slash. The root path
/// is exempt. Non-redirecting requests share `ignore`'s serve targets.
fn decide_never(facts: &PathFacts<'_>) -> RoutingDecision {
    if facts.is_directory && facts.path != "/" {
        if let Some(stripped) = facts.path.strip_suffix('/') {
            return RoutingDecision::Redirect {
                location: with_query(stripped, facts.query),
            };
        }
    }
    decide_ignore(facts)
}

/// `ignore`: never redirects. A directory request without a trailing
/// slash serves that directory's index.html.
fn decide_ignore(facts: &PathFacts<'_>) -> RoutingDecision {
    if facts.is_directory && !facts.path.ends_with('/') {
        return RoutingDecision::Serve {
            pathname: format!("{}/index.html", facts.path),
        };
    }
    RoutingDecision::Serve {
        pathname: facts.path.to_string(),
    }
}

/// `always`: route-like paths gain a trailing slash. Subresources and
/// action POSTs are exempt.
fn decide_always(facts: &PathFacts<'_>) -> RoutingDecision {
    if !facts.path.ends_with('/') && !facts.subresource && !facts.action_post {
        return RoutingDecision::Redirect {
            location: with_query(&format!("{}/", facts.path), facts.query),
        };
    }
    RoutingDecision::Serve {
        pathname: facts.path.to_string(),
    }
}

/// Re-attach the raw query string with a literal `?`.
fn with_query(location: &str, query: Option<&str>) -> String {
    match query {
        Some(q) => format!("{location}?{q}"),
        None => location.to_string(),
    }
}

/// Heuristic for "this is a file, not a route": the last path segment
/// ends in a dot followed by a lowercase alphabetic extension.
pub fn looks_like_subresource(path: &str) -> bool {
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rsplit_once('.') {
        Some((_, ext)) => !ext.is_empty() && ext.bytes().all(|b| b.is_ascii_lowercase()),
        None => false,
    }
}
