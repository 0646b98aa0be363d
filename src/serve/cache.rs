//! Cache policy for content-hashed build assets.
//!
//! # Design Decisions
//! - Filenames under the hashed-assets directory encode a content
//!   digest, so they are cacheable for a year and immutable
//! - No other pathname receives the override

use axum::http::{header, HeaderMap, HeaderValue};

/// `Cache-Control` value applied to hashed build output.
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Decides which served pathnames get the immutable cache header.
#[derive(Debug, Clone)]
pub struct AssetCachePolicy {
    prefix: String,
}

impl AssetCachePolicy {
    /// Build the policy from the configured assets directory name.
    pub fn new(assets_dir: &str) -> Self {
        Self {
            prefix: format!("/{}/", assets_dir.trim_matches('/')),
        }
    }

    /// Whether the served pathname falls under the hashed-assets prefix.
    pub fn applies_to(&self, pathname: &str) -> bool {
        pathname.starts_with(&self.prefix)
    }

    /// Force the immutable cache header, just before headers are sent.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(IMMUTABLE_CACHE_CONTROL),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_under_the_assets_prefix() {
        let policy = AssetCachePolicy::new("_assets");
        assert!(policy.applies_to("/_assets/app.3f9c.js"));
        assert!(policy.applies_to("/_assets/chunks/vendor.a1b2.css"));
        assert!(!policy.applies_to("/index.html"));
        assert!(!policy.applies_to("/_assets")); // the directory itself
        assert!(!policy.applies_to("/_assets-other/app.js"));
    }

    #[test]
    fn trims_configured_slashes() {
        let policy = AssetCachePolicy::new("/_assets/");
        assert!(policy.applies_to("/_assets/app.3f9c.js"));
    }

    #[test]
    fn sets_the_immutable_header() {
        let policy = AssetCachePolicy::new("_assets");
        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        policy.apply(&mut headers);
        assert_eq!(headers[header::CACHE_CONTROL], IMMUTABLE_CACHE_CONTROL);
    }
}
