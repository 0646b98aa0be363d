//! Static orchestration.
//!
//! # Responsibilities
//! - Probe the request target and run the trailing-slash normalizer
//! - Issue canonicalization redirects
//! - Delegate file streaming and arbitrate the SSR fallback
//! - Apply the hashed-asset cache policy
//!
//! # Design Decisions
//! - Never panics; every request produces exactly one response
//! - The fallback is FnOnce: at most one invocation is a type-level fact
//! - A Redirect decision short-circuits: no file lookup, no fallback
//! - An error after a file was found is a 500, never a fallback

use std::future::Future;
use std::path::PathBuf;

use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::config::SiteConfig;
use crate::routing::{self, looks_like_subresource, PathFacts, RoutingDecision};
use crate::serve::cache::AssetCachePolicy;
use crate::serve::files::{DotfilePolicy, ServeFiles, ServeOutcome};

/// Request orchestrator for the static side of the gate.
///
/// Holds only immutable state; one instance is shared read-only across
/// all in-flight requests.
pub struct StaticHandler<F> {
    site: SiteConfig,
    client_dir: PathBuf,
    cache: AssetCachePolicy,
    files: F,
}

impl<F: ServeFiles> StaticHandler<F> {
    /// Create a handler over a resolved client directory.
    pub fn new(site: SiteConfig, client_dir: PathBuf, files: F) -> Self {
        let cache = AssetCachePolicy::new(&site.assets_dir);
        Self {
            site,
            client_dir,
            cache,
            files,
        }
    }

    /// The resolved client asset root.
    pub fn client_dir(&self) -> &PathBuf {
        &self.client_dir
    }

    /// Decide one request: redirect, stream a static file, or hand off
    /// to the SSR fallback.
    pub async fn handle<Fb, Fut>(&self, method: &Method, uri: &Uri, fallback: Fb) -> Response
    where
        Fb: FnOnce() -> Fut,
        Fut: Future<Output = Response>,
    {
        let path = uri.path();
        if path.is_empty() {
            // Degenerate request form with no usable path.
            return fallback().await;
        }
        let query = uri.query();

        let rel = self.strip_base(path);
        let probe_target = self.client_dir.join(rel.trim_start_matches('/'));
        let is_directory = routing::probe::is_directory(&probe_target).await;

        let facts = PathFacts {
            path,
            query,
            is_directory,
            subresource: looks_like_subresource(path),
            action_post: *method == Method::POST && rel.starts_with(&self.site.actions_prefix),
        };

        match self.site.trailing_slash.decide(&facts) {
            RoutingDecision::Redirect { location } => {
                tracing::debug!(path, location = %location, "canonicalization redirect");
                redirect(&location)
            }
            RoutingDecision::Serve { pathname } => {
                let pathname = self.strip_base(&pathname);
                let dotfiles = if pathname.starts_with("/.well-known/") {
                    DotfilePolicy::Allow
                } else {
                    DotfilePolicy::Deny
                };
                match self.files.serve(&pathname, &self.client_dir, dotfiles).await {
                    ServeOutcome::NotFound => {
                        tracing::debug!(path = %pathname, "no static file; falling back to SSR");
                        fallback().await
                    }
                    ServeOutcome::Found(mut response) => {
                        if self.cache.applies_to(&pathname) {
                            self.cache.apply(response.headers_mut());
                        }
                        response
                    }
                    ServeOutcome::Failed(err) => {
                        tracing::error!(path = %pathname, error = %err, "static file stream failed");
                        internal_error()
                    }
                }
            }
        }
    }

    /// Strip the application's base mount point. Idempotent, accepts
    /// already-relative input, and always yields a leading slash.
    fn strip_base(&self, path: &str) -> String {
        let base = self.site.base_path.trim_end_matches('/');
        let rest = match path.strip_prefix(base) {
            Some(rest) if base.is_empty() || rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        };
        if rest.starts_with('/') {
            rest.to_string()
        } else {
            format!("/{rest}")
        }
    }
}

fn redirect(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => {
            let mut response = StatusCode::MOVED_PERMANENTLY.into_response();
            response.headers_mut().insert(header::LOCATION, value);
            response
        }
        // A location that cannot be carried in a header is unanswerable.
        Err(_) => internal_error(),
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::TrailingSlash;

    use std::future::{ready, Future};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use axum::body::Body;

    #[derive(Debug, Clone, Copy)]
    enum MockBehavior {
        NotFound,
        Found,
        Failed,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Lookup {
        pathname: String,
        dotfiles: DotfilePolicy,
    }

    struct MockFiles {
        behavior: MockBehavior,
        lookups: Mutex<Vec<Lookup>>,
    }

    impl MockFiles {
        fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                lookups: Mutex::new(Vec::new()),
            }
        }
    }

    impl ServeFiles for MockFiles {
        fn serve(
            &self,
            pathname: &str,
            _root: &Path,
            dotfiles: DotfilePolicy,
        ) -> impl Future<Output = ServeOutcome> + Send {
            self.lookups.lock().unwrap().push(Lookup {
                pathname: pathname.to_string(),
                dotfiles,
            });
            ready(match self.behavior {
                MockBehavior::NotFound => ServeOutcome::NotFound,
                MockBehavior::Found => ServeOutcome::Found(Response::new(Body::from("file"))),
                MockBehavior::Failed => {
                    ServeOutcome::Failed(std::io::Error::other("disk error"))
                }
            })
        }
    }

    fn site(policy: TrailingSlash) -> SiteConfig {
        SiteConfig {
            trailing_slash: policy,
            ..SiteConfig::default()
        }
    }

    fn handler(policy: TrailingSlash, behavior: MockBehavior) -> StaticHandler<MockFiles> {
        StaticHandler::new(
            site(policy),
            PathBuf::from("/nonexistent-client-root"),
            MockFiles::new(behavior),
        )
    }

    fn ssr_response() -> Response {
        Response::new(Body::from("ssr"))
    }

    #[tokio::test]
    async fn miss_invokes_fallback_exactly_once() {
        let handler = handler(TrailingSlash::Ignore, MockBehavior::NotFound);
        let calls = AtomicUsize::new(0);

        let response = handler
            .handle(&Method::GET, &Uri::from_static("/missing.png"), || {
                calls.fetch_add(1, Ordering::SeqCst);
                ready(ssr_response())
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_ne!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(handler.files.lookups.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failure_after_found_is_500_without_fallback() {
        let handler = handler(TrailingSlash::Ignore, MockBehavior::Failed);
        let calls = AtomicUsize::new(0);

        let response = handler
            .handle(&Method::GET, &Uri::from_static("/broken.bin"), || {
                calls.fetch_add(1, Ordering::SeqCst);
                ready(ssr_response())
            })
            .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn redirect_skips_the_file_server_and_fallback() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("about")).unwrap();
        let handler = StaticHandler::new(
            site(TrailingSlash::Never),
            root.path().to_path_buf(),
            MockFiles::new(MockBehavior::Found),
        );
        let calls = AtomicUsize::new(0);

        let response = handler
            .handle(&Method::GET, &Uri::from_static("/about/?x=1"), || {
                calls.fetch_add(1, Ordering::SeqCst);
                ready(ssr_response())
            })
            .await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "/about?x=1");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(handler.files.lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn directory_request_serves_its_index() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("about")).unwrap();
        let handler = StaticHandler::new(
            site(TrailingSlash::Ignore),
            root.path().to_path_buf(),
            MockFiles::new(MockBehavior::Found),
        );

        handler
            .handle(&Method::GET, &Uri::from_static("/about"), || {
                ready(ssr_response())
            })
            .await;

        let lookups = handler.files.lookups.lock().unwrap();
        assert_eq!(lookups[0].pathname, "/about/index.html");
    }

    #[tokio::test]
    async fn hashed_assets_get_the_immutable_header() {
        let handler = handler(TrailingSlash::Ignore, MockBehavior::Found);

        let response = handler
            .handle(
                &Method::GET,
                &Uri::from_static("/_assets/app.3f9c.js"),
                || ready(ssr_response()),
            )
            .await;
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=31536000, immutable"
        );

        let response = handler
            .handle(&Method::GET, &Uri::from_static("/index.html"), || {
                ready(ssr_response())
            })
            .await;
        assert!(!response.headers().contains_key(header::CACHE_CONTROL));
    }

    #[tokio::test]
    async fn well_known_requests_may_resolve_dotfiles() {
        let handler = handler(TrailingSlash::Ignore, MockBehavior::Found);

        handler
            .handle(
                &Method::GET,
                &Uri::from_static("/.well-known/security.txt"),
                || ready(ssr_response()),
            )
            .await;
        handler
            .handle(&Method::GET, &Uri::from_static("/.hidden/file"), || {
                ready(ssr_response())
            })
            .await;

        let lookups = handler.files.lookups.lock().unwrap();
        assert_eq!(lookups[0].dotfiles, DotfilePolicy::Allow);
        assert_eq!(lookups[1].dotfiles, DotfilePolicy::Deny);
    }

    #[tokio::test]
    async fn base_mount_point_is_stripped_for_lookups() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("about")).unwrap();
        let mut site = site(TrailingSlash::Ignore);
        site.base_path = "/app".to_string();
        let handler = StaticHandler::new(
            site,
            root.path().to_path_buf(),
            MockFiles::new(MockBehavior::Found),
        );

        handler
            .handle(&Method::GET, &Uri::from_static("/app/about"), || {
                ready(ssr_response())
            })
            .await;

        let lookups = handler.files.lookups.lock().unwrap();
        assert_eq!(lookups[0].pathname, "/about/index.html");
    }

    #[tokio::test]
    async fn always_policy_redirects_routes_only() {
        let handler = handler(TrailingSlash::Always, MockBehavior::Found);

        let response = handler
            .handle(&Method::GET, &Uri::from_static("/about?x=1"), || {
                ready(ssr_response())
            })
            .await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "/about/?x=1");

        let response = handler
            .handle(&Method::GET, &Uri::from_static("/app.css"), || {
                ready(ssr_response())
            })
            .await;
        assert_ne!(response.status(), StatusCode::MOVED_PERMANENTLY);

        let response = handler
            .handle(&Method::POST, &Uri::from_static("/_actions/login"), || {
                ready(ssr_response())
            })
            .await;
        assert_ne!(response.status(), StatusCode::MOVED_PERMANENTLY);
    }

    #[test]
    fn strip_base_is_idempotent_and_rooted() {
        let mut site = site(TrailingSlash::Ignore);
        site.base_path = "/app".to_string();
        let handler = StaticHandler::new(
            site,
            PathBuf::from("/client"),
            MockFiles::new(MockBehavior::NotFound),
        );

        assert_eq!(handler.strip_base("/app/about"), "/about");
        assert_eq!(handler.strip_base("/about"), "/about");
        assert_eq!(handler.strip_base("about"), "/about");
        assert_eq!(handler.strip_base("/app"), "/");
        // A path that merely shares the base as a string prefix.
        assert_eq!(handler.strip_base("/application"), "/application");
    }
}
