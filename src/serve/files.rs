//! File-serving collaborator.
//!
//! # Responsibilities
//! - Map a serve pathname onto the client root
//! - Stream located files with content type and length
//! - Enforce the dotfile policy and reject path traversal
//!
//! # Design Decisions
//! - The orchestrator observes a closed set of outcomes, not event
//!   callbacks: NotFound | Found(response) | Failed(io error)
//! - "Found" is the point of no return: later failures are stream
//!   errors, never misses
//! - Denied dotfiles and traversal attempts read as NotFound so they
//!   fall through to SSR like any other miss
//! - A pathname ending in `/` resolves to its index.html

use std::future::Future;
use std::io;
use std::path::Path;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use tokio_util::io::ReaderStream;

/// Dotfile access policy for one lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotfilePolicy {
    /// Dot-prefixed segments may resolve (`/.well-known/` requests).
    Allow,
    /// Dot-prefixed segments read as not found.
    Deny,
}

/// Closed set of outcomes observed by the orchestrator.
#[derive(Debug)]
pub enum ServeOutcome {
    /// No file matched the pathname.
    NotFound,
    /// A real file was located; the response streams its contents.
    Found(Response),
    /// A file was located but reading it failed.
    Failed(io::Error),
}

/// Seam between the orchestrator and the filesystem.
pub trait ServeFiles: Send + Sync {
    /// Look up `pathname` under `root` and stream it if present.
    fn serve(
        &self,
        pathname: &str,
        root: &Path,
        dotfiles: DotfilePolicy,
    ) -> impl Future<Output = ServeOutcome> + Send;
}

/// Streams files from the resolved client directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStreamer;

impl ServeFiles for FileStreamer {
    fn serve(
        &self,
        pathname: &str,
        root: &Path,
        dotfiles: DotfilePolicy,
    ) -> impl Future<Output = ServeOutcome> + Send {
        async move {
            if pathname.contains('\0') || pathname.split('/').any(|seg| seg == "..") {
                return ServeOutcome::NotFound;
            }
            if dotfiles == DotfilePolicy::Deny
                && pathname.split('/').any(|seg| seg.starts_with('.'))
            {
                return ServeOutcome::NotFound;
            }

            let mut target = root.join(pathname.trim_start_matches('/'));
            if pathname.ends_with('/') {
                target.push("index.html");
            }

            let meta = match tokio::fs::metadata(&target).await {
                Ok(meta) if meta.is_file() => meta,
                _ => return ServeOutcome::NotFound,
            };

            // The file exists: from here on, failures are stream errors.
            let file = match tokio::fs::File::open(&target).await {
                Ok(file) => file,
                Err(err) => return ServeOutcome::Failed(err),
            };

            let mime = mime_guess::from_path(&target).first_or_octet_stream();
            let response = Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .header(header::CONTENT_LENGTH, meta.len())
                .body(Body::from_stream(ReaderStream::new(file)));
            match response {
                Ok(response) => ServeOutcome::Found(response),
                Err(err) => ServeOutcome::Failed(io::Error::other(err)),
            }
        }
    }
}
