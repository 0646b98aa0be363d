//! Client asset directory resolution.
//!
//! # Responsibilities
//! - Parse the client/server location descriptors (file URLs)
//! - Compute the server→client relative path
//! - Anchor it at the on-disk server folder of the running entry
//!
//! # Design Decisions
//! - Resolution happens once, at startup; the result is immutable
//! - Failure to anchor is fatal (deployment misconfiguration)
//! - A resolved directory that is missing is NOT fatal: static lookups
//!   degrade to "not found" and the SSR fallback carries the traffic
//! - The upward walk stops at the nearest ancestor whose name equals
//!   the server folder name. Nested identically-named folders anchor
//!   at the innermost match; known limitation, kept as documented.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use url::Url;

/// Errors raised while anchoring the client directory.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid location descriptor `{descriptor}`: {source}")]
    Descriptor {
        descriptor: String,
        source: url::ParseError,
    },

    #[error("location descriptor `{0}` is not a local file URL")]
    NotFileUrl(String),

    #[error("server descriptor `{0}` has no folder name")]
    NoServerFolder(String),

    #[error("no ancestor of `{entry}` is named `{folder}`")]
    ServerFolderNotFound { entry: PathBuf, folder: String },

    #[error("cannot locate the running server entry: {0}")]
    Entry(#[from] std::io::Error),
}

/// Resolve the absolute client asset root.
///
/// `client` and `server` are the build-output location descriptors;
/// `entry` is the on-disk path of the running server entry. The walk
/// climbs from the entry's directory until it hits the server folder,
/// then applies the server→client relative path there.
pub fn resolve_client_dir(client: &str, server: &str, entry: &Path) -> Result<PathBuf, ResolveError> {
    let client_path = file_url_path(client)?;
    let server_path = file_url_path(server)?;

    let rel = relative_path(&server_path, &client_path);
    let folder = server_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ResolveError::NoServerFolder(server.to_string()))?;

    let mut dir = entry.parent().unwrap_or(entry).to_path_buf();
    loop {
        let matched = dir
            .file_name()
            .map(|name| name.to_string_lossy() == folder.as_str())
            .unwrap_or(false);
        if matched {
            break;
        }
        if !dir.pop() {
            return Err(ResolveError::ServerFolderNotFound {
                entry: entry.to_path_buf(),
                folder,
            });
        }
    }

    let resolved = normalize_lexically(&dir.join(&rel));
    if !resolved.is_dir() {
        tracing::warn!(
            client_dir = %resolved.display(),
            "client directory does not exist; static lookups will fall through to SSR"
        );
    }
    Ok(resolved)
}

fn file_url_path(descriptor: &str) -> Result<PathBuf, ResolveError> {
    let url = Url::parse(descriptor).map_err(|source| ResolveError::Descriptor {
        descriptor: descriptor.to_string(),
        source,
    })?;
    url.to_file_path()
        .map_err(|()| ResolveError::NotFileUrl(descriptor.to_string()))
}

/// Lexical relative path from `from` to `to`.
fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for component in &to[common..] {
        rel.push(component.as_os_str());
    }
    rel
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
