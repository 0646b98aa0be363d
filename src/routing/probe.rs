//! Directory probing.
//!
//! # Design Decisions
//! - One small metadata syscall per request, before normalization
//! - Probe failures (missing path, permissions) read as "not a
//!   directory" and are never propagated

use std::path::Path;

/// Returns whether `path` names an existing directory.
pub async fn is_directory(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) => meta.is_dir(),
        Err(_) => false,
    }
}
