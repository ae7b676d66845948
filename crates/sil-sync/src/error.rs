//! Sync error types.

use std::path::PathBuf;

/// Error returned by the sync tool.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Manifest file does not exist.
    #[error("Content manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),
    /// Manifest is not valid YAML or has the wrong shape.
    #[error("Invalid content manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),
    /// Upstream docs directory does not exist.
    #[error("Upstream docs directory not found: {}", .0.display())]
    UpstreamNotFound(PathBuf),
    /// Directory entry pattern is not a valid glob.
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// Filesystem operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
