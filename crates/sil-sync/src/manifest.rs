//! Content manifest: the allow-list of publishable upstream paths.
//!
//! ```yaml
//! files:
//!   - path: docs/canonical/
//!     visibility: public
//!     pattern: "*.md"
//!   - path: docs/internal/ROADMAP.md
//!     visibility: internal
//! stats:
//!   public_files: 42
//!   internal_files: 7
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::SyncError;

/// Leading path component stripped from manifest paths.
const DOCS_PREFIX: &str = "docs/";

fn default_pattern() -> String {
    "*.md".to_owned()
}

/// Publication status of a manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Internal,
    #[serde(other)]
    Unknown,
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
    #[serde(default)]
    pub path: String,
    pub visibility: Option<Visibility>,
    /// File pattern for directory entries.
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub under_review: bool,
    #[serde(default)]
    pub flagged_for_removal: bool,
}

impl ManifestEntry {
    /// Whether the entry names a directory.
    pub fn is_dir(&self) -> bool {
        self.path.ends_with('/')
    }

    /// Path relative to the docs roots on both sides.
    pub fn relative_path(&self) -> &str {
        let path = self.path.strip_prefix(DOCS_PREFIX).unwrap_or(&self.path);
        path.trim_end_matches('/')
    }
}

/// Expected file counts recorded in the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ManifestStats {
    pub public_files: usize,
    pub internal_files: usize,
}

/// Parsed content manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub files: Vec<ManifestEntry>,
    #[serde(default)]
    pub stats: ManifestStats,
}

impl Manifest {
    /// Load a manifest file.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        if !path.is_file() {
            return Err(SyncError::ManifestNotFound(path.to_path_buf()));
        }
        let yaml = std::fs::read_to_string(path).map_err(|source| SyncError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, SyncError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Entries to publish. Entries flagged for removal or without a path
    /// are left out.
    pub fn public(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.active(Visibility::Public)
    }

    /// Entries that must never appear on the website.
    pub fn internal(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.active(Visibility::Internal)
    }

    fn active(&self, visibility: Visibility) -> impl Iterator<Item = &ManifestEntry> {
        self.files.iter().filter(move |entry| {
            !entry.path.is_empty() && !entry.flagged_for_removal && entry.visibility == Some(visibility)
        })
    }
}
