//! Content error types.

use std::path::PathBuf;

use crate::frontmatter::FrontmatterError;

/// Error returned by document loading.
///
/// `NotFound` covers an unknown slug, a file missing from disk and a
/// private document requested without private access. Callers cannot
/// tell these apart.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No visible document for the slug.
    #[error("Document not found: {slug}")]
    NotFound { slug: String },
    /// Source content fails basic field validation.
    #[error("Invalid document {}: {reason}", path.display())]
    DataIntegrity { path: PathBuf, reason: String },
    /// Frontmatter block could not be parsed.
    #[error("Invalid frontmatter in {}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
    /// Source file could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub(crate) fn not_found(slug: &str) -> Self {
        Self::NotFound {
            slug: slug.to_owned(),
        }
    }

    /// Whether this error should surface as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
