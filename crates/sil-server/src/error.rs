//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use sil_content::ContentError;

use crate::template;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No visible document, page or file for the request.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Content exists but could not be loaded.
    #[error("Content error: {0}")]
    Content(ContentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ContentError> for ServerError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NotFound { slug } => Self::NotFound(slug),
            other => Self::Content(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(what) => {
                tracing::debug!(what = %what, "Not found");
                StatusCode::NOT_FOUND
            }
            Self::Content(_) | Self::Io(_) => {
                tracing::error!(error = %self, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Html(template::error_page(status))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_not_found_from_content_error() {
        let err = ServerError::from(ContentError::NotFound {
            slug: "missing".to_owned(),
        });
        assert!(matches!(&err, ServerError::NotFound(slug) if slug == "missing"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_integrity_error_is_internal() {
        let err = ServerError::from(ContentError::DataIntegrity {
            path: PathBuf::from("docs/canonical/BROKEN.md"),
            reason: "empty content".to_owned(),
        });
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
