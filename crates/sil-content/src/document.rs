//! Document model.

use std::path::PathBuf;

use crate::error::ContentError;

/// One renderable content unit.
///
/// Built per load request and never persisted. Use [`Document::validated`]
/// after assembling the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub slug: String,
    /// Markdown body with the frontmatter block removed.
    pub content: String,
    pub category: String,
    pub description: Option<String>,
    pub tier: u8,
    pub order: u32,
    pub private: bool,
    pub tags: Vec<String>,
    pub beth_topics: Vec<String>,
    /// Source file.
    pub path: PathBuf,
}

impl Document {
    /// Check that title, slug and content are non-empty.
    pub fn validated(self) -> Result<Self, ContentError> {
        let missing = if self.title.trim().is_empty() {
            Some("title")
        } else if self.slug.is_empty() {
            Some("slug")
        } else if self.content.trim().is_empty() {
            Some("content")
        } else {
            None
        };

        match missing {
            Some(field) => Err(ContentError::DataIntegrity {
                path: self.path,
                reason: format!("{field} is required"),
            }),
            None => Ok(self),
        }
    }

    /// Number of whitespace-separated words in the body.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Text of the first `# ` heading outside fenced code blocks.
pub fn first_heading(body: &str) -> Option<&str> {
    let mut in_fence = false;
    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(text) = line.strip_prefix("# ") {
            let text = text.trim();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        Document {
            title: "Principles".to_owned(),
            slug: "principles".to_owned(),
            content: "Five principles guide the lab.\n".to_owned(),
            category: "canonical".to_owned(),
            description: None,
            tier: 1,
            order: 4,
            private: false,
            tags: Vec::new(),
            beth_topics: Vec::new(),
            path: PathBuf::from("docs/canonical/SIL_PRINCIPLES.md"),
        }
    }

    #[test]
    fn test_valid_document_passes() {
        let doc = sample().validated().unwrap();
        assert_eq!(doc.word_count(), 5);
    }

    #[test]
    fn test_empty_title_rejected() {
        let doc = Document {
            title: "  ".to_owned(),
            ..sample()
        };
        let err = doc.validated().unwrap_err();
        assert!(matches!(err, ContentError::DataIntegrity { .. }));
        assert!(err.to_string().contains("title is required"));
    }

    #[test]
    fn test_empty_content_rejected() {
        let doc = Document {
            content: "\n\n".to_owned(),
            ..sample()
        };
        let err = doc.validated().unwrap_err();
        assert!(err.to_string().contains("content is required"));
        assert!(err.to_string().contains("SIL_PRINCIPLES.md"));
    }

    #[test]
    fn test_first_heading() {
        assert_eq!(first_heading("intro\n# The Title  \n## Sub"), Some("The Title"));
        assert_eq!(first_heading("## Only second level"), None);
        assert_eq!(first_heading("#NoSpace"), None);
    }

    #[test]
    fn test_first_heading_skips_fenced_code() {
        let body = "```bash\n# not a heading\n```\n\n# Real Heading\n";
        assert_eq!(first_heading(body), Some("Real Heading"));
    }
}
