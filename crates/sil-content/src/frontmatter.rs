//! YAML frontmatter parsing.
//!
//! A frontmatter block starts on the first line with a `---` marker and
//! ends at the next `---` line. Text without a complete block is all body.

use serde::{Deserialize, Deserializer};

/// Frontmatter block delimiter.
pub const MARKER: &str = "---";

/// Parsed frontmatter fields.
///
/// Unknown keys are ignored. `private` defaults to `false`, lists default
/// to empty and also accept a single value. `order` is informational and
/// may be any integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tier: Option<u8>,
    pub order: Option<i64>,
    pub private: bool,
    #[serde(deserialize_with = "one_or_many")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub beth_topics: Vec<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

/// Frontmatter parse error.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// Block is not valid YAML or has wrongly typed fields.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Tier outside 1..=3.
    #[error("tier must be 1, 2 or 3, got {0}")]
    TierOutOfRange(u8),
}

/// A file split into its frontmatter and body.
#[derive(Debug, PartialEq, Eq)]
pub struct Parsed<'a> {
    pub frontmatter: Frontmatter,
    pub body: &'a str,
}

/// Whether the text opens with a frontmatter marker line.
pub fn has_frontmatter(text: &str) -> bool {
    text.starts_with(MARKER)
}

/// Split text into raw YAML and body.
///
/// Returns `None` when the text does not start with a complete block.
pub fn split(text: &str) -> Option<(&str, &str)> {
    let (first, rest) = text.split_once('\n')?;
    if !is_marker(first) {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_marker(line) {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse frontmatter and return it with the remaining body.
pub fn parse(text: &str) -> Result<Parsed<'_>, FrontmatterError> {
    let Some((yaml, body)) = split(text) else {
        return Ok(Parsed {
            frontmatter: Frontmatter::default(),
            body: text,
        });
    };

    let trimmed = yaml.trim();
    let frontmatter: Frontmatter = if trimmed.is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(trimmed)?
    };

    if let Some(tier) = frontmatter.tier
        && !(1..=3).contains(&tier)
    {
        return Err(FrontmatterError::TierOutOfRange(tier));
    }

    Ok(Parsed { frontmatter, body })
}

fn is_marker(line: &str) -> bool {
    line.trim_end() == MARKER
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_block() {
        let text = "---\ntitle: \"The Manifesto\"\ndescription: Why we build\ntier: 1\norder: 2\nprivate: true\ntags: [core, vision]\nbeth_topics:\n  - semantics\n---\n\n# The Manifesto\n\nBody.\n";
        let parsed = parse(text).unwrap();

        assert_eq!(
            parsed.frontmatter,
            Frontmatter {
                title: Some("The Manifesto".to_owned()),
                description: Some("Why we build".to_owned()),
                tier: Some(1),
                order: Some(2),
                private: true,
                tags: vec!["core".to_owned(), "vision".to_owned()],
                beth_topics: vec!["semantics".to_owned()],
            }
        );
        assert_eq!(parsed.body, "\n# The Manifesto\n\nBody.\n");
    }

    #[test]
    fn test_no_block_is_all_body() {
        let text = "# Title\n\nNo metadata here.\n";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.frontmatter, Frontmatter::default());
        assert!(!parsed.frontmatter.private);
        assert_eq!(parsed.body, text);
    }

    #[test]
    fn test_unterminated_block_is_all_body() {
        let text = "---\ntitle: Dangling\n\nBody";
        assert!(split(text).is_none());
        assert_eq!(parse(text).unwrap().body, text);
    }

    #[test]
    fn test_empty_block() {
        let parsed = parse("---\n---\nBody").unwrap();
        assert_eq!(parsed.frontmatter, Frontmatter::default());
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_closing_marker_at_eof() {
        let (yaml, body) = split("---\ntitle: Only\n---").unwrap();
        assert_eq!(yaml, "title: Only\n");
        assert_eq!(body, "");
    }

    #[test]
    fn test_crlf_markers() {
        let parsed = parse("---\r\ntitle: Windows\r\n---\r\nBody\r\n").unwrap();
        assert_eq!(parsed.frontmatter.title.as_deref(), Some("Windows"));
        assert_eq!(parsed.body, "Body\r\n");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let parsed = parse("---\ntitle: X\nauthor: someone\n---\nBody").unwrap();
        assert_eq!(parsed.frontmatter.title.as_deref(), Some("X"));
    }

    #[test]
    fn test_lenient_order_and_lists() {
        let parsed = parse("---\norder: -1\ntags: core\nbeth_topics:\n---\nBody").unwrap();
        assert_eq!(parsed.frontmatter.order, Some(-1));
        assert_eq!(parsed.frontmatter.tags, vec!["core".to_owned()]);
        assert!(parsed.frontmatter.beth_topics.is_empty());
    }

    #[test]
    fn test_tier_out_of_range() {
        let err = parse("---\ntier: 4\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontmatterError::TierOutOfRange(4)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn test_has_frontmatter() {
        assert!(has_frontmatter("---\ntitle: X\n---\n"));
        assert!(!has_frontmatter("# Heading\n---\n"));
    }
}
