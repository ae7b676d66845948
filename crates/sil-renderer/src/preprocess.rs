//! Text passes that run before markdown parsing.

use std::sync::LazyLock;

use regex::Regex;

/// Leading `---` block, up to and including the closing `---` line.
static FRONTMATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---[ \t]*\r?\n(?:(?s:.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)").unwrap());

/// Remove a leading frontmatter block. Text without one is returned as is.
pub fn strip_frontmatter(text: &str) -> &str {
    match FRONTMATTER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Remove the first level-one `# ` heading outside fenced code, together
/// with the blank lines right after it.
pub fn strip_first_h1(text: &str) -> String {
    let mut in_fence = false;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        } else if !in_fence && is_h1(trimmed) {
            let rest = &text[offset + line.len()..];
            let rest = skip_blank_lines(rest);
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..offset]);
            out.push_str(rest);
            return out;
        }
        offset += line.len();
    }

    text.to_owned()
}

fn is_h1(line: &str) -> bool {
    line.strip_prefix('#')
        .is_some_and(|rest| rest.starts_with([' ', '\t']) && !rest.trim().is_empty())
}

fn skip_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some(line) = rest.split_inclusive('\n').next() {
        if !line.trim().is_empty() {
            break;
        }
        rest = &rest[line.len()..];
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_frontmatter() {
        let text = "---\ntitle: Manifesto\ntier: 1\n---\n# Manifesto\n\nBody\n";
        assert_eq!(strip_frontmatter(text), "# Manifesto\n\nBody\n");
    }

    #[test]
    fn test_strip_frontmatter_crlf_and_empty_block() {
        assert_eq!(strip_frontmatter("---\r\ntitle: X\r\n---\r\nBody"), "Body");
        assert_eq!(strip_frontmatter("---\n---\nBody"), "Body");
    }

    #[test]
    fn test_strip_frontmatter_only_at_start() {
        let text = "Intro\n\n---\ntitle: X\n---\n";
        assert_eq!(strip_frontmatter(text), text);
    }

    #[test]
    fn test_strip_frontmatter_non_greedy() {
        let text = "---\na: 1\n---\nBody\n---\nmore\n";
        assert_eq!(strip_frontmatter(text), "Body\n---\nmore\n");
    }

    #[test]
    fn test_strip_first_h1() {
        let text = "# Title\n\n\n## Section\n\n# Second\n";
        assert_eq!(strip_first_h1(text), "## Section\n\n# Second\n");
    }

    #[test]
    fn test_strip_first_h1_after_intro() {
        let text = "Intro line\n# Title\n\nBody\n";
        assert_eq!(strip_first_h1(text), "Intro line\nBody\n");
    }

    #[test]
    fn test_strip_first_h1_skips_code_fences() {
        let text = "```bash\n# comment\n```\n# Real Title\nBody\n";
        assert_eq!(strip_first_h1(text), "```bash\n# comment\n```\nBody\n");
    }

    #[test]
    fn test_strip_first_h1_ignores_other_levels() {
        let text = "## Only Section\n#hashtag\n";
        assert_eq!(strip_first_h1(text), text);
    }
}
