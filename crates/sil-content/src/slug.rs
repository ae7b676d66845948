//! Filename to slug derivation.

/// Extension of content files.
pub const CONTENT_EXTENSION: &str = ".md";

/// Rules for deriving slugs from filenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugRules {
    /// Organizational prefix stripped from the front of base names.
    pub strip_prefix: String,
    /// Base name of index documents.
    pub index_name: String,
    /// Slug assigned to index documents.
    pub overview_slug: String,
}

impl Default for SlugRules {
    fn default() -> Self {
        Self {
            strip_prefix: "SIL_".to_owned(),
            index_name: "README".to_owned(),
            overview_slug: "overview".to_owned(),
        }
    }
}

impl SlugRules {
    /// Map a markdown filename to its URL slug.
    ///
    /// - `README.md` -> `overview`
    /// - `SIL_MANIFESTO.md` -> `manifesto`
    /// - `Founders_Letter.md` -> `founders-letter`
    ///
    /// Repeated hyphens and other punctuation are kept as-is.
    pub fn filename_to_slug(&self, filename: &str) -> String {
        let base = filename.strip_suffix(CONTENT_EXTENSION).unwrap_or(filename);
        if base == self.index_name {
            return self.overview_slug.clone();
        }
        let base = base.strip_prefix(self.strip_prefix.as_str()).unwrap_or(base);
        base.to_lowercase().replace('_', "-")
    }
}

/// Humanize a slug for use as a fallback title.
///
/// Hyphens become spaces and each word is capitalized with the rest lowercased.
pub fn humanize_slug(slug: &str) -> String {
    title_case(&slug.replace('-', " "))
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = !ch.is_alphanumeric();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prefix_stripped_and_lowercased() {
        let rules = SlugRules::default();
        assert_eq!(rules.filename_to_slug("SIL_MANIFESTO.md"), "manifesto");
        assert_eq!(rules.filename_to_slug("SIL_PRINCIPLES.md"), "principles");
        assert_eq!(
            rules.filename_to_slug("SIL_RESEARCH_AGENDA_YEAR1.md"),
            "research-agenda-year1"
        );
    }

    #[test]
    fn test_index_maps_to_overview() {
        let rules = SlugRules::default();
        assert_eq!(rules.filename_to_slug("README.md"), "overview");
        assert_eq!(rules.filename_to_slug("README"), "overview");
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let rules = SlugRules::default();
        assert_eq!(rules.filename_to_slug("sil_notes.md"), "sil-notes");
    }

    #[test]
    fn test_no_further_normalization() {
        let rules = SlugRules::default();
        assert_eq!(rules.filename_to_slug("A__B.md"), "a--b");
        assert_eq!(rules.filename_to_slug("v1.2_notes.md"), "v1.2-notes");
        assert_eq!(rules.filename_to_slug("readme.md"), "readme");
    }

    #[test]
    fn test_deterministic() {
        let rules = SlugRules::default();
        let first = rules.filename_to_slug("TRUST_ASSERTION_PROTOCOL.md");
        let second = rules.filename_to_slug("TRUST_ASSERTION_PROTOCOL.md");
        assert_eq!(first, second);
        assert_eq!(first, "trust-assertion-protocol");
    }

    #[test]
    fn test_custom_rules() {
        let rules = SlugRules {
            strip_prefix: "ACME_".to_owned(),
            index_name: "index".to_owned(),
            overview_slug: "home".to_owned(),
        };
        assert_eq!(rules.filename_to_slug("index.md"), "home");
        assert_eq!(rules.filename_to_slug("ACME_ROADMAP.md"), "roadmap");
        assert_eq!(rules.filename_to_slug("README.md"), "readme");
    }

    #[test]
    fn test_humanize_slug() {
        assert_eq!(humanize_slug("founders-letter"), "Founders Letter");
        assert_eq!(humanize_slug("research-agenda-year1"), "Research Agenda Year1");
        assert_eq!(humanize_slug("overview"), "Overview");
    }

    #[test]
    fn test_title_case_lowers_rest() {
        assert_eq!(title_case("SEMANTIC os"), "Semantic Os");
        assert_eq!(title_case("multi_agent notes"), "Multi_Agent Notes");
    }
}
