//! Content classification tables.
//!
//! The defaults reproduce the hand-maintained tables of the deployed site.
//! Any table set in `sil.toml` replaces the built-in one wholesale.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Tier placement of one slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TierEntry {
    /// Presentation bucket (1 essential, 2 architecture, 3 deep reference).
    pub tier: u8,
    /// Sort key within the tier.
    pub order: u32,
}

/// `[content]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Category directories in lookup priority order.
    pub categories: Vec<String>,
    /// Organizational filename prefix removed when deriving slugs.
    pub strip_prefix: String,
    /// Base name of index documents (mapped to `overview_slug`).
    pub index_name: String,
    /// Sentinel slug for index documents.
    pub overview_slug: String,
    /// Number of tier 3 documents shown in navigation.
    pub nav_reference_limit: usize,
    /// Per-category slug -> filename overrides.
    pub overrides: BTreeMap<String, BTreeMap<String, String>>,
    /// Slug -> tier placement.
    pub tiers: BTreeMap<String, TierEntry>,
    /// Additional link-map entries (filename or `dir/` -> route).
    pub extra_links: BTreeMap<String, String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            strip_prefix: "SIL_".to_owned(),
            index_name: "README".to_owned(),
            overview_slug: "overview".to_owned(),
            nav_reference_limit: 5,
            overrides: default_overrides(),
            tiers: default_tiers(),
            extra_links: default_extra_links(),
        }
    }
}

fn default_categories() -> Vec<String> {
    [
        "canonical",
        "architecture",
        "guides",
        "essays",
        "research",
        "systems",
        "foundations",
        "manifesto",
        "tools",
        "innovations",
        "meta",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn default_overrides() -> BTreeMap<String, BTreeMap<String, String>> {
    let table: &[(&str, &[(&str, &str)])] = &[
        (
            "canonical",
            &[
                ("manifesto", "SIL_MANIFESTO.md"),
                ("principles", "SIL_PRINCIPLES.md"),
                ("glossary", "SIL_GLOSSARY.md"),
                ("research-agenda-year1", "SIL_RESEARCH_AGENDA_YEAR1.md"),
                ("canonical-overview", "README.md"),
            ],
        ),
        ("architecture", &[("architecture-overview", "README.md")]),
        (
            "guides",
            &[
                ("optimization", "OPTIMIZATION_IN_SIL.md"),
                ("ecosystem-layout", "SIL_ECOSYSTEM_PROJECT_LAYOUT.md"),
            ],
        ),
        ("research", &[("research-overview", "README.md")]),
        ("tools", &[("tools-overview", "README.md")]),
    ];

    table
        .iter()
        .map(|(category, entries)| {
            let map = entries
                .iter()
                .map(|(slug, file)| ((*slug).to_owned(), (*file).to_owned()))
                .collect();
            ((*category).to_owned(), map)
        })
        .collect()
}

fn default_tiers() -> BTreeMap<String, TierEntry> {
    let essential = [
        "start-here",
        "manifesto",
        "founders-letter",
        "principles",
        "glossary",
        "research-agenda-year1",
    ];
    let reference = [
        "semantic-os-architecture",
        "stewardship-manifesto",
        "technical-charter",
        "design-principles",
        "trust-assertion-protocol",
        "authorization-protocol",
        "hierarchical-agency-framework",
        "safety-thresholds",
        "semantic-feedback-loops",
        "semantic-observability",
        "multi-agent-protocol-principles",
        "founders-note-multishot-agent-learning",
        "progressive-disclosure-guide",
        "reveal-beth-progressive-knowledge-system",
        "tool-quality-monitoring",
    ];

    let place = |tier: u8, slugs: &[&str]| {
        slugs
            .iter()
            .zip(1u32..)
            .map(move |(slug, order)| ((*slug).to_owned(), TierEntry { tier, order }))
            .collect::<Vec<_>>()
    };

    place(1, &essential)
        .into_iter()
        .chain(place(3, &reference))
        .collect()
}

fn default_extra_links() -> BTreeMap<String, String> {
    [
        ("PROJECT_INDEX.md", "/projects"),
        ("projects/", "/projects"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_tiers_are_numbered_per_tier() {
        let tiers = default_tiers();
        assert_eq!(tiers["start-here"], TierEntry { tier: 1, order: 1 });
        assert_eq!(
            tiers["research-agenda-year1"],
            TierEntry { tier: 1, order: 6 }
        );
        assert_eq!(
            tiers["semantic-os-architecture"],
            TierEntry { tier: 3, order: 1 }
        );
        assert_eq!(
            tiers["tool-quality-monitoring"],
            TierEntry { tier: 3, order: 15 }
        );
    }

    #[test]
    fn test_default_overrides_map_each_file_once() {
        let overrides = default_overrides();
        for (category, slugs) in &overrides {
            let mut files = std::collections::BTreeSet::new();
            for file in slugs.values() {
                assert!(files.insert(file), "{category}/{file} has more than one slug");
            }
        }

        let tiers = default_tiers();
        assert_eq!(
            overrides["canonical"]["research-agenda-year1"],
            "SIL_RESEARCH_AGENDA_YEAR1.md"
        );
        assert!(tiers.contains_key("research-agenda-year1"));
        assert!(!overrides["canonical"].contains_key("research-agenda"));
        assert_eq!(overrides["tools"]["tools-overview"], "README.md");
    }

    #[test]
    fn test_partial_content_section_keeps_other_defaults() {
        let config: ContentConfig = toml::from_str(
            r#"
categories = ["canonical"]

[tiers]
welcome = { tier = 2, order = 3 }
"#,
        )
        .unwrap();

        assert_eq!(config.categories, vec!["canonical".to_owned()]);
        assert_eq!(config.tiers.len(), 1);
        assert_eq!(config.tiers["welcome"], TierEntry { tier: 2, order: 3 });
        assert_eq!(config.strip_prefix, "SIL_");
        assert!(config.overrides.contains_key("canonical"));
    }
}
