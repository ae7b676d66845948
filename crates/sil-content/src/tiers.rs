//! Tier classification and navigation grouping.
//!
//! Tier 1 is the must-read list, tier 2 architecture, tier 3 deep
//! reference. Placement is a hand-maintained lookup table; slugs missing
//! from it sort last in tier 3.

use std::collections::{BTreeMap, HashMap};

use crate::document::Document;

/// Tier and sort order of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Placement {
    pub tier: u8,
    pub order: u32,
}

impl Placement {
    /// Placement of slugs missing from the table.
    pub const UNLISTED: Self = Self {
        tier: 3,
        order: 999,
    };

    pub const fn new(tier: u8, order: u32) -> Self {
        Self { tier, order }
    }
}

/// Static slug to placement table.
#[derive(Debug, Clone, Default)]
pub struct TierTable {
    entries: HashMap<String, Placement>,
}

impl TierTable {
    /// Placement for a slug, [`Placement::UNLISTED`] if absent.
    pub fn classify(&self, slug: &str) -> Placement {
        self.get(slug).unwrap_or(Placement::UNLISTED)
    }

    /// Explicit placement for a slug.
    pub fn get(&self, slug: &str) -> Option<Placement> {
        self.entries.get(slug).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Placement)> for TierTable {
    fn from_iter<I: IntoIterator<Item = (String, Placement)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Partition documents by tier and sort each tier by order.
///
/// Tiers 1, 2 and 3 are always present. Equal orders keep input order.
pub fn group_by_tier(docs: impl IntoIterator<Item = Document>) -> BTreeMap<u8, Vec<Document>> {
    let mut groups: BTreeMap<u8, Vec<Document>> = (1..=3).map(|tier| (tier, Vec::new())).collect();
    for doc in docs {
        groups.entry(doc.tier).or_default().push(doc);
    }
    for docs in groups.values_mut() {
        docs.sort_by_key(|d| d.order);
    }
    groups
}

/// Navigation link to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub title: String,
    pub slug: String,
    pub category: String,
    pub description: Option<String>,
}

impl From<&Document> for NavEntry {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            slug: doc.slug.clone(),
            category: doc.category.clone(),
            description: doc.description.clone(),
        }
    }
}

/// Tiered navigation: tiers 1 and 2 in full, the top of tier 3.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    pub essential: Vec<NavEntry>,
    pub architecture: Vec<NavEntry>,
    pub reference: Vec<NavEntry>,
    /// Tier 3 documents left out of `reference`.
    pub hidden_reference: usize,
}

impl Navigation {
    /// Build navigation from grouped documents.
    pub fn from_groups(groups: &BTreeMap<u8, Vec<Document>>, reference_limit: usize) -> Self {
        let entries = |tier: u8| -> Vec<NavEntry> {
            groups
                .get(&tier)
                .map(|docs| docs.iter().map(NavEntry::from).collect())
                .unwrap_or_default()
        };

        let mut reference = entries(3);
        let hidden_reference = reference.len().saturating_sub(reference_limit);
        reference.truncate(reference_limit);

        Self {
            essential: entries(1),
            architecture: entries(2),
            reference,
            hidden_reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn doc(slug: &str, placement: Placement) -> Document {
        Document {
            title: slug.to_owned(),
            slug: slug.to_owned(),
            content: "body".to_owned(),
            category: "canonical".to_owned(),
            description: None,
            tier: placement.tier,
            order: placement.order,
            private: false,
            tags: Vec::new(),
            beth_topics: Vec::new(),
            path: PathBuf::from(format!("{slug}.md")),
        }
    }

    fn table() -> TierTable {
        [
            ("start-here".to_owned(), Placement::new(1, 1)),
            ("manifesto".to_owned(), Placement::new(1, 2)),
            ("semantic-os-architecture".to_owned(), Placement::new(3, 1)),
            ("technical-charter".to_owned(), Placement::new(3, 3)),
        ]
        .into_iter()
        .collect()
    }

    fn slugs(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.slug.as_str()).collect()
    }

    #[test]
    fn test_classify() {
        let table = table();
        assert_eq!(table.classify("manifesto"), Placement::new(1, 2));
        assert_eq!(table.classify("unknown-essay"), Placement::UNLISTED);
        assert_eq!(table.get("unknown-essay"), None);
    }

    #[test]
    fn test_unlisted_sorts_after_ordered_tier_three() {
        let table = table();
        let docs = ["unlisted-notes", "technical-charter", "manifesto", "semantic-os-architecture", "start-here"]
            .into_iter()
            .map(|slug| doc(slug, table.classify(slug)));

        let groups = group_by_tier(docs);

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(slugs(&groups[&1]), vec!["start-here", "manifesto"]);
        assert!(groups[&2].is_empty());
        assert_eq!(
            slugs(&groups[&3]),
            vec!["semantic-os-architecture", "technical-charter", "unlisted-notes"]
        );
        assert_eq!(groups[&3][2].order, 999);
    }

    #[test]
    fn test_navigation_truncates_reference_tier() {
        let docs = (1..=7).map(|i| doc(&format!("ref-{i}"), Placement::new(3, i)));
        let groups = group_by_tier(docs.chain([doc("essential", Placement::new(1, 1))]));

        let nav = Navigation::from_groups(&groups, 5);

        assert_eq!(nav.essential.len(), 1);
        assert!(nav.architecture.is_empty());
        assert_eq!(
            nav.reference.iter().map(|e| e.slug.as_str()).collect::<Vec<_>>(),
            vec!["ref-1", "ref-2", "ref-3", "ref-4", "ref-5"]
        );
        assert_eq!(nav.hidden_reference, 2);
    }
}
