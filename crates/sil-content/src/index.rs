//! Category discovery.
//!
//! Each category is a flat directory of markdown files. Discovery seeds a
//! slug map with the configured overrides, then walks the directory in
//! sorted filename order and adds one slug per remaining file. The first
//! writer of a slug wins; every file that loses is recorded as a
//! [`SlugCollision`] so content authors can find unreachable files.
//!
//! [`ContentIndex`] runs discovery once for every configured category and
//! is immutable afterwards. Files added later need a restart.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::slug::{CONTENT_EXTENSION, SlugRules};

/// Slug to filename table of one category, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugMap {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl SlugMap {
    /// Filename for a slug.
    pub fn get(&self, slug: &str) -> Option<&str> {
        self.positions
            .get(slug)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// Whether the slug is present.
    pub fn contains(&self, slug: &str) -> bool {
        self.positions.contains_key(slug)
    }

    /// `(slug, filename)` pairs, overrides first, then discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, f)| (s.as_str(), f.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert unless the slug is taken. Returns the current owner on conflict.
    fn insert_if_absent(&mut self, slug: String, filename: String) -> Result<(), &str> {
        if let Some(&i) = self.positions.get(&slug) {
            return Err(self.entries[i].1.as_str());
        }
        self.positions.insert(slug.clone(), self.entries.len());
        self.entries.push((slug, filename));
        Ok(())
    }
}

/// A file that lost its slug to an earlier writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    pub category: String,
    pub slug: String,
    /// Filename that owns the slug.
    pub kept: String,
    /// Filename that is unreachable under this slug.
    pub dropped: String,
}

/// Slug discovery for category directories.
pub struct Discoverer<'a> {
    docs_root: &'a Path,
    rules: &'a SlugRules,
    overrides: &'a BTreeMap<String, BTreeMap<String, String>>,
}

impl<'a> Discoverer<'a> {
    /// Create a discoverer rooted at the docs directory.
    pub fn new(
        docs_root: &'a Path,
        rules: &'a SlugRules,
        overrides: &'a BTreeMap<String, BTreeMap<String, String>>,
    ) -> Self {
        Self {
            docs_root,
            rules,
            overrides,
        }
    }

    /// Build the slug map of one category.
    ///
    /// A missing directory yields an empty map and a warning.
    pub fn discover(&self, category: &str) -> (SlugMap, Vec<SlugCollision>) {
        let dir = self.docs_root.join(category);
        let mut map = SlugMap::default();
        let mut collisions = Vec::new();

        if !dir.is_dir() {
            tracing::warn!(category, path = %dir.display(), "Category directory not found");
            return (map, collisions);
        }

        let overrides = self.overrides.get(category);
        let mut claimed = HashSet::new();
        for (slug, filename) in overrides.into_iter().flatten() {
            if !dir.join(filename).is_file() {
                tracing::warn!(category, slug = %slug, filename = %filename, "Slug override target missing");
            }
            claimed.insert(filename.as_str());
            // Overrides come from a map, so slugs are already unique
            let _ = map.insert_if_absent(slug.clone(), filename.clone());
        }

        for filename in list_content_files(&dir) {
            if claimed.contains(filename.as_str()) {
                continue;
            }
            let slug = self.rules.filename_to_slug(&filename);
            if let Err(kept) = map.insert_if_absent(slug.clone(), filename.clone()) {
                tracing::warn!(
                    category,
                    slug = %slug,
                    kept,
                    dropped = %filename,
                    "Slug collision, file is unreachable"
                );
                collisions.push(SlugCollision {
                    category: category.to_owned(),
                    slug,
                    kept: kept.to_owned(),
                    dropped: filename,
                });
            } else {
                tracing::debug!(category, slug = %slug, filename = %filename, "Discovered document");
            }
        }

        (map, collisions)
    }
}

/// Sorted names of non-hidden `.md` files directly inside `dir`.
fn list_content_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.') && name.ends_with(CONTENT_EXTENSION))
        .collect();
    names.sort();
    names
}

/// Slug maps for all configured categories, built once.
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    docs_root: PathBuf,
    categories: Vec<(String, SlugMap)>,
    collisions: Vec<SlugCollision>,
}

impl ContentIndex {
    /// Discover every category in the given order.
    pub fn build(
        docs_root: &Path,
        categories: &[String],
        rules: &SlugRules,
        overrides: &BTreeMap<String, BTreeMap<String, String>>,
    ) -> Self {
        let discoverer = Discoverer::new(docs_root, rules, overrides);
        let mut index = Self {
            docs_root: docs_root.to_path_buf(),
            ..Self::default()
        };

        for category in categories {
            if index.slugs(category).is_some() {
                continue;
            }
            let (map, collisions) = discoverer.discover(category);
            index.collisions.extend(collisions);
            index.categories.push((category.clone(), map));
        }

        tracing::info!(
            categories = index.categories.len(),
            documents = index.categories.iter().map(|(_, m)| m.len()).sum::<usize>(),
            collisions = index.collisions.len(),
            "Content index built"
        );
        index
    }

    /// Slug map of a configured category.
    pub fn slugs(&self, category: &str) -> Option<&SlugMap> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, map)| map)
    }

    /// `(category, slug map)` pairs in configured order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &SlugMap)> {
        self.categories.iter().map(|(name, map)| (name.as_str(), map))
    }

    /// Files dropped by slug collisions across all categories.
    pub fn collisions(&self) -> &[SlugCollision] {
        &self.collisions
    }

    /// Path of a file in a category.
    pub fn file_path(&self, category: &str, filename: &str) -> PathBuf {
        self.docs_root.join(category).join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn overrides(entries: &[(&str, &str, &str)]) -> BTreeMap<String, BTreeMap<String, String>> {
        let mut map: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (category, slug, file) in entries {
            map.entry((*category).to_owned())
                .or_default()
                .insert((*slug).to_owned(), (*file).to_owned());
        }
        map
    }

    #[test]
    fn test_discover_sorted_slugs() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "canonical/SIL_PRINCIPLES.md", "# P");
        write(temp.path(), "canonical/SIL_MANIFESTO.md", "# M");
        write(temp.path(), "canonical/README.md", "# R");
        write(temp.path(), "canonical/notes.txt", "skip");
        write(temp.path(), "canonical/.hidden.md", "skip");
        write(temp.path(), "canonical/nested/deep.md", "skip");

        let rules = SlugRules::default();
        let none = BTreeMap::new();
        let (map, collisions) = Discoverer::new(temp.path(), &rules, &none).discover("canonical");

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("overview", "README.md"),
                ("manifesto", "SIL_MANIFESTO.md"),
                ("principles", "SIL_PRINCIPLES.md"),
            ]
        );
        assert!(collisions.is_empty());
    }

    #[test]
    fn test_missing_category_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let rules = SlugRules::default();
        let none = BTreeMap::new();
        let (map, collisions) = Discoverer::new(temp.path(), &rules, &none).discover("essays");
        assert!(map.is_empty());
        assert!(collisions.is_empty());
    }

    #[test]
    fn test_override_wins_and_collision_recorded() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "canonical/MANIFESTO.md", "# Override");
        write(temp.path(), "canonical/manifesto.md", "# Auto");

        let rules = SlugRules::default();
        let overrides = overrides(&[("canonical", "manifesto", "MANIFESTO.md")]);
        let (map, collisions) =
            Discoverer::new(temp.path(), &rules, &overrides).discover("canonical");

        assert_eq!(map.get("manifesto"), Some("MANIFESTO.md"));
        assert_eq!(map.len(), 1);
        assert_eq!(
            collisions,
            vec![SlugCollision {
                category: "canonical".to_owned(),
                slug: "manifesto".to_owned(),
                kept: "MANIFESTO.md".to_owned(),
                dropped: "manifesto.md".to_owned(),
            }]
        );
    }

    #[test]
    fn test_override_target_not_rediscovered() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "tools/README.md", "# Tools");

        let rules = SlugRules::default();
        let overrides = overrides(&[("tools", "tools-overview", "README.md")]);
        let (map, collisions) = Discoverer::new(temp.path(), &rules, &overrides).discover("tools");

        assert_eq!(map.get("tools-overview"), Some("README.md"));
        assert!(!map.contains("overview"));
        assert!(collisions.is_empty());
    }

    #[test]
    fn test_first_in_sorted_order_wins() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "research/Agent_Notes.md", "a");
        write(temp.path(), "research/AGENT_NOTES.md", "b");

        let rules = SlugRules::default();
        let none = BTreeMap::new();
        let (map, collisions) = Discoverer::new(temp.path(), &rules, &none).discover("research");

        assert_eq!(map.get("agent-notes"), Some("AGENT_NOTES.md"));
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].dropped, "Agent_Notes.md");
    }

    #[test]
    fn test_index_build_collects_all_categories() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "canonical/SIL_GLOSSARY.md", "g");
        write(temp.path(), "tools/reveal.md", "r");
        write(temp.path(), "tools/REVEAL.md", "R");

        let categories = vec![
            "canonical".to_owned(),
            "tools".to_owned(),
            "missing".to_owned(),
            "canonical".to_owned(),
        ];
        let index = ContentIndex::build(
            temp.path(),
            &categories,
            &SlugRules::default(),
            &BTreeMap::new(),
        );

        let names: Vec<_> = index.categories().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["canonical", "tools", "missing"]);
        assert_eq!(index.slugs("canonical").unwrap().get("glossary"), Some("SIL_GLOSSARY.md"));
        assert!(index.slugs("missing").unwrap().is_empty());
        assert!(index.slugs("unconfigured").is_none());
        assert_eq!(index.collisions().len(), 1);
        assert_eq!(
            index.file_path("tools", "REVEAL.md"),
            temp.path().join("tools").join("REVEAL.md")
        );
    }
}
