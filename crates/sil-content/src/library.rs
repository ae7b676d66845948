//! Document loading.
//!
//! [`Library`] owns the immutable content tables (slug maps, tier table)
//! and reads documents from disk on every request. Nothing is cached
//! beyond the slug maps built at startup.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::document::{Document, first_heading};
use crate::error::ContentError;
use crate::frontmatter::{self, Frontmatter};
use crate::index::ContentIndex;
use crate::slug::{CONTENT_EXTENSION, SlugRules, humanize_slug};
use crate::tiers::{Navigation, Placement, TierTable, group_by_tier};

/// Category reported for the root index document.
pub const ROOT_CATEGORY: &str = "root";

/// Whether private documents may be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Private documents behave as missing.
    #[default]
    Public,
    /// Private documents are returned.
    IncludePrivate,
}

impl Visibility {
    fn allows(self, private: bool) -> bool {
        !private || self == Self::IncludePrivate
    }
}

/// Configuration for [`Library`].
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// Root of the category tree.
    pub docs_root: PathBuf,
    /// Categories in lookup priority order.
    pub categories: Vec<String>,
    pub rules: SlugRules,
    /// Per-category slug -> filename overrides.
    pub overrides: BTreeMap<String, BTreeMap<String, String>>,
    pub tiers: TierTable,
    /// Directory of fixed pages, relative to `docs_root`.
    pub pages_dir: String,
}

/// A fixed, non-slugged page such as home or about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    /// Markdown body with the frontmatter block removed.
    pub content: String,
}

/// Document store over the docs tree.
#[derive(Debug)]
pub struct Library {
    docs_root: PathBuf,
    categories: Vec<String>,
    rules: SlugRules,
    tiers: TierTable,
    pages_dir: PathBuf,
    index: ContentIndex,
}

impl Library {
    /// Discover all categories and build the lookup tables.
    pub fn open(config: LibraryConfig) -> Self {
        let index = ContentIndex::build(
            &config.docs_root,
            &config.categories,
            &config.rules,
            &config.overrides,
        );
        Self {
            pages_dir: config.docs_root.join(&config.pages_dir),
            docs_root: config.docs_root,
            categories: config.categories,
            rules: config.rules,
            tiers: config.tiers,
            index,
        }
    }

    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    pub fn rules(&self) -> &SlugRules {
        &self.rules
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    pub fn docs_root(&self) -> &Path {
        &self.docs_root
    }

    /// Categories in lookup priority order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Load a document from one category.
    pub fn load(
        &self,
        category: &str,
        slug: &str,
        visibility: Visibility,
    ) -> Result<Document, ContentError> {
        let Some(filename) = self.index.slugs(category).and_then(|map| map.get(slug)) else {
            tracing::warn!(category, slug, "Document slug not found");
            return Err(ContentError::not_found(slug));
        };

        let path = self.index.file_path(category, filename);
        if !path.is_file() {
            tracing::error!(
                category,
                slug,
                path = %path.display(),
                "Document in slug map but missing on disk"
            );
            return Err(ContentError::not_found(slug));
        }

        let placement = self.tiers.classify(slug);
        self.read_document(&path, category, slug, placement, None, visibility)
    }

    /// Load a document by bare slug.
    ///
    /// The overview slug resolves to the root index file first. Other slugs
    /// are searched through the categories in priority order and the first
    /// visible match wins.
    pub fn load_by_slug(&self, slug: &str, visibility: Visibility) -> Result<Document, ContentError> {
        if slug == self.rules.overview_slug {
            let root_index = self
                .docs_root
                .join(format!("{}{CONTENT_EXTENSION}", self.rules.index_name));
            if root_index.is_file() {
                return self.read_document(
                    &root_index,
                    ROOT_CATEGORY,
                    slug,
                    Placement::new(1, 0),
                    Some(&humanize_slug(slug)),
                    visibility,
                );
            }
        }

        for category in &self.categories {
            let known = self
                .index
                .slugs(category)
                .is_some_and(|map| map.contains(slug));
            if !known {
                continue;
            }
            match self.load(category, slug, visibility) {
                Err(ContentError::NotFound { .. }) => {}
                result => return result,
            }
        }

        tracing::warn!(slug, "Document not found in any category");
        Err(ContentError::not_found(slug))
    }

    /// All visible documents, in category then slug-map order.
    ///
    /// Missing and private documents are skipped. Broken documents are
    /// logged and skipped. A file reachable under several slugs appears once.
    pub fn list(&self, category: Option<&str>, visibility: Visibility) -> Vec<Document> {
        let categories: Vec<&str> = match category {
            Some(name) => vec![name],
            None => self.categories.iter().map(String::as_str).collect(),
        };

        let mut seen = HashSet::new();
        let mut docs = Vec::new();
        for category in categories {
            let Some(map) = self.index.slugs(category) else {
                continue;
            };
            for (slug, filename) in map.iter() {
                if !seen.insert((category, filename)) {
                    continue;
                }
                match self.load(category, slug, visibility) {
                    Ok(doc) => docs.push(doc),
                    Err(ContentError::NotFound { .. }) => {}
                    Err(e) => {
                        tracing::error!(category, slug, error = %e, "Skipping broken document");
                    }
                }
            }
        }
        docs
    }

    /// Visible documents grouped by tier and sorted by order.
    pub fn documents_by_tier(
        &self,
        category: Option<&str>,
        visibility: Visibility,
    ) -> BTreeMap<u8, Vec<Document>> {
        group_by_tier(self.list(category, visibility))
    }

    /// Navigation over all visible documents.
    pub fn navigation(&self, reference_limit: usize) -> Navigation {
        Navigation::from_groups(
            &self.documents_by_tier(None, Visibility::Public),
            reference_limit,
        )
    }

    /// Load a fixed page from the pages directory.
    pub fn load_page(&self, name: &str) -> Result<Page, ContentError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(ContentError::not_found(name));
        }

        let path = self.pages_dir.join(format!("{name}{CONTENT_EXTENSION}"));
        if !path.is_file() {
            tracing::warn!(page = name, path = %path.display(), "Page not found");
            return Err(ContentError::not_found(name));
        }

        let text = read(&path)?;
        let parsed = frontmatter::parse(&text).map_err(|source| ContentError::Frontmatter {
            path: path.clone(),
            source,
        })?;
        let title = resolve_title(&parsed.frontmatter, parsed.body, &humanize_slug(name));

        Ok(Page {
            name: name.to_owned(),
            title,
            description: parsed.frontmatter.description,
            content: parsed.body.to_owned(),
        })
    }

    fn read_document(
        &self,
        path: &Path,
        category: &str,
        slug: &str,
        placement: Placement,
        default_title: Option<&str>,
        visibility: Visibility,
    ) -> Result<Document, ContentError> {
        let text = read(path)?;
        let parsed = frontmatter::parse(&text).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "Invalid frontmatter");
            ContentError::Frontmatter {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let fm = parsed.frontmatter;

        if !visibility.allows(fm.private) {
            tracing::debug!(category, slug, "Private document hidden");
            return Err(ContentError::not_found(slug));
        }

        let fallback = default_title.map_or_else(|| humanize_slug(slug), str::to_owned);
        let title = resolve_title(&fm, parsed.body, &fallback);

        let doc = Document {
            title,
            slug: slug.to_owned(),
            content: parsed.body.to_owned(),
            category: category.to_owned(),
            description: fm.description,
            tier: placement.tier,
            order: placement.order,
            private: fm.private,
            tags: fm.tags,
            beth_topics: fm.beth_topics,
            path: path.to_path_buf(),
        }
        .validated()
        .inspect_err(|e| tracing::error!(category, slug, error = %e, "Invalid document"))?;

        tracing::debug!(
            category,
            slug,
            tier = doc.tier,
            word_count = doc.word_count(),
            "Document loaded"
        );
        Ok(doc)
    }
}

/// Frontmatter title, else the first `# ` heading, else the fallback.
fn resolve_title(fm: &Frontmatter, body: &str, fallback: &str) -> String {
    fm.title
        .clone()
        .or_else(|| first_heading(body).map(str::to_owned))
        .unwrap_or_else(|| fallback.to_owned())
}

fn read(path: &Path) -> Result<String, ContentError> {
    std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config(root: &Path) -> LibraryConfig {
        let mut overrides: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        overrides
            .entry("canonical".to_owned())
            .or_default()
            .insert("canonical-overview".to_owned(), "README.md".to_owned());

        LibraryConfig {
            docs_root: root.to_path_buf(),
            categories: vec![
                "canonical".to_owned(),
                "essays".to_owned(),
                "tools".to_owned(),
            ],
            rules: SlugRules::default(),
            overrides,
            tiers: [
                ("manifesto".to_owned(), Placement::new(1, 2)),
                ("principles".to_owned(), Placement::new(1, 4)),
            ]
            .into_iter()
            .collect(),
            pages_dir: "pages".to_owned(),
        }
    }

    fn fixture() -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        write(
            root,
            "canonical/SIL_MANIFESTO.md",
            "---\ntitle: The SIL Manifesto\ndescription: Why\n---\n\n# Manifesto Heading\n\nWe build semantic infrastructure.\n",
        );
        write(
            root,
            "canonical/SIL_PRINCIPLES.md",
            "# Founding Principles\n\nSeven principles.\n",
        );
        write(root, "canonical/README.md", "# Canonical\n\nIndex of canonical docs.\n");
        write(root, "essays/founders_letter.md", "A letter with no heading at all.\n");
        write(
            root,
            "essays/secret_plan.md",
            "---\ntitle: Secret\nprivate: true\n---\n\nHidden body.\n",
        );
        write(root, "essays/empty.md", "---\ntitle: Empty\n---\n\n");
        write(root, "tools/principles.md", "# Tool Principles\n\nOther.\n");
        write(root, "README.md", "Welcome to the docs.\n");
        write(root, "pages/about.md", "---\ntitle: About SIL\n---\n\nAbout body.\n");
        temp
    }

    #[test]
    fn test_load_title_from_frontmatter() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));

        let doc = library.load("canonical", "manifesto", Visibility::Public).unwrap();

        assert_eq!(doc.title, "The SIL Manifesto");
        assert_eq!(doc.description.as_deref(), Some("Why"));
        assert_eq!((doc.tier, doc.order), (1, 2));
        assert_eq!(doc.category, "canonical");
        assert!(!doc.private);
        assert!(doc.content.contains("We build semantic infrastructure."));
        assert!(!doc.content.contains("title:"));
    }

    #[test]
    fn test_load_title_from_heading() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));

        let doc = library.load("canonical", "principles", Visibility::Public).unwrap();

        assert_eq!(doc.title, "Founding Principles");
        assert_eq!((doc.tier, doc.order), (1, 4));
    }

    #[test]
    fn test_load_title_from_slug_and_default_tier() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));

        let doc = library.load("essays", "founders-letter", Visibility::Public).unwrap();

        assert_eq!(doc.title, "Founders Letter");
        assert_eq!((doc.tier, doc.order), (3, 999));
    }

    #[test]
    fn test_loose_frontmatter_fields_still_load() {
        let temp = fixture();
        write(
            temp.path(),
            "essays/draft_notes.md",
            "---\norder: -5\ntags: drafts\n---\n\n# Draft Notes\n\nBody.\n",
        );
        let library = Library::open(config(temp.path()));

        let doc = library.load("essays", "draft-notes", Visibility::Public).unwrap();

        assert_eq!(doc.title, "Draft Notes");
        assert_eq!(doc.tags, vec!["drafts".to_owned()]);
        assert_eq!((doc.tier, doc.order), (3, 999));
    }

    #[test]
    fn test_private_document_visibility() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));

        let err = library
            .load("essays", "secret-plan", Visibility::Public)
            .unwrap_err();
        assert!(err.is_not_found());

        let doc = library
            .load("essays", "secret-plan", Visibility::IncludePrivate)
            .unwrap();
        assert!(doc.private);
        assert_eq!(doc.title, "Secret");
    }

    #[test]
    fn test_unknown_slug_and_category_are_not_found() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));

        assert!(library.load("canonical", "nope", Visibility::Public).unwrap_err().is_not_found());
        assert!(library.load("meta", "manifesto", Visibility::Public).unwrap_err().is_not_found());
    }

    #[test]
    fn test_file_deleted_after_discovery_is_not_found() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));
        fs::remove_file(temp.path().join("canonical/SIL_MANIFESTO.md")).unwrap();

        let err = library.load("canonical", "manifesto", Visibility::Public).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_empty_body_is_data_integrity_error() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));

        let err = library.load("essays", "empty", Visibility::Public).unwrap_err();
        assert!(matches!(err, ContentError::DataIntegrity { .. }));
    }

    #[test]
    fn test_load_by_slug_priority() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));

        let doc = library.load_by_slug("principles", Visibility::Public).unwrap();
        assert_eq!(doc.category, "canonical");

        let doc = library.load_by_slug("founders-letter", Visibility::Public).unwrap();
        assert_eq!(doc.category, "essays");

        assert!(library.load_by_slug("missing", Visibility::Public).unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_by_slug_overview_uses_root_index() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));

        let doc = library.load_by_slug("overview", Visibility::Public).unwrap();

        assert_eq!(doc.category, ROOT_CATEGORY);
        assert_eq!(doc.title, "Overview");
        assert_eq!((doc.tier, doc.order), (1, 0));
    }

    #[test]
    fn test_load_by_slug_overview_falls_back_to_categories() {
        let temp = fixture();
        fs::remove_file(temp.path().join("README.md")).unwrap();
        write(temp.path(), "tools/README.md", "# Tools Overview\n\nTools.\n");
        let library = Library::open(config(temp.path()));

        let doc = library.load_by_slug("overview", Visibility::Public).unwrap();

        assert_eq!(doc.category, "tools");
        assert_eq!(doc.title, "Tools Overview");
    }

    #[test]
    fn test_list_skips_hidden_and_broken() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));

        let docs = library.list(None, Visibility::Public);
        let keys: Vec<_> = docs
            .iter()
            .map(|d| format!("{}/{}", d.category, d.slug))
            .collect();

        assert_eq!(
            keys,
            vec![
                "canonical/canonical-overview",
                "canonical/manifesto",
                "canonical/principles",
                "essays/founders-letter",
                "tools/principles",
            ]
        );

        let essays = library.list(Some("essays"), Visibility::IncludePrivate);
        assert_eq!(essays.len(), 2);
    }

    #[test]
    fn test_documents_by_tier() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));

        let groups = library.documents_by_tier(Some("canonical"), Visibility::Public);

        let tier1: Vec<_> = groups[&1].iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(tier1, vec!["manifesto", "principles"]);
        assert!(groups[&2].is_empty());
        assert_eq!(groups[&3].len(), 1);
    }

    #[test]
    fn test_load_page() {
        let temp = fixture();
        let library = Library::open(config(temp.path()));

        let page = library.load_page("about").unwrap();
        assert_eq!(page.title, "About SIL");
        assert_eq!(page.content.trim(), "About body.");

        assert!(library.load_page("contact").unwrap_err().is_not_found());
        assert!(library.load_page("../README").unwrap_err().is_not_found());
    }
}
