//! Site assembly.
//!
//! [`Site`] ties the document library to a shared renderer whose link map
//! is built from the same discovered slugs the library resolves.

use std::collections::BTreeMap;

use sil_content::{ContentError, Document, Library, LibraryConfig, Navigation, Page, Visibility};
use sil_renderer::{LinkMap, PageRenderer, RenderResult, TocEntry};

use crate::link_map::{LinkCollision, LinkMapConfig, build_link_map, doc_route};

/// Directory name used for links to the document index when the docs
/// root has no usable name.
const DEFAULT_ROOT_DIR: &str = "docs";

/// Configuration for [`Site`].
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub library: LibraryConfig,
    /// Route prefix of documents, e.g. `/docs`.
    pub route_prefix: String,
    /// Fixed filename-or-dir to route link entries.
    pub extra_links: BTreeMap<String, String>,
    /// Tier 3 entries shown in navigation.
    pub nav_reference_limit: usize,
}

/// A loaded document with its rendered body.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub document: Document,
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// A fixed page with its rendered body.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: Page,
    pub html: String,
}

/// Document library plus renderer, built once at startup.
pub struct Site {
    library: Library,
    renderer: PageRenderer<LinkMap>,
    link_collisions: Vec<LinkCollision>,
    route_prefix: String,
    nav_reference_limit: usize,
}

impl Site {
    /// Discover content and build the link map.
    pub fn open(config: SiteConfig) -> Self {
        let root_dir = config
            .library
            .docs_root
            .file_name()
            .map_or_else(|| DEFAULT_ROOT_DIR.to_owned(), |n| n.to_string_lossy().into_owned());
        let library = Library::open(config.library);

        let link_config = LinkMapConfig {
            route_prefix: &config.route_prefix,
            root_dir: &root_dir,
            overview_slug: &library.rules().overview_slug,
            extra_links: &config.extra_links,
        };
        let (links, link_collisions) = build_link_map(library.index(), &link_config);

        tracing::info!(
            links = links.len(),
            slug_collisions = library.index().collisions().len(),
            link_collisions = link_collisions.len(),
            "Site loaded"
        );

        Self {
            library,
            renderer: PageRenderer::new(links),
            link_collisions,
            route_prefix: config.route_prefix,
            nav_reference_limit: config.nav_reference_limit,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn renderer(&self) -> &PageRenderer<LinkMap> {
        &self.renderer
    }

    /// Link map entries dropped in favour of an earlier route.
    pub fn link_collisions(&self) -> &[LinkCollision] {
        &self.link_collisions
    }

    /// Prefix every document route lives under.
    pub fn route_prefix(&self) -> &str {
        &self.route_prefix
    }

    /// Route of a document.
    pub fn route(&self, slug: &str) -> String {
        doc_route(&self.route_prefix, slug)
    }

    /// Load and render a document by bare slug.
    pub fn document(&self, slug: &str) -> Result<RenderedDocument, ContentError> {
        let document = self.library.load_by_slug(slug, Visibility::Public)?;
        Ok(self.render_document(document))
    }

    /// Load and render a document from one category.
    pub fn document_in(&self, category: &str, slug: &str) -> Result<RenderedDocument, ContentError> {
        let document = self.library.load(category, slug, Visibility::Public)?;
        Ok(self.render_document(document))
    }

    /// Render an already loaded document.
    pub fn render_document(&self, document: Document) -> RenderedDocument {
        let RenderResult { html, toc, warnings } = self.renderer.render(&document.content);
        if !warnings.is_empty() {
            tracing::debug!(
                slug = %document.slug,
                unresolved = warnings.len(),
                "Document has unresolved links"
            );
        }
        RenderedDocument { document, html, toc }
    }

    /// Load and render a fixed page.
    pub fn page(&self, name: &str) -> Result<RenderedPage, ContentError> {
        let page = self.library.load_page(name)?;
        let html = self.renderer.render(&page.content).html;
        Ok(RenderedPage { page, html })
    }

    /// Visible documents grouped by tier, every tier in full.
    pub fn index(&self) -> BTreeMap<u8, Vec<Document>> {
        self.library.documents_by_tier(None, Visibility::Public)
    }

    /// Tiered navigation with a truncated reference tier.
    pub fn navigation(&self) -> Navigation {
        self.library.navigation(self.nav_reference_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sil_content::{Placement, SlugRules, TierTable};
    use std::fs;
    use std::path::Path;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site(root: &Path) -> Site {
        let tiers: TierTable = [
            ("manifesto".to_owned(), Placement::new(1, 2)),
            ("principles".to_owned(), Placement::new(1, 1)),
        ]
        .into_iter()
        .collect();
        Site::open(SiteConfig {
            library: LibraryConfig {
                docs_root: root.join("docs"),
                categories: vec!["canonical".to_owned(), "research".to_owned()],
                rules: SlugRules::default(),
                overrides: BTreeMap::new(),
                tiers,
                pages_dir: "pages".to_owned(),
            },
            route_prefix: "/docs".to_owned(),
            extra_links: BTreeMap::new(),
            nav_reference_limit: 5,
        })
    }

    fn fixture() -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        let docs = temp.path().join("docs");
        write(
            &docs,
            "canonical/SIL_MANIFESTO.md",
            "---\ntitle: The Manifesto\n---\n# The Manifesto\n\nSee [principles](SIL_PRINCIPLES.md#one) and [docs](../).\n",
        );
        write(&docs, "canonical/SIL_PRINCIPLES.md", "# Principles\n\n## One\n\nFirst.\n");
        write(&docs, "research/NOTES.md", "# Notes\n\nSee [missing](GONE.md).\n");
        write(&docs, "pages/about.md", "---\ntitle: About\n---\n# About\n\nWe build [tools](../canonical/).\n");
        temp
    }

    #[test]
    fn test_document_rendered_with_rewritten_links() {
        let temp = fixture();
        let site = site(temp.path());

        let rendered = site.document("manifesto").unwrap();

        assert_eq!(rendered.document.title, "The Manifesto");
        assert_eq!(
            rendered.html,
            r#"<p>See <a href="/docs/principles#one">principles</a> and <a href="../">docs</a>.</p>"#
        );
    }

    #[test]
    fn test_document_in_category() {
        let temp = fixture();
        let site = site(temp.path());

        let rendered = site.document_in("research", "notes").unwrap();
        assert!(rendered.html.contains(r#"<a href="GONE.md">missing</a>"#));

        let err = site.document_in("canonical", "notes").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_toc_from_rendered_document() {
        let temp = fixture();
        let site = site(temp.path());

        let rendered = site.document("principles").unwrap();
        assert_eq!(rendered.toc.len(), 1);
        assert_eq!(rendered.toc[0].id, "one");
    }

    #[test]
    fn test_page_rendered_without_heading() {
        let temp = fixture();
        let site = site(temp.path());

        let rendered = site.page("about").unwrap();
        assert_eq!(rendered.page.title, "About");
        assert_eq!(rendered.html, r#"<p>We build <a href="../canonical/">tools</a>.</p>"#);
        assert!(site.page("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_index_and_navigation() {
        let temp = fixture();
        let site = site(temp.path());

        let index = site.index();
        let essential: Vec<_> = index[&1].iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(essential, vec!["principles", "manifesto"]);
        assert_eq!(index[&3].len(), 1);

        let nav = site.navigation();
        assert_eq!(nav.essential.len(), 2);
        assert_eq!(nav.reference[0].slug, "notes");
        assert_eq!(site.route("notes"), "/docs/notes");
    }
}
