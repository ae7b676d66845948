//! Markdown rendering for site documents.
//!
//! Converts document bodies to HTML with pulldown-cmark:
//!
//! - the frontmatter block and the first `# ` heading are removed, since
//!   the page layout supplies its own title
//! - headings get unique ids, levels 2-4 feed the table of contents
//! - internal `.md` and directory links are rewritten through a [`LinkMap`];
//!   targets missing from the map are left as authored and reported
//!
//! # Quick Start
//!
//! ```
//! use sil_renderer::{LinkMap, PageRenderer};
//!
//! let mut links = LinkMap::new("docs", "/docs");
//! links.insert_file("SIL_MANIFESTO.md", "/docs/manifesto").unwrap();
//!
//! let renderer = PageRenderer::new(links);
//! let result = renderer.render("# Title\n\nRead [this](SIL_MANIFESTO.md).");
//! assert_eq!(result.html, r#"<p>Read <a href="/docs/manifesto">this</a>.</p>"#);
//! ```

mod html;
mod links;
mod preprocess;
mod renderer;
mod state;

pub use links::{LinkMap, LinkResolver, NoLinks, Rewrite};
pub use preprocess::{strip_first_h1, strip_frontmatter};
pub use renderer::{MarkdownRenderer, PageRenderer, RenderResult, parser_options};
pub use state::{TocEntry, escape_html, slugify};
