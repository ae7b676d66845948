//! Content layer for the SIL website.
//!
//! Markdown documents live in flat category directories below a docs root.
//! This crate derives slugs from filenames, discovers each category once at
//! startup, loads documents with their frontmatter and classifies them into
//! navigation tiers.
//!
//! # Example
//!
//! ```ignore
//! use sil_content::{Library, LibraryConfig, Visibility};
//!
//! let library = Library::open(config);
//! let doc = library.load_by_slug("manifesto", Visibility::Public)?;
//! println!("{} ({} words)", doc.title, doc.word_count());
//! ```

pub mod backfill;
mod document;
mod error;
pub mod frontmatter;
mod index;
mod library;
mod project;
mod slug;
mod tiers;

pub use document::{Document, first_heading};
pub use error::ContentError;
pub use frontmatter::{Frontmatter, FrontmatterError};
pub use index::{ContentIndex, Discoverer, SlugCollision, SlugMap};
pub use library::{Library, LibraryConfig, Page, ROOT_CATEGORY, Visibility};
pub use project::{Layer, Project, ProjectCatalog, ProjectError, ProjectStatus};
pub use slug::{CONTENT_EXTENSION, SlugRules, humanize_slug};
pub use tiers::{NavEntry, Navigation, Placement, TierTable, group_by_tier};
