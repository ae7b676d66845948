//! Site assembly for the SIL website.
//!
//! This crate provides:
//! - [`Site`]: the document library plus a shared renderer whose link map
//!   is built from the discovered slugs
//! - [`build_link_map`]: filename and directory routes for link rewriting
//! - [`check`]: content diagnostics (slug and link collisions, tier
//!   disagreements, broken documents)

mod check;
mod link_map;
mod site;

pub use check::{BrokenDocument, Diagnostics, TierMismatch, check};
pub use link_map::{LinkCollision, LinkMapConfig, build_link_map, doc_route};
pub use site::{RenderedDocument, RenderedPage, Site, SiteConfig};

pub use sil_renderer::TocEntry;
