//! Content diagnostics for authors.

use std::collections::HashSet;
use std::path::PathBuf;

use sil_content::{ContentError, SlugCollision, Visibility, frontmatter};

use crate::link_map::LinkCollision;
use crate::site::Site;

/// A document whose frontmatter tier or order disagrees with the tier table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierMismatch {
    pub category: String,
    pub slug: String,
    pub path: PathBuf,
    /// `(tier, order)` declared in frontmatter; `None` where absent.
    pub declared: (Option<u8>, Option<i64>),
    /// `(tier, order)` the site actually uses.
    pub effective: (u8, u32),
}

/// A document that cannot be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenDocument {
    pub category: String,
    pub slug: String,
    pub reason: String,
}

/// Everything `check` found.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub slug_collisions: Vec<SlugCollision>,
    pub link_collisions: Vec<LinkCollision>,
    pub tier_mismatches: Vec<TierMismatch>,
    pub broken: Vec<BrokenDocument>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.slug_collisions.is_empty()
            && self.link_collisions.is_empty()
            && self.tier_mismatches.is_empty()
            && self.broken.is_empty()
    }
}

/// Inspect every discovered document, private ones included.
pub fn check(site: &Site) -> Diagnostics {
    let library = site.library();
    let mut diagnostics = Diagnostics {
        slug_collisions: library.index().collisions().to_vec(),
        link_collisions: site.link_collisions().to_vec(),
        ..Diagnostics::default()
    };

    let mut seen = HashSet::new();
    for (category, slugs) in library.index().categories() {
        for (slug, filename) in slugs.iter() {
            if !seen.insert((category, filename)) {
                continue;
            }
            let broken = |reason: String| BrokenDocument {
                category: category.to_owned(),
                slug: slug.to_owned(),
                reason,
            };

            let doc = match library.load(category, slug, Visibility::IncludePrivate) {
                Ok(doc) => doc,
                Err(ContentError::NotFound { .. }) => {
                    diagnostics.broken.push(broken(format!("{filename} is missing")));
                    continue;
                }
                Err(e) => {
                    diagnostics.broken.push(broken(e.to_string()));
                    continue;
                }
            };

            let declared = match std::fs::read_to_string(&doc.path) {
                Ok(text) => frontmatter::parse(&text).map(|p| (p.frontmatter.tier, p.frontmatter.order)),
                Err(e) => {
                    diagnostics.broken.push(broken(e.to_string()));
                    continue;
                }
            };
            let Ok(declared) = declared else {
                continue;
            };

            let tier_differs = declared.0.is_some_and(|tier| tier != doc.tier);
            let order_differs = declared.1.is_some_and(|order| order != i64::from(doc.order));
            if tier_differs || order_differs {
                diagnostics.tier_mismatches.push(TierMismatch {
                    category: category.to_owned(),
                    slug: slug.to_owned(),
                    path: doc.path.clone(),
                    declared,
                    effective: (doc.tier, doc.order),
                });
            }
        }
    }

    tracing::info!(
        slug_collisions = diagnostics.slug_collisions.len(),
        link_collisions = diagnostics.link_collisions.len(),
        tier_mismatches = diagnostics.tier_mismatches.len(),
        broken = diagnostics.broken.len(),
        "Content check finished"
    );
    diagnostics
}
