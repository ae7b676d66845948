//! Link map construction from discovered content.

use std::collections::BTreeMap;

use sil_content::{ContentIndex, SlugMap};
use sil_renderer::LinkMap;

/// A filename or directory that two sources mapped to different routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCollision {
    /// Filename or `dir/` key.
    pub key: String,
    /// Route that was kept.
    pub kept: String,
    /// Route that was discarded.
    pub dropped: String,
}

/// Inputs for [`build_link_map`].
#[derive(Debug, Clone)]
pub struct LinkMapConfig<'a> {
    /// Route prefix of documents, e.g. `/docs`.
    pub route_prefix: &'a str,
    /// Directory name that links to the document index.
    pub root_dir: &'a str,
    /// Slug of category overview documents.
    pub overview_slug: &'a str,
    /// Fixed filename-or-dir to route entries, inserted first.
    pub extra_links: &'a BTreeMap<String, String>,
}

/// Build the link map from every category's slug map.
///
/// Fixed entries go in first, then categories in configured order. A
/// filename already present keeps its first route.
pub fn build_link_map(index: &ContentIndex, config: &LinkMapConfig<'_>) -> (LinkMap, Vec<LinkCollision>) {
    let mut map = LinkMap::new(config.root_dir, config.route_prefix);
    let mut collisions = Vec::new();

    let mut insert = |map: &mut LinkMap, key: &str, route: String, is_dir: bool| {
        let result = if is_dir {
            map.insert_dir(key, route.clone())
        } else {
            map.insert_file(key, route.clone())
        };
        if let Err(kept) = result
            && kept != route
        {
            tracing::warn!(key, kept, dropped = %route, "Link map collision");
            collisions.push(LinkCollision {
                key: key.to_owned(),
                kept: kept.to_owned(),
                dropped: route,
            });
        }
    };

    for (key, route) in config.extra_links {
        let is_dir = key.ends_with('/');
        insert(&mut map, key, route.clone(), is_dir);
    }

    for (category, slugs) in index.categories() {
        for (slug, filename) in slugs.iter() {
            insert(&mut map, filename, doc_route(config.route_prefix, slug), false);
        }
        if let Some(slug) = directory_target(category, slugs, config.overview_slug) {
            insert(&mut map, category, doc_route(config.route_prefix, &slug), true);
        }
    }

    tracing::debug!(entries = map.len(), collisions = collisions.len(), "Link map built");
    (map, collisions)
}

/// Slug a category directory link points at.
///
/// `{category}-overview`, then a document named after the category, then
/// the category's own overview document.
fn directory_target(category: &str, slugs: &SlugMap, overview_slug: &str) -> Option<String> {
    let prefixed = format!("{category}-{overview_slug}");
    if slugs.contains(&prefixed) {
        return Some(prefixed);
    }
    [category, overview_slug]
        .into_iter()
        .find(|candidate| slugs.contains(candidate))
        .map(str::to_owned)
}

/// Route of a document slug.
pub fn doc_route(route_prefix: &str, slug: &str) -> String {
    format!("{route_prefix}/{slug}")
}
