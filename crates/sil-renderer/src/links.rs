//! Link map and internal link rewriting.
//!
//! The map has two namespaces sharing one table: bare filenames
//! (`SIL_MANIFESTO.md`) and directory names with a trailing slash
//! (`canonical/`). File links are looked up by their last path segment,
//! directory links by their last directory name.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Outcome of resolving a link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Not an internal content link; leave as authored.
    Unchanged,
    /// Internal link mapped to a site route.
    Rewritten(String),
    /// Internal-looking link with no entry in the map.
    Miss,
}

/// Resolves link targets while rendering.
pub trait LinkResolver {
    fn resolve(&self, href: &str) -> Rewrite;
}

/// Resolver that leaves every link untouched.
pub struct NoLinks;

impl LinkResolver for NoLinks {
    fn resolve(&self, _href: &str) -> Rewrite {
        Rewrite::Unchanged
    }
}

/// File extensions that mark a relative link as a non-content file.
const NON_CONTENT_EXTENSIONS: &[&str] = &[".md", ".html", ".css", ".js", ".png", ".svg", ".jpg", ".gif"];

/// Filename and directory to route table.
#[derive(Debug, Clone)]
pub struct LinkMap {
    entries: HashMap<String, String>,
    root_dir: String,
    index_route: String,
}

impl LinkMap {
    /// Create an empty map.
    ///
    /// Directory links whose last segment is `root_dir` resolve to
    /// `index_route`.
    pub fn new(root_dir: impl Into<String>, index_route: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            root_dir: root_dir.into(),
            index_route: index_route.into(),
        }
    }

    /// Map a filename to a route. Returns the existing route if the
    /// filename is already taken.
    pub fn insert_file(&mut self, filename: &str, route: impl Into<String>) -> Result<(), &str> {
        self.insert(filename.to_owned(), route.into())
    }

    /// Map a directory name to a route. Returns the existing route if the
    /// directory is already taken.
    pub fn insert_dir(&mut self, dir: &str, route: impl Into<String>) -> Result<(), &str> {
        self.insert(dir_key(dir), route.into())
    }

    fn insert(&mut self, key: String, route: String) -> Result<(), &str> {
        match self.entries.entry(key) {
            Entry::Occupied(existing) => Err(existing.into_mut().as_str()),
            Entry::Vacant(slot) => {
                slot.insert(route);
                Ok(())
            }
        }
    }

    /// Route for a filename or `dir/` key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve_dir(&self, path: &str) -> Option<String> {
        let name = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
        if name == self.root_dir {
            return Some(self.index_route.clone());
        }
        self.get(&dir_key(name)).map(str::to_owned)
    }

    fn resolve_file(&self, href: &str) -> Option<String> {
        let last = href.rsplit('/').next().unwrap_or(href);
        let (filename, anchor) = match last.split_once('#') {
            Some((filename, anchor)) => (filename, Some(anchor)),
            None => (last, None),
        };
        let route = self.get(filename)?;
        Some(match anchor {
            Some(anchor) => format!("{route}#{anchor}"),
            None => route.to_owned(),
        })
    }
}

impl LinkResolver for LinkMap {
    fn resolve(&self, href: &str) -> Rewrite {
        let resolved = match classify(href) {
            LinkKind::External => return Rewrite::Unchanged,
            LinkKind::File => self.resolve_file(href),
            LinkKind::Directory => self.resolve_dir(href),
        };
        match resolved {
            Some(route) => {
                tracing::debug!(href, route = %route, "Link rewritten");
                Rewrite::Rewritten(route)
            }
            None => Rewrite::Miss,
        }
    }
}

fn dir_key(dir: &str) -> String {
    format!("{}/", dir.trim_end_matches('/'))
}

enum LinkKind {
    External,
    File,
    Directory,
}

fn classify(href: &str) -> LinkKind {
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("//")
        || href.starts_with("mailto:")
        || has_scheme(href)
    {
        return LinkKind::External;
    }

    let path = href.split(['#', '?']).next().unwrap_or_default();
    if ends_with_ignore_case(path, ".md") {
        return LinkKind::File;
    }
    if is_directory_link(path) {
        return LinkKind::Directory;
    }
    LinkKind::External
}

fn is_directory_link(path: &str) -> bool {
    if path.is_empty() || path.starts_with('/') {
        return false;
    }
    if NON_CONTENT_EXTENSIONS.iter().any(|ext| ends_with_ignore_case(path, ext)) {
        return false;
    }
    if path.ends_with('/') {
        return true;
    }
    path.contains('/') && path.rsplit('/').next().is_some_and(|last| !last.contains('.'))
}

/// `scheme:` prefix per RFC 3986.
fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.get(s.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map() -> LinkMap {
        let mut map = LinkMap::new("docs", "/docs");
        map.insert_file("SIL_MANIFESTO.md", "/docs/manifesto").unwrap();
        map.insert_file("SIL_PRINCIPLES.md", "/docs/principles").unwrap();
        map.insert_file("PROJECT_INDEX.md", "/projects").unwrap();
        map.insert_dir("canonical", "/docs/canonical-overview").unwrap();
        map.insert_dir("projects/", "/projects").unwrap();
        map
    }

    fn rewritten(route: &str) -> Rewrite {
        Rewrite::Rewritten(route.to_owned())
    }

    #[test]
    fn test_external_links_unchanged() {
        let map = map();
        for href in [
            "https://example.com/SIL_MANIFESTO.md",
            "http://example.com",
            "//cdn.example.com/x.md",
            "mailto:team@example.com",
            "#section",
            "ftp://host/file.md",
            "",
        ] {
            assert_eq!(map.resolve(href), Rewrite::Unchanged, "{href}");
        }
    }

    #[test]
    fn test_file_links() {
        let map = map();
        assert_eq!(map.resolve("SIL_MANIFESTO.md"), rewritten("/docs/manifesto"));
        assert_eq!(map.resolve("../canonical/SIL_PRINCIPLES.md"), rewritten("/docs/principles"));
        assert_eq!(map.resolve("./PROJECT_INDEX.md"), rewritten("/projects"));
    }

    #[test]
    fn test_file_link_keeps_anchor() {
        let map = map();
        assert_eq!(
            map.resolve("../canonical/SIL_MANIFESTO.md#core-principles"),
            rewritten("/docs/manifesto#core-principles")
        );
    }

    #[test]
    fn test_uppercase_extension_is_content() {
        let map = map();
        assert_eq!(map.resolve("MISSING.MD"), Rewrite::Miss);
    }

    #[test]
    fn test_file_miss() {
        let map = map();
        assert_eq!(map.resolve("UNKNOWN.md"), Rewrite::Miss);
        assert_eq!(map.resolve("UNKNOWN.md#x"), Rewrite::Miss);
    }

    #[test]
    fn test_directory_links() {
        let map = map();
        assert_eq!(map.resolve("../canonical/"), rewritten("/docs/canonical-overview"));
        assert_eq!(map.resolve("docs/canonical"), rewritten("/docs/canonical-overview"));
        assert_eq!(map.resolve("../projects/"), rewritten("/projects"));
        assert_eq!(map.resolve("../docs/"), rewritten("/docs"));
        assert_eq!(map.resolve("../essays/"), Rewrite::Miss);
    }

    #[test]
    fn test_non_directory_relative_links_unchanged() {
        let map = map();
        for href in ["/about", "images/diagram.png", "style.css", "canonical", "assets/app.js"] {
            assert_eq!(map.resolve(href), Rewrite::Unchanged, "{href}");
        }
    }

    #[test]
    fn test_first_insert_wins() {
        let mut map = map();
        assert_eq!(map.insert_file("SIL_MANIFESTO.md", "/docs/other"), Err("/docs/manifesto"));
        assert_eq!(map.insert_dir("canonical/", "/docs/other"), Err("/docs/canonical-overview"));
        assert_eq!(map.get("SIL_MANIFESTO.md"), Some("/docs/manifesto"));
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn test_no_links_resolver() {
        assert_eq!(NoLinks.resolve("SIL_MANIFESTO.md"), Rewrite::Unchanged);
    }
}
