//! HTML templates.
//!
//! Every page shares one layout: a header with the site name and the main
//! sections, the page body, and a footer. Bodies are built per route. All
//! interpolated text goes through [`escape`]; rendered markdown is inserted
//! as-is.

use std::collections::BTreeMap;
use std::fmt::Write;

use axum::http::StatusCode;
use sil_content::{Document, NavEntry, Navigation, Project, ProjectCatalog};
use sil_renderer::{TocEntry, escape_html as escape};
use sil_site::{RenderedDocument, RenderedPage};

/// Stylesheet linked from every page.
const STYLESHEET: &str = "/static/css/style.css";

/// Top-level section a page belongs to, highlighted in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Home,
    Docs,
    Projects,
    About,
    Contact,
    Other,
}

/// Header links in display order.
const SECTIONS: [(Section, &str); 5] = [
    (Section::Home, "Home"),
    (Section::Docs, "Docs"),
    (Section::Projects, "Projects"),
    (Section::About, "About"),
    (Section::Contact, "Contact"),
];

impl Section {
    /// Section of a fixed page.
    pub(crate) fn for_page(name: &str) -> Self {
        match name {
            "home" => Self::Home,
            "about" => Self::About,
            "contact" => Self::Contact,
            _ => Self::Other,
        }
    }

    /// Header link target. The docs index follows the configured route prefix.
    fn href<'a>(self, docs_href: &'a str) -> &'a str {
        match self {
            Self::Home | Self::Other => "/",
            Self::Docs => docs_href,
            Self::Projects => "/projects",
            Self::About => "/about",
            Self::Contact => "/contact",
        }
    }
}

/// Data for the shared layout.
pub(crate) struct Layout<'a> {
    pub site_name: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub section: Section,
    pub docs_href: &'a str,
}

/// Render a complete HTML page around `body`.
pub(crate) fn render_page(layout: &Layout<'_>, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 2048);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if layout.title == layout.site_name {
        let _ = writeln!(html, "<title>{}</title>", escape(layout.site_name));
    } else {
        let _ = writeln!(
            html,
            "<title>{} | {}</title>",
            escape(layout.title),
            escape(layout.site_name)
        );
    }
    if let Some(description) = layout.description {
        let _ = writeln!(html, "<meta name=\"description\" content=\"{}\">", escape(description));
    }
    let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{STYLESHEET}\">");
    html.push_str("</head>\n<body>\n");

    render_header(&mut html, layout);

    html.push_str("<main class=\"site-main\">\n");
    html.push_str(body);
    html.push_str("\n</main>\n");

    let _ = writeln!(
        html,
        "<footer class=\"site-footer\"><p>{}</p></footer>",
        escape(layout.site_name)
    );
    html.push_str("</body>\n</html>");
    html
}

fn render_header(html: &mut String, layout: &Layout<'_>) {
    html.push_str("<header class=\"site-header\">\n");
    let _ = writeln!(html, "<a href=\"/\" class=\"site-name\">{}</a>", escape(layout.site_name));
    html.push_str("<nav class=\"site-nav\">\n<ul>\n");
    for (section, label) in SECTIONS {
        let href = escape(section.href(layout.docs_href));
        if section == layout.section {
            let _ = writeln!(html, "<li><a href=\"{href}\" class=\"active\" aria-current=\"page\">{label}</a></li>");
        } else {
            let _ = writeln!(html, "<li><a href=\"{href}\">{label}</a></li>");
        }
    }
    html.push_str("</ul>\n</nav>\n</header>\n");
}

/// Heading of a navigation tier.
fn tier_label(tier: u8) -> &'static str {
    match tier {
        1 => "Start Here",
        2 => "Architecture",
        3 => "Reference",
        _ => "Other",
    }
}

/// Body of a fixed page.
pub(crate) fn page_body(rendered: &RenderedPage) -> String {
    let mut html = String::with_capacity(rendered.html.len() + 256);
    html.push_str("<article class=\"page\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape(&rendered.page.title));
    if let Some(description) = &rendered.page.description {
        let _ = writeln!(html, "<p class=\"lead\">{}</p>", escape(description));
    }
    html.push_str(&rendered.html);
    html.push_str("\n</article>");
    html
}

/// Body of a document page: tier navigation, article and table of contents.
pub(crate) fn document_body(
    rendered: &RenderedDocument,
    nav: &Navigation,
    index_href: &str,
    route: impl Fn(&str) -> String,
) -> String {
    let doc = &rendered.document;
    let mut html = String::with_capacity(rendered.html.len() + 4096);
    html.push_str("<div class=\"doc-layout\">\n");

    render_doc_nav(&mut html, nav, &doc.slug, index_href, &route);

    html.push_str("<article class=\"doc\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape(&doc.title));
    if let Some(description) = &doc.description {
        let _ = writeln!(html, "<p class=\"lead\">{}</p>", escape(description));
    }
    let _ = writeln!(
        html,
        "<p class=\"doc-meta\"><span class=\"tier tier-{}\">{}</span> <span class=\"words\">{} words</span></p>",
        doc.tier,
        tier_label(doc.tier),
        doc.word_count()
    );
    html.push_str("<div class=\"doc-content\">\n");
    html.push_str(&rendered.html);
    html.push_str("\n</div>\n</article>\n");

    render_toc(&mut html, &rendered.toc);

    html.push_str("</div>");
    html
}

fn render_doc_nav(
    html: &mut String,
    nav: &Navigation,
    current: &str,
    index_href: &str,
    route: &impl Fn(&str) -> String,
) {
    html.push_str("<aside class=\"doc-nav\">\n<nav>\n");
    for (tier, entries) in [(1, &nav.essential), (2, &nav.architecture), (3, &nav.reference)] {
        if entries.is_empty() {
            continue;
        }
        let _ = writeln!(html, "<h2>{}</h2>\n<ul>", tier_label(tier));
        render_nav_items(html, entries, current, route);
        if tier == 3 && nav.hidden_reference > 0 {
            let _ = writeln!(
                html,
                "<li class=\"more\"><a href=\"{}\">and {} more</a></li>",
                escape(index_href),
                nav.hidden_reference
            );
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</nav>\n</aside>\n");
}

fn render_nav_items(html: &mut String, entries: &[NavEntry], current: &str, route: &impl Fn(&str) -> String) {
    for entry in entries {
        let class = if entry.slug == current { " class=\"active\"" } else { "" };
        let _ = writeln!(
            html,
            "<li><a href=\"{}\"{class}>{}</a></li>",
            escape(&route(&entry.slug)),
            escape(&entry.title)
        );
    }
}

fn render_toc(html: &mut String, toc: &[TocEntry]) {
    if toc.is_empty() {
        return;
    }
    html.push_str("<aside class=\"toc\">\n<h2>On this page</h2>\n<ul>\n");
    for entry in toc {
        let _ = writeln!(
            html,
            "<li class=\"toc-{}\"><a href=\"#{}\">{}</a></li>",
            entry.level,
            escape(&entry.id),
            escape(&entry.title)
        );
    }
    html.push_str("</ul>\n</aside>\n");
}

/// Body of the document index, every tier in full.
pub(crate) fn index_body(groups: &BTreeMap<u8, Vec<Document>>, route: impl Fn(&str) -> String) -> String {
    let mut html = String::with_capacity(8192);
    html.push_str("<div class=\"doc-index\">\n<h1>Documentation</h1>\n");
    for (tier, docs) in groups {
        if docs.is_empty() {
            continue;
        }
        let _ = writeln!(
            html,
            "<section class=\"tier tier-{tier}\">\n<h2>{}</h2>\n<ul>",
            tier_label(*tier)
        );
        for doc in docs {
            let _ = write!(
                html,
                "<li><a href=\"{}\">{}</a>",
                escape(&route(&doc.slug)),
                escape(&doc.title)
            );
            if let Some(description) = &doc.description {
                let _ = write!(html, " <span class=\"description\">{}</span>", escape(description));
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n</section>\n");
    }
    html.push_str("</div>");
    html
}

/// Body of the projects page, grouped by layer.
pub(crate) fn projects_body(catalog: &ProjectCatalog) -> String {
    let mut html = String::with_capacity(8192);
    html.push_str("<div class=\"projects\">\n<h1>Projects</h1>\n");
    let layers = catalog.public_by_layer();
    if layers.is_empty() {
        html.push_str("<p>No projects published yet.</p>\n");
    }
    for (layer, projects) in layers {
        let _ = writeln!(html, "<section class=\"layer\">\n<h2>{}</h2>", escape(layer.label()));
        for project in projects {
            render_project(&mut html, project);
        }
        html.push_str("</section>\n");
    }
    html.push_str("</div>");
    html
}

fn render_project(html: &mut String, project: &Project) {
    let _ = writeln!(
        html,
        "<article class=\"project\" id=\"{}\">\n<h3>{} <span class=\"status status-{status}\">{status}</span></h3>",
        escape(&project.slug),
        escape(&project.name),
        status = project.status.as_str()
    );
    let _ = writeln!(html, "<p>{}</p>", escape(&project.description));
    if let Some(note) = &project.maturity_note {
        let _ = writeln!(html, "<p class=\"maturity\">{}</p>", escape(note));
    }

    if project.has_stats() || project.version.is_some() {
        html.push_str("<ul class=\"stats\">\n");
        if let Some(version) = &project.version {
            let _ = writeln!(html, "<li>v{}</li>", escape(version));
        }
        if let Some(tests) = project.tests {
            let _ = writeln!(html, "<li>{tests} tests</li>");
        }
        if let Some(coverage) = project.coverage {
            let _ = writeln!(html, "<li>{coverage}% coverage</li>");
        }
        html.push_str("</ul>\n");
    }

    render_list(html, "Innovations", &project.innovations);
    render_list(html, "Use cases", &project.use_cases);

    let links: Vec<_> = [("GitHub", &project.github_url), ("PyPI", &project.pypi_url)]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|url| (label, url)))
        .collect();
    if !links.is_empty() {
        html.push_str("<p class=\"links\">");
        for (label, url) in links {
            let _ = write!(html, "<a href=\"{}\">{label}</a> ", escape(url));
        }
        html.push_str("</p>\n");
    }
    html.push_str("</article>\n");
}

fn render_list(html: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(html, "<h4>{title}</h4>\n<ul>");
    for item in items {
        let _ = writeln!(html, "<li>{}</li>", escape(item));
    }
    html.push_str("</ul>\n");
}

/// Minimal standalone page for error responses.
pub(crate) fn error_page(status: StatusCode) -> String {
    let (title, message) = if status == StatusCode::NOT_FOUND {
        ("Page not found", "The page you are looking for does not exist.")
    } else {
        ("Something went wrong", "The page could not be displayed. Please try again later.")
    };

    let mut html = String::with_capacity(512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{STYLESHEET}\">");
    html.push_str("</head>\n<body>\n<main class=\"site-main error\">\n");
    let _ = writeln!(html, "<h1>{} {title}</h1>", status.as_u16());
    let _ = writeln!(html, "<p>{message}</p>");
    html.push_str("<p><a href=\"/\">Back to home</a></p>\n");
    html.push_str("</main>\n</body>\n</html>");
    html
}
