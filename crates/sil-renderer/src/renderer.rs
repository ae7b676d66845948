//! Markdown to HTML rendering.
//!
//! [`PageRenderer`] is the long-lived, shareable entry point. Each call to
//! [`PageRenderer::render`] builds a fresh [`MarkdownRenderer`], so no parse
//! state survives between documents.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::html;
use crate::links::{LinkMap, LinkResolver, Rewrite};
use crate::preprocess::{strip_first_h1, strip_frontmatter};
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, TocEntry, escape_html};

/// Heading levels listed in the table of contents.
const TOC_LEVELS: std::ops::RangeInclusive<u8> = 2..=4;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Table of contents entries (levels 2-4).
    pub toc: Vec<TocEntry>,
    /// Link targets that looked internal but had no route.
    pub warnings: Vec<String>,
}

/// Parser options used for every document.
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Shareable document renderer.
///
/// Strips frontmatter and the first `# ` heading, converts the rest to HTML
/// and rewrites internal links through the resolver.
pub struct PageRenderer<L = LinkMap> {
    links: L,
}

impl<L: LinkResolver> PageRenderer<L> {
    pub fn new(links: L) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &L {
        &self.links
    }

    /// Render a document body.
    pub fn render(&self, markdown: &str) -> RenderResult {
        let body = strip_first_h1(strip_frontmatter(markdown));
        let parser = Parser::new_ext(&body, parser_options());
        MarkdownRenderer::new(&self.links).render(parser)
    }
}

/// Single-use event renderer.
///
/// Consumed by [`render`](Self::render).
pub struct MarkdownRenderer<'l, L: ?Sized> {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    pending_image: Option<(String, String)>,
    links: &'l L,
    warnings: Vec<String>,
}

impl<'l, L: LinkResolver + ?Sized> MarkdownRenderer<'l, L> {
    pub fn new(links: &'l L) -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::new(TOC_LEVELS),
            pending_image: None,
            links,
            warnings: Vec::new(),
        }
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: self.output,
            toc: self.heading.take_toc(),
            warnings: self.warnings,
        }
    }

    /// Push content to output or heading buffer based on context.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => self.output.push_str(&html),
            Event::InlineHtml(html) => self.push_inline(&html),
            Event::SoftBreak => self.push_inline("\n"),
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => html::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the id is known.
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    let _ = write!(self.output, r#"<ol start="{n}">"#);
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let _ = write!(self.output, "<{tag}{align}>");
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link { dest_url, title, .. } => {
                let href = self.rewrite_link(&dest_url);
                let open = html::link_open(&href, &title);
                self.push_inline(&open);
            }
            Tag::Image { dest_url, title, .. } => {
                // Alt text is collected until the end tag.
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete_heading() {
                    let _ = write!(self.output, r#"<h{level} id="{id}">{}</h{level}>"#, html.trim());
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                html::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(ordered) => self.output.push_str(if ordered { "</ol>" } else { "</ul>" }),
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() { "</th>" } else { "</td>" });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    html::image(&src, &alt, &title, &mut self.output);
                }
            }
        }
    }

    fn rewrite_link(&mut self, href: &str) -> String {
        match self.links.resolve(href) {
            Rewrite::Unchanged => href.to_owned(),
            Rewrite::Rewritten(route) => route,
            Rewrite::Miss => {
                tracing::warn!(href, "Link target not in link map, leaving as authored");
                self.warnings.push(format!("Unresolved link: {href}"));
                href.to_owned()
            }
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        let html = format!("<code>{}</code>", escape_html(code));
        if self.image.is_active() {
            self.image.push_str(code);
        } else if self.heading.is_active() {
            self.heading.push_text(code);
            self.heading.push_html(&html);
        } else {
            self.output.push_str(&html);
        }
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::NoLinks;
    use pretty_assertions::assert_eq;

    fn link_map() -> LinkMap {
        let mut map = LinkMap::new("docs", "/docs");
        map.insert_file("SIL_MANIFESTO.md", "/docs/manifesto").unwrap();
        map.insert_dir("canonical", "/docs/canonical-overview").unwrap();
        map
    }

    fn render(markdown: &str) -> RenderResult {
        PageRenderer::new(link_map()).render(markdown)
    }

    #[test]
    fn test_leading_h1_removed() {
        let result = render("# Title\n\n## Section\n\nBody text.\n");

        assert!(!result.html.contains("<h1"));
        assert_eq!(result.html.matches("<h2").count(), 1);
        assert_eq!(
            result.html,
            r#"<h2 id="section">Section</h2><p>Body text.</p>"#
        );
    }

    #[test]
    fn test_frontmatter_stripped_before_heading() {
        let result = render("---\ntitle: Manifesto\n---\n# Manifesto\n\nIntro.\n");
        assert_eq!(result.html, "<p>Intro.</p>");
    }

    #[test]
    fn test_link_rewritten_once_with_fragment() {
        let result = render("See [the manifesto](../canonical/SIL_MANIFESTO.md#principles).\n");

        assert_eq!(
            result.html,
            r#"<p>See <a href="/docs/manifesto#principles">the manifesto</a>.</p>"#
        );
        assert_eq!(result.html.matches("/docs/manifesto").count(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_unmatched_link_left_as_authored() {
        let result = render("[old](../archive/OLD_NOTES.md#x)\n");

        assert_eq!(
            result.html,
            r#"<p><a href="../archive/OLD_NOTES.md#x">old</a></p>"#
        );
        assert_eq!(result.warnings, vec!["Unresolved link: ../archive/OLD_NOTES.md#x".to_owned()]);
    }

    #[test]
    fn test_directory_and_external_links() {
        let result = render("[c](../canonical/) [e](https://example.com) [a](#top)\n");
        assert!(result.html.contains(r#"<a href="/docs/canonical-overview">c</a>"#));
        assert!(result.html.contains(r#"<a href="https://example.com">e</a>"#));
        assert!(result.html.contains(r##"<a href="#top">a</a>"##));
    }

    #[test]
    fn test_toc_levels_two_to_four() {
        let result = render("## Two\n### Three\n#### Four\n##### Five\n");
        let levels: Vec<_> = result.toc.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![2, 3, 4]);
        assert!(result.html.contains(r#"<h5 id="five">Five</h5>"#));
        assert!(!result.html.contains("¶"));
    }

    #[test]
    fn test_successive_renders_do_not_share_state() {
        let renderer = PageRenderer::new(link_map());

        let first = renderer.render("## Setup\n\n[m](SIL_MANIFESTO.md)\n\n```rust\nfn a() {}\n");
        let second = renderer.render("## Setup\n\nPlain.\n");

        assert_eq!(second.html, r#"<h2 id="setup">Setup</h2><p>Plain.</p>"#);
        assert_eq!(second.toc.len(), 1);
        assert_eq!(second.toc[0].id, "setup");
        assert!(first.html.contains("fn a() {}"));
        assert!(!second.html.contains("manifesto"));
    }

    #[test]
    fn test_hard_break_and_code() {
        let result = PageRenderer::new(NoLinks).render("line one  \nline two\n\n```\nx < y\n```\n");
        assert_eq!(
            result.html,
            "<p>line one<br>line two</p><pre><code>x &lt; y\n</code></pre>"
        );
    }

    #[test]
    fn test_table_and_task_list() {
        let result = PageRenderer::new(NoLinks).render("| a | b |\n|:--|--:|\n| 1 | 2 |\n\n- [x] done\n");
        assert!(result.html.contains(r#"<th style="text-align:left">a</th>"#));
        assert!(result.html.contains(r#"<td style="text-align:right">2</td>"#));
        assert!(result.html.contains(r#"<input type="checkbox" checked disabled> done"#));
    }
}
