//! HTML fragments for block-level elements.

use std::fmt::Write;

use crate::state::escape_html;

pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    if let Some(lang) = lang {
        let _ = write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        );
    } else {
        let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(content));
    }
}

pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    let _ = write!(
        out,
        r#"<img src="{}"{title_attr} alt="{}">"#,
        escape_html(src),
        escape_html(alt)
    );
}

pub(crate) fn link_open(href: &str, title: &str) -> String {
    if title.is_empty() {
        format!(r#"<a href="{}">"#, escape_html(href))
    } else {
        format!(r#"<a href="{}" title="{}">"#, escape_html(href), escape_html(title))
    }
}

pub(crate) fn task_list_marker(checked: bool, out: &mut String) {
    out.push_str(if checked {
        r#"<input type="checkbox" checked disabled> "#
    } else {
        r#"<input type="checkbox" disabled> "#
    });
}
