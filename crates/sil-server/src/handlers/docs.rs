//! Document routes.
//!
//! Document pages carry an `ETag` derived from the application version and
//! the rendered HTML, and answer a matching `If-None-Match` with 304.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use md5::{Digest, Md5};
use sil_site::RenderedDocument;

use crate::error::ServerError;
use crate::state::AppState;
use crate::template::{self, Layout, Section};

/// Handle GET on the document route prefix.
pub(crate) async fn get_index(State(state): State<Arc<AppState>>) -> Html<String> {
    let groups = state.site.index();
    let body = template::index_body(&groups, |slug| state.site.route(slug));
    let layout = Layout {
        site_name: &state.info.name,
        title: "Documentation",
        description: None,
        section: Section::Docs,
        docs_href: state.site.route_prefix(),
    };
    Html(template::render_page(&layout, &body))
}

/// Handle GET {prefix}/{slug}.
pub(crate) async fn get_document(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let rendered = state.site.document(&slug)?;
    Ok(respond(&state, &rendered, &headers))
}

/// Handle GET {prefix}/{category}/{slug}.
pub(crate) async fn get_category_document(
    Path((category, slug)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let rendered = state.site.document_in(&category, &slug)?;
    Ok(respond(&state, &rendered, &headers))
}

fn respond(state: &AppState, rendered: &RenderedDocument, headers: &HeaderMap) -> Response {
    let doc = &rendered.document;
    let nav = state.site.navigation();
    let body = template::document_body(rendered, &nav, state.site.route_prefix(), |slug| state.site.route(slug));
    let layout = Layout {
        site_name: &state.info.name,
        title: &doc.title,
        description: doc.description.as_deref(),
        section: Section::Docs,
        docs_href: state.site.route_prefix(),
    };
    let html = template::render_page(&layout, &body);

    let etag = compute_etag(&state.version, &html);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    (
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "public, max-age=60".to_owned()),
        ],
        Html(html),
    )
        .into_response()
}

/// Compute a quoted ETag from version and content.
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}"));
    format!("\"{}\"", &hex::encode(hash)[..16])
}
