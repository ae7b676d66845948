//! `robots.txt`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::SiteInfo;
use crate::state::AppState;

/// Handle GET /robots.txt.
pub(crate) async fn get_robots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&state.info),
    )
}

/// Staging keeps every crawler out; production allows all and points to the
/// sitemap.
fn robots_txt(info: &SiteInfo) -> String {
    if info.staging {
        "User-agent: *\nDisallow: /\n".to_owned()
    } else {
        format!("User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n", info.base_url)
    }
}
