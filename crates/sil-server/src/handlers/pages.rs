//! Fixed pages: home, about, contact and any other file in the pages
//! directory.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;

use crate::error::ServerError;
use crate::state::AppState;
use crate::template::{self, Layout, Section};

/// Page served at `/`.
const HOME_PAGE: &str = "home";

/// Handle GET /.
pub(crate) async fn get_home(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    render(&state, HOME_PAGE)
}

/// Handle GET /{page}.
pub(crate) async fn get_page(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    // The home page has exactly one URL.
    if name == HOME_PAGE {
        return Err(ServerError::NotFound(name));
    }
    render(&state, &name)
}

fn render(state: &AppState, name: &str) -> Result<Html<String>, ServerError> {
    let rendered = state.site.page(name)?;
    let title = if name == HOME_PAGE {
        state.info.name.as_str()
    } else {
        rendered.page.title.as_str()
    };

    let layout = Layout {
        site_name: &state.info.name,
        title,
        description: rendered.page.description.as_deref(),
        section: Section::for_page(name),
        docs_href: state.site.route_prefix(),
    };
    Ok(Html(template::render_page(&layout, &template::page_body(&rendered))))
}
