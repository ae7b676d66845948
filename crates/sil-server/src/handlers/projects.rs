//! Project catalog page.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;
use crate::template::{self, Layout, Section};

/// Handle GET /projects.
pub(crate) async fn get_projects(State(state): State<Arc<AppState>>) -> Html<String> {
    let layout = Layout {
        site_name: &state.info.name,
        title: "Projects",
        description: None,
        section: Section::Projects,
        docs_href: state.site.route_prefix(),
    };
    Html(template::render_page(&layout, &template::projects_body(&state.projects)))
}
