//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::http::Uri;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::ServerError;
use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let prefix = state.site.route_prefix();
    let doc_routes = Router::new()
        .route(prefix, get(handlers::docs::get_index))
        .route(&format!("{prefix}/{{slug}}"), get(handlers::docs::get_document))
        .route(
            &format!("{prefix}/{{category}}/{{slug}}"),
            get(handlers::docs::get_category_document),
        );

    let text_routes = Router::new()
        .route("/health", get(handlers::health::get_health))
        .route("/robots.txt", get(handlers::robots::get_robots))
        .route("/llms.txt", get(handlers::llms::get_llms))
        .route("/llms-full.txt", get(handlers::llms::get_llms_full));

    Router::new()
        .route("/", get(handlers::pages::get_home))
        .route("/projects", get(handlers::projects::get_projects))
        .route("/{page}", get(handlers::pages::get_page))
        .merge(doc_routes)
        .merge(text_routes)
        .nest_service("/static", ServeDir::new(&state.static_dir))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer(&state.info))
                .layer(security::nosniff_layer())
                .layer(security::deny_framing_layer()),
        )
        .with_state(state)
}

async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(uri.path().to_owned())
}
