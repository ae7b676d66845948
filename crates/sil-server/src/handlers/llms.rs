//! `llms.txt` and `llms-full.txt`, read from the static directory.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /llms.txt.
pub(crate) async fn get_llms(State(state): State<Arc<AppState>>) -> Result<Response, ServerError> {
    serve_text(&state, "llms.txt").await
}

/// Handle GET /llms-full.txt.
pub(crate) async fn get_llms_full(State(state): State<Arc<AppState>>) -> Result<Response, ServerError> {
    serve_text(&state, "llms-full.txt").await
}

async fn serve_text(state: &AppState, name: &str) -> Result<Response, ServerError> {
    let path = state.static_dir.join(name);
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ServerError::NotFound(name.to_owned()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response())
}
