//! Export endpoints

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};

use crate::error::{ApiError, Result};
use crate::services::render;
use crate::AppState;

/// GET /api/export/deck
///
/// Saves the cards currently on the sheets, in display order.
pub async fn deck(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let session = state.session.lock().await;
    let text = session.export_visible()?;
    let filename = format!("saved_cards_{}.yml", chrono::Local::now().format("%Y-%m-%d"));
    tracing::info!("Exported {} cards to {}", session.visible().len(), filename);

    Ok((
        [
            (header::CONTENT_TYPE, "application/yaml".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        text,
    ))
}

/// GET /api/export/document
pub async fn document(State(state): State<AppState>) -> Result<Html<String>> {
    let session = state.session.lock().await;
    if session.sheets().is_empty() {
        return Err(ApiError::Validation("generate cards first".to_string()));
    }
    tracing::info!("Rendered document with {} sheets", session.sheets().len());
    Ok(Html(render::render_document(&session).into_string()))
}
