//! Sheet layout endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/sheets
pub async fn list(State(state): State<AppState>) -> Json<SheetsResponse> {
    let session = state.session.lock().await;
    Json(SheetsResponse::of(&session))
}

/// PUT /api/sheets/backing
///
/// Image is a URL or data URL. A blank image clears it.
pub async fn set_backing(
    State(state): State<AppState>,
    Json(req): Json<BackingRequest>,
) -> Json<SheetsResponse> {
    let mut session = state.session.lock().await;
    session.set_backing_image(Some(req.image));
    tracing::info!(
        "Backing image {}",
        if session.layout().backing_image().is_some() { "set" } else { "cleared" }
    );
    Json(SheetsResponse::of(&session))
}

/// DELETE /api/sheets/backing
pub async fn clear_backing(State(state): State<AppState>) -> Json<SheetsResponse> {
    let mut session = state.session.lock().await;
    session.set_backing_image(None);
    tracing::info!("Backing image cleared");
    Json(SheetsResponse::of(&session))
}

/// PUT /api/sheets/mirror
pub async fn set_mirror(
    State(state): State<AppState>,
    Json(req): Json<MirrorRequest>,
) -> Json<SheetsResponse> {
    let mut session = state.session.lock().await;
    session.set_mirror_backing(req.mirror);
    Json(SheetsResponse::of(&session))
}

/// PUT /api/sheets/capacity
pub async fn set_capacity(
    State(state): State<AppState>,
    Json(req): Json<PageCapacityRequest>,
) -> Result<Json<SheetsResponse>> {
    let mut session = state.session.lock().await;
    session.set_page_capacity(req.page_capacity)?;
    Ok(Json(SheetsResponse::of(&session)))
}
