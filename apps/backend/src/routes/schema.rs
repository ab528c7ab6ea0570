//! Schema endpoint

use axum::{extract::State, Json};

use crate::models::SchemaResponse;
use crate::AppState;

/// GET /api/schema
///
/// Card types with their field schemas, the class registry and level options.
pub async fn get(State(state): State<AppState>) -> Json<SchemaResponse> {
    let session = state.session.lock().await;
    Json(SchemaResponse::of(&session))
}
