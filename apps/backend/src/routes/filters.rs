//! Filter endpoints

use axum::{extract::State, Json};

use crate::models::*;
use crate::AppState;

fn filters_response(session: &EditorSession) -> FiltersResponse {
    FiltersResponse {
        selection: session.selection().clone(),
        summary: SheetSummary::of(session),
    }
}

/// GET /api/filters
pub async fn get(State(state): State<AppState>) -> Json<FiltersResponse> {
    let session = state.session.lock().await;
    Json(filters_response(&session))
}

/// PUT /api/filters
pub async fn replace(
    State(state): State<AppState>,
    Json(selection): Json<FilterSelection>,
) -> Json<FiltersResponse> {
    let mut session = state.session.lock().await;
    session.set_selection(selection);
    Json(filters_response(&session))
}

/// POST /api/filters/toggle
pub async fn toggle(
    State(state): State<AppState>,
    Json(toggle): Json<FilterToggle>,
) -> Json<FiltersResponse> {
    let mut session = state.session.lock().await;
    match toggle {
        FilterToggle::Class { class, selected } => session.toggle_class(&class, selected),
        FilterToggle::Level { level, selected } => session.toggle_level(level, selected),
        FilterToggle::CardType {
            card_type,
            selected,
        } => session.toggle_card_type(card_type, selected),
    }
    Json(filters_response(&session))
}
