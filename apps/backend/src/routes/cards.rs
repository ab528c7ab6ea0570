//! Card endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cardsheet_core::mutation;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

fn mutation_response(session: &EditorSession, id: CardId, outcome: MutationOutcome) -> MutationResponse {
    MutationResponse {
        outcome,
        card: CardView::find(session, id),
        summary: SheetSummary::of(session),
    }
}

/// GET /api/cards
pub async fn list(State(state): State<AppState>) -> Json<CardListResponse> {
    let session = state.session.lock().await;
    let cards = session
        .store()
        .iter()
        .map(|card| CardView::new(&session, card))
        .collect();
    Json(CardListResponse { cards })
}

/// GET /api/cards/visible
pub async fn visible(State(state): State<AppState>) -> Json<CardListResponse> {
    let session = state.session.lock().await;
    let cards = session
        .visible_cards()
        .into_iter()
        .map(|card| CardView::new(&session, card))
        .collect();
    Json(CardListResponse { cards })
}

/// GET /api/cards/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
) -> Result<Json<CardDetailResponse>> {
    let session = state.session.lock().await;
    let card = session
        .card(id)
        .ok_or_else(|| ApiError::NotFound(format!("card {}", id)))?;

    Ok(Json(CardDetailResponse {
        addable_fields: mutation::addable_fields(&card.record).into_iter().copied().collect(),
        present_fields: mutation::present_fields(&card.record).into_iter().copied().collect(),
        card: CardView::new(&session, card),
    }))
}

/// POST /api/cards
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let mut session = state.session.lock().await;
    let id = session.create(req.card_type, req.name.as_deref())?;
    tracing::debug!("Created {} card {}", req.card_type, id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            card: CardView::find(&session, id),
            summary: SheetSummary::of(&session),
        }),
    ))
}

/// POST /api/cards/{id}/fields
pub async fn add_field(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
    Json(req): Json<AddFieldRequest>,
) -> Result<Json<MutationResponse>> {
    let mut session = state.session.lock().await;
    let outcome = session.add_field(id, &req.key, &req.value)?;
    tracing::debug!("Add field {} on {}: {:?}", req.key, id, outcome);
    Ok(Json(mutation_response(&session, id, outcome)))
}

/// PUT /api/cards/{id}/fields/{key}
pub async fn edit_field(
    State(state): State<AppState>,
    Path((id, key)): Path<(CardId, String)>,
    Json(req): Json<FieldValueRequest>,
) -> Result<Json<MutationResponse>> {
    let mut session = state.session.lock().await;
    let outcome = session.edit_field(id, &key, &req.value)?;
    tracing::debug!("Edit field {} on {}: {:?}", key, id, outcome);
    Ok(Json(mutation_response(&session, id, outcome)))
}

/// DELETE /api/cards/{id}/fields/{key}
pub async fn remove_field(
    State(state): State<AppState>,
    Path((id, key)): Path<(CardId, String)>,
) -> Result<Json<MutationResponse>> {
    let mut session = state.session.lock().await;
    let outcome = session.remove_field(id, &key)?;
    tracing::debug!("Remove field {} on {}: {:?}", key, id, outcome);
    Ok(Json(mutation_response(&session, id, outcome)))
}

/// PUT /api/cards/{id}/classes
pub async fn set_classes(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
    Json(req): Json<ClassesRequest>,
) -> Result<Json<MutationResponse>> {
    let mut session = state.session.lock().await;
    let outcome = session.set_classes(id, req.classes)?;
    Ok(Json(mutation_response(&session, id, outcome)))
}

/// PUT /api/cards/{id}/level
pub async fn set_level(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
    Json(req): Json<LevelRequest>,
) -> Result<Json<MutationResponse>> {
    let mut session = state.session.lock().await;
    let outcome = session.set_level(id, req.level)?;
    Ok(Json(mutation_response(&session, id, outcome)))
}

/// PUT /api/cards/{id}/color
pub async fn recolor(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
    Json(req): Json<ColorRequest>,
) -> Result<Json<MutationResponse>> {
    let mut session = state.session.lock().await;
    let outcome = session.recolor(id, req.color.as_deref())?;
    Ok(Json(mutation_response(&session, id, outcome)))
}

/// POST /api/cards/{id}/duplicate
pub async fn duplicate(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let mut session = state.session.lock().await;
    let copy = session.duplicate(id)?;
    tracing::debug!("Duplicated card {} as {}", id, copy);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            card: CardView::find(&session, copy),
            summary: SheetSummary::of(&session),
        }),
    ))
}

/// DELETE /api/cards/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
) -> Result<Json<DeletedResponse>> {
    let mut session = state.session.lock().await;
    let deleted = session.delete(id)?;
    tracing::debug!("Deleted card {} ({})", id, deleted.name);

    Ok(Json(DeletedResponse {
        deleted,
        summary: SheetSummary::of(&session),
    }))
}
