//! Deck loading endpoints

use axum::{extract::State, http::StatusCode, Json};
use cardsheet_core::{loader, merge_sources};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

fn describe(skipped: &[SkippedSource]) -> String {
    skipped
        .iter()
        .map(|s| format!("{}: {}", s.source, s.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// POST /api/deck/example
///
/// With no classes, loads the bundled example deck. Otherwise merges the card
/// lists of the given classes from the card directory.
pub async fn load_example(
    State(state): State<AppState>,
    Json(req): Json<ExampleRequest>,
) -> Result<Json<LoadResponse>> {
    if req.classes.is_empty() {
        let cards = loader::example_deck()?;
        let mut session = state.session.lock().await;
        state.drafts.cancel();
        let loaded = session.replace_cards(cards);
        tracing::info!("Loaded example deck with {} cards", loaded);

        return Ok(Json(LoadResponse {
            loaded,
            skipped: Vec::new(),
            summary: SheetSummary::of(&session),
        }));
    }

    let registry = state.session.lock().await.registry().clone();
    let read = state.library.read_classes(&registry, &req.classes).await;
    let mut skipped: Vec<SkippedSource> = read
        .failures
        .iter()
        .map(|(class, e)| SkippedSource {
            source: class.clone(),
            reason: e.to_string(),
        })
        .collect();

    let report = merge_sources(read.sources);
    skipped.extend(report.failures.iter().map(|f| SkippedSource {
        source: f.tag.clone(),
        reason: f.error.to_string(),
    }));
    if report.cards.is_empty() {
        tracing::warn!("No cards found for classes {:?}", req.classes);
        return Err(ApiError::Structural(if skipped.is_empty() {
            "no cards found for the selected classes".to_string()
        } else {
            format!("no cards found for the selected classes ({})", describe(&skipped))
        }));
    }

    let mut session = state.session.lock().await;
    state.drafts.cancel();
    let (loaded, _) = session.load_merged(report)?;
    tracing::info!(
        "Loaded {} cards from {} classes ({} skipped)",
        loaded,
        req.classes.len(),
        skipped.len()
    );

    Ok(Json(LoadResponse {
        loaded,
        skipped,
        summary: SheetSummary::of(&session),
    }))
}

/// POST /api/deck/catalog
pub async fn load_catalog(
    State(state): State<AppState>,
    Json(req): Json<CatalogRequest>,
) -> Result<Json<LoadResponse>> {
    let class = req.class.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let import = state.catalog.import_spells(class).await;
    let skipped: Vec<SkippedSource> = import
        .errors
        .into_iter()
        .map(|reason| SkippedSource {
            source: "catalog".to_string(),
            reason,
        })
        .collect();

    if import.cards.is_empty() {
        return Err(if skipped.is_empty() {
            ApiError::Structural("no spells found in the catalog".to_string())
        } else {
            ApiError::Fetch(describe(&skipped))
        });
    }

    let mut session = state.session.lock().await;
    state.drafts.cancel();
    let loaded = session.replace_cards(import.cards);
    tracing::info!("Imported {} spells from the catalog", loaded);

    Ok(Json(LoadResponse {
        loaded,
        skipped,
        summary: SheetSummary::of(&session),
    }))
}

/// POST /api/deck/saved
///
/// Body is the YAML text of a previously exported deck.
pub async fn load_saved(State(state): State<AppState>, body: String) -> Result<Json<LoadResponse>> {
    let mut session = state.session.lock().await;
    let loaded = session.load_saved(&body)?;
    state.drafts.cancel();
    tracing::info!("Loaded saved deck with {} cards", loaded);

    Ok(Json(LoadResponse {
        loaded,
        skipped: Vec::new(),
        summary: SheetSummary::of(&session),
    }))
}

/// GET /api/deck/text
///
/// The whole deck as editable YAML, filters ignored.
pub async fn get_text(State(state): State<AppState>) -> Result<Json<DeckTextResponse>> {
    let session = state.session.lock().await;
    let text = session.export_all()?;
    Ok(Json(DeckTextResponse { text }))
}

/// PUT /api/deck/text
pub async fn apply_text(State(state): State<AppState>, body: String) -> Result<Json<LoadResponse>> {
    let mut session = state.session.lock().await;
    state.drafts.cancel();
    let loaded = session.apply_text(&body)?;
    tracing::info!("Applied deck text with {} cards", loaded);

    Ok(Json(LoadResponse {
        loaded,
        skipped: Vec::new(),
        summary: SheetSummary::of(&session),
    }))
}

/// POST /api/deck/text/draft
pub async fn draft_text(
    State(state): State<AppState>,
    body: String,
) -> (StatusCode, Json<DraftResponse>) {
    let generation = state.drafts.schedule(state.session.clone(), body);
    tracing::debug!("Scheduled deck text draft {}", generation);

    (
        StatusCode::ACCEPTED,
        Json(DraftResponse {
            generation,
            delay_ms: state.drafts.delay_ms(),
        }),
    )
}
