//! API request and response types

use serde::{Deserialize, Serialize};

pub use cardsheet_core::{
    CardId, CardRecord, CardType, ClassInfo, EditorSession, FieldSpec, FilterSelection,
    MutationOutcome, Sheet, StoredCard, MAX_LEVEL,
};

use crate::services::render::{card_subtitle, level_label, Subtitle};

// === Views ===

/// A card as shown to clients: its record plus the derived display data.
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub record: CardRecord,
    pub border_color: String,
    pub subtitle: Subtitle,
}

impl CardView {
    pub fn new(session: &EditorSession, card: &StoredCard) -> Self {
        Self {
            id: card.id,
            border_color: cardsheet_core::border_color(&card.record, session.registry()),
            subtitle: card_subtitle(&card.record),
            record: card.record.clone(),
        }
    }

    pub fn find(session: &EditorSession, id: CardId) -> Option<Self> {
        session.card(id).map(|card| Self::new(session, card))
    }
}

/// Sizes of the derived views after an operation.
#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    pub total_cards: usize,
    pub visible_cards: usize,
    /// Occupied slots per sheet, fronts first, backing sheets after.
    pub sheet_sizes: Vec<usize>,
    pub backing_sheets: usize,
}

impl SheetSummary {
    pub fn of(session: &EditorSession) -> Self {
        let sheets = session.sheets();
        Self {
            total_cards: session.store().len(),
            visible_cards: session.visible().len(),
            sheet_sizes: sheets.iter().map(Sheet::len).collect(),
            backing_sheets: sheets.iter().filter(|s| s.is_backing()).count(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SheetView {
    Front { cards: Vec<CardView> },
    Backing { front: usize, slots: usize },
}

#[derive(Debug, Serialize)]
pub struct SheetsResponse {
    pub page_capacity: usize,
    pub has_backing_image: bool,
    pub mirror_backing: bool,
    pub sheets: Vec<SheetView>,
    pub summary: SheetSummary,
}

impl SheetsResponse {
    pub fn of(session: &EditorSession) -> Self {
        let sheets = session
            .sheets()
            .iter()
            .map(|sheet| match sheet {
                Sheet::Front { cards } => SheetView::Front {
                    cards: cards
                        .iter()
                        .filter_map(|id| CardView::find(session, *id))
                        .collect(),
                },
                Sheet::Backing { front, slots } => SheetView::Backing {
                    front: *front,
                    slots: *slots,
                },
            })
            .collect();

        Self {
            page_capacity: session.layout().page_capacity(),
            has_backing_image: session.layout().backing_image().is_some(),
            mirror_backing: session.mirror_backing(),
            sheets,
            summary: SheetSummary::of(session),
        }
    }
}

// === Schema ===

#[derive(Debug, Serialize)]
pub struct CardTypeSchema {
    pub key: &'static str,
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug, Serialize)]
pub struct LevelOption {
    pub level: u8,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub card_types: Vec<CardTypeSchema>,
    pub classes: Vec<ClassInfo>,
    pub levels: Vec<LevelOption>,
}

impl SchemaResponse {
    pub fn of(session: &EditorSession) -> Self {
        Self {
            card_types: CardType::ALL
                .iter()
                .map(|t| CardTypeSchema {
                    key: t.key(),
                    label: t.label(),
                    fields: t.fields(),
                })
                .collect(),
            classes: session.registry().iter().cloned().collect(),
            levels: (0..=MAX_LEVEL)
                .map(|level| LevelOption {
                    level,
                    label: level_label(level),
                })
                .collect(),
        }
    }
}

// === Cards ===

#[derive(Debug, Serialize)]
pub struct CardListResponse {
    pub cards: Vec<CardView>,
}

/// A card with the field menus for editing it.
#[derive(Debug, Serialize)]
pub struct CardDetailResponse {
    pub card: CardView,
    pub addable_fields: Vec<FieldSpec>,
    pub present_fields: Vec<FieldSpec>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    pub card_type: CardType,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddFieldRequest {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct FieldValueRequest {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ClassesRequest {
    pub classes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LevelRequest {
    pub level: u8,
}

/// New border colour; `null` restores the class-derived colour.
#[derive(Debug, Deserialize)]
pub struct ColorRequest {
    #[serde(default)]
    pub color: Option<String>,
}

/// Result of an edit to one card.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub outcome: MutationOutcome,
    pub card: Option<CardView>,
    pub summary: SheetSummary,
}

/// Result of creating or duplicating a card.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub card: Option<CardView>,
    pub summary: SheetSummary,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: CardRecord,
    pub summary: SheetSummary,
}

// === Filters ===

#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub selection: FilterSelection,
    pub summary: SheetSummary,
}

/// One checkbox change in a filter checklist.
#[derive(Debug, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum FilterToggle {
    Class { class: String, selected: bool },
    Level { level: u8, selected: bool },
    CardType { card_type: CardType, selected: bool },
}

// === Deck loading ===

#[derive(Debug, Default, Deserialize)]
pub struct ExampleRequest {
    #[serde(default)]
    pub classes: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogRequest {
    #[serde(default)]
    pub class: Option<String>,
}

/// A source left out of a load, and why.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedSource {
    pub source: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub loaded: usize,
    pub skipped: Vec<SkippedSource>,
    pub summary: SheetSummary,
}

#[derive(Debug, Serialize)]
pub struct DeckTextResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub generation: u64,
    pub delay_ms: u64,
}

// === Sheets ===

#[derive(Debug, Deserialize)]
pub struct BackingRequest {
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct MirrorRequest {
    pub mirror: bool,
}

#[derive(Debug, Deserialize)]
pub struct PageCapacityRequest {
    pub page_capacity: usize,
}
