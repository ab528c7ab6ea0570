//! Editing session state.
//!
//! `EditorSession` owns the card store and everything derived from it. Every
//! change to cards, filters or page settings goes through the session, which
//! reruns the filter and layout engines in full before returning, so
//! `visible()` and `sheets()` never lag behind the store.

use crate::classes::ClassRegistry;
use crate::error::{CardError, Result};
use crate::filter::{self, FilterSelection};
use crate::layout::{self, Sheet, SheetLayout};
use crate::loader::{self, LoadReport, SourceFailure};
use crate::mutation::{self, MutationOutcome};
use crate::store::{CardStore, StoredCard};
use crate::types::{CardId, CardRecord, CardType};

#[derive(Debug, Clone)]
pub struct EditorSession {
    store: CardStore,
    selection: FilterSelection,
    registry: ClassRegistry,
    layout: SheetLayout,
    /// Flip backing sheets horizontally when printing. Not saved with the deck.
    mirror_backing: bool,
    visible: Vec<CardId>,
    sheets: Vec<Sheet>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(ClassRegistry::with_defaults(), SheetLayout::default())
    }
}

impl EditorSession {
    pub fn new(registry: ClassRegistry, layout: SheetLayout) -> Self {
        Self {
            store: CardStore::new(),
            selection: FilterSelection::default(),
            registry,
            layout,
            mirror_backing: false,
            visible: Vec::new(),
            sheets: Vec::new(),
        }
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    pub fn mirror_backing(&self) -> bool {
        self.mirror_backing
    }

    /// Ids of the cards passing the current filters, in deck order.
    pub fn visible(&self) -> &[CardId] {
        &self.visible
    }

    pub fn visible_cards(&self) -> Vec<&StoredCard> {
        self.visible
            .iter()
            .filter_map(|id| self.store.get(*id))
            .collect()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn card(&self, id: CardId) -> Option<&StoredCard> {
        self.store.get(id)
    }

    /// Displayed border colour of a card.
    pub fn border_color(&self, id: CardId) -> Option<String> {
        self.store
            .get(id)
            .map(|c| filter::border_color(&c.record, &self.registry))
    }

    /// Rebuild visible cards and sheets from scratch.
    pub fn recompute(&mut self) {
        self.visible = filter::visible_ids(&self.store, &self.selection);
        self.sheets = layout::build_sheets(&self.visible, &self.layout);
    }

    // === Loading ===

    /// Replace the deck with the given cards.
    pub fn replace_cards(&mut self, cards: Vec<CardRecord>) -> usize {
        let count = cards.len();
        self.store.replace_all(cards);
        self.recompute();
        count
    }

    /// Replace the deck with the result of a class merge.
    ///
    /// Failed sources are handed back for reporting. A merge that produced no
    /// cards at all leaves the current deck in place.
    pub fn load_merged(&mut self, report: LoadReport) -> Result<(usize, Vec<SourceFailure>)> {
        if report.cards.is_empty() {
            let detail = report
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.tag, f.error))
                .collect::<Vec<_>>()
                .join("; ");
            let message = if detail.is_empty() {
                "no cards found for the selected classes".to_string()
            } else {
                format!("no cards found for the selected classes ({detail})")
            };
            return Err(CardError::Structural(message));
        }
        let count = self.replace_cards(report.cards);
        Ok((count, report.failures))
    }

    /// Replace the deck with a saved deck file.
    ///
    /// On any error the current deck is kept.
    pub fn load_saved(&mut self, text: &str) -> Result<usize> {
        let cards = loader::load_saved_deck(text)?;
        Ok(self.replace_cards(cards))
    }

    /// Apply the free-text editor contents.
    ///
    /// Blank text clears the deck; otherwise the text must be a card list and
    /// replaces the deck wholesale.
    pub fn apply_text(&mut self, text: &str) -> Result<usize> {
        if text.trim().is_empty() {
            return Ok(self.replace_cards(Vec::new()));
        }
        self.load_saved(text)
    }

    // === Filters and page settings ===

    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.recompute();
    }

    pub fn toggle_class(&mut self, class: &str, selected: bool) {
        self.selection.set_class(class, selected);
        self.recompute();
    }

    pub fn toggle_level(&mut self, level: u8, selected: bool) {
        self.selection.set_level(level, selected);
        self.recompute();
    }

    pub fn toggle_card_type(&mut self, card_type: CardType, selected: bool) {
        self.selection.set_card_type(card_type, selected);
        self.recompute();
    }

    /// Set or clear the backing image. Fronts are rebuilt too.
    pub fn set_backing_image(&mut self, image: Option<String>) {
        self.layout.set_backing_image(image);
        self.recompute();
    }

    pub fn set_mirror_backing(&mut self, mirror: bool) {
        self.mirror_backing = mirror;
    }

    pub fn set_page_capacity(&mut self, capacity: usize) -> Result<()> {
        let mut layout = SheetLayout::new(capacity)?;
        layout.set_backing_image(self.layout.backing_image().map(str::to_string));
        self.layout = layout;
        self.recompute();
        Ok(())
    }

    // === Card mutations ===

    pub fn add_field(&mut self, id: CardId, key: &str, value: &str) -> Result<MutationOutcome> {
        let outcome = mutation::add_field(&mut self.store, id, key, value)?;
        Ok(self.settle(outcome))
    }

    pub fn edit_field(&mut self, id: CardId, key: &str, value: &str) -> Result<MutationOutcome> {
        let outcome = mutation::edit_field(&mut self.store, id, key, value)?;
        Ok(self.settle(outcome))
    }

    pub fn remove_field(&mut self, id: CardId, key: &str) -> Result<MutationOutcome> {
        let outcome = mutation::remove_field(&mut self.store, id, key)?;
        Ok(self.settle(outcome))
    }

    pub fn set_classes(&mut self, id: CardId, classes: Vec<String>) -> Result<MutationOutcome> {
        let outcome = mutation::set_classes(&mut self.store, id, classes)?;
        Ok(self.settle(outcome))
    }

    pub fn set_level(&mut self, id: CardId, level: u8) -> Result<MutationOutcome> {
        let outcome = mutation::set_level(&mut self.store, id, level)?;
        Ok(self.settle(outcome))
    }

    pub fn recolor(&mut self, id: CardId, color: Option<&str>) -> Result<MutationOutcome> {
        let outcome = mutation::recolor(&mut self.store, id, color)?;
        Ok(self.settle(outcome))
    }

    pub fn duplicate(&mut self, id: CardId) -> Result<CardId> {
        let copy = mutation::duplicate_card(&mut self.store, id)?;
        self.recompute();
        Ok(copy)
    }

    pub fn delete(&mut self, id: CardId) -> Result<CardRecord> {
        let removed = mutation::delete_card(&mut self.store, id)?;
        self.recompute();
        Ok(removed)
    }

    pub fn create(&mut self, card_type: CardType, name: Option<&str>) -> Result<CardId> {
        let id = mutation::create_card(&mut self.store, card_type, name)?;
        self.recompute();
        Ok(id)
    }

    fn settle(&mut self, outcome: MutationOutcome) -> MutationOutcome {
        if outcome.needs_recompute() {
            self.recompute();
        }
        outcome
    }

    // === Export ===

    /// Save file of the cards currently on the sheets, in display order.
    pub fn export_visible(&self) -> Result<String> {
        loader::dump_cards(self.visible_cards().into_iter().map(|c| &c.record))
    }

    /// Save file of the whole deck regardless of filters.
    pub fn export_all(&self) -> Result<String> {
        loader::dump_cards(self.store.records())
    }
}
