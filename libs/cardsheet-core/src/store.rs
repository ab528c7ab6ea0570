//! Backing store of loaded cards.

use serde::Serialize;

use crate::types::{CardId, CardRecord};

/// A card together with its session identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredCard {
    pub id: CardId,
    #[serde(flatten)]
    pub record: CardRecord,
}

/// Ordered collection of every card in the editing session.
///
/// Order is the deck order: sheets are laid out from it and saves follow it.
#[derive(Debug, Clone, Default)]
pub struct CardStore {
    cards: Vec<StoredCard>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, assigning fresh ids.
    pub fn from_records(records: impl IntoIterator<Item = CardRecord>) -> Self {
        let mut store = Self::new();
        store.replace_all(records);
        store
    }

    /// Replace the whole deck. Previous ids become invalid.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = CardRecord>) {
        self.cards = records
            .into_iter()
            .map(|record| StoredCard {
                id: CardId::new(),
                record,
            })
            .collect();
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn get(&self, id: CardId) -> Option<&StoredCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut StoredCard> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Append a card to the end of the deck.
    pub fn push(&mut self, record: CardRecord) -> CardId {
        let id = CardId::new();
        self.cards.push(StoredCard { id, record });
        id
    }

    /// Insert a card directly after `anchor`, or at the end if `anchor` is unknown.
    pub fn insert_after(&mut self, anchor: CardId, record: CardRecord) -> CardId {
        let id = CardId::new();
        let card = StoredCard { id, record };
        match self.position(anchor) {
            Some(idx) => self.cards.insert(idx + 1, card),
            None => self.cards.push(card),
        }
        id
    }

    pub fn remove(&mut self, id: CardId) -> Option<StoredCard> {
        let idx = self.position(id)?;
        Some(self.cards.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredCard> {
        self.cards.iter()
    }

    pub fn records(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.iter().map(|c| &c.record)
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
