//! Sheet layout engine.
//!
//! Sheets are derived data: they are rebuilt in full from the visible cards
//! after every filter, card or backing image change and never edited in place.

use serde::Serialize;

use crate::error::{CardError, Result};
use crate::types::CardId;

/// Cards per printed page unless configured otherwise (a 3x3 grid).
pub const DEFAULT_PAGE_CAPACITY: usize = 9;

/// Page settings that shape the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetLayout {
    page_capacity: usize,
    /// Image printed on the back of every card. Backing sheets are only
    /// produced while one is set.
    backing_image: Option<String>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            page_capacity: DEFAULT_PAGE_CAPACITY,
            backing_image: None,
        }
    }
}

impl SheetLayout {
    pub fn new(page_capacity: usize) -> Result<Self> {
        if page_capacity == 0 {
            return Err(CardError::InvalidPageCapacity);
        }
        Ok(Self {
            page_capacity,
            backing_image: None,
        })
    }

    pub fn page_capacity(&self) -> usize {
        self.page_capacity
    }

    pub fn backing_image(&self) -> Option<&str> {
        self.backing_image.as_deref()
    }

    /// Set or clear the backing image. Empty strings clear it.
    pub fn set_backing_image(&mut self, image: Option<String>) {
        self.backing_image = image.filter(|s| !s.trim().is_empty());
    }
}

/// One printable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sheet {
    /// Card faces, in display order.
    Front { cards: Vec<CardId> },
    /// Backing-image slots for the front sheet at index `front`.
    Backing { front: usize, slots: usize },
}

impl Sheet {
    /// Number of occupied slots on the page.
    pub fn len(&self) -> usize {
        match self {
            Self::Front { cards } => cards.len(),
            Self::Backing { slots, .. } => *slots,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_backing(&self) -> bool {
        matches!(self, Self::Backing { .. })
    }
}

/// Partition visible cards into pages.
///
/// Front sheets come first, each holding up to `page_capacity` cards in input
/// order. With a backing image set, one backing sheet per front sheet follows,
/// in the same order, each with exactly as many slots as its front has cards.
pub fn build_sheets(visible: &[CardId], layout: &SheetLayout) -> Vec<Sheet> {
    let mut sheets: Vec<Sheet> = visible
        .chunks(layout.page_capacity)
        .map(|chunk| Sheet::Front {
            cards: chunk.to_vec(),
        })
        .collect();

    if layout.backing_image.is_some() {
        let backs: Vec<Sheet> = sheets
            .iter()
            .enumerate()
            .map(|(front, sheet)| Sheet::Backing {
                front,
                slots: sheet.len(),
            })
            .collect();
        sheets.extend(backs);
    }

    sheets
}
