//! Card mutation operations.
//!
//! Every operation addresses its card by [`CardId`] and either applies fully
//! or leaves the store untouched. The returned [`MutationOutcome`] tells the
//! caller how much derived state has to be rebuilt.

use serde::Serialize;

use crate::color::Rgb;
use crate::error::{CardError, Result};
use crate::store::CardStore;
use crate::types::{CardId, CardRecord, CardType, FieldSpec, MAX_LEVEL};

/// What a mutation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum MutationOutcome {
    /// Nothing changed.
    Unchanged,
    /// Only the face of this card changed; visibility is unaffected.
    Rerender { card: CardId },
    /// Deck size or a filter-relevant field changed; filter and layout must rerun.
    Recompute,
}

impl MutationOutcome {
    pub fn needs_recompute(&self) -> bool {
        matches!(self, Self::Recompute)
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Schema fields not yet filled in, in add-menu order.
pub fn addable_fields(card: &CardRecord) -> Vec<&'static FieldSpec> {
    card.card_type
        .fields()
        .iter()
        .filter(|f| !card.has_value(f.key))
        .collect()
}

/// Schema fields currently present on the card, in display order.
pub fn present_fields(card: &CardRecord) -> Vec<&'static FieldSpec> {
    card.card_type
        .fields()
        .iter()
        .filter(|f| card.has_field(f.key))
        .collect()
}

/// Add a schema field to a card.
///
/// A field that already holds a non-empty value is left alone.
pub fn add_field(store: &mut CardStore, id: CardId, key: &str, value: &str) -> Result<MutationOutcome> {
    let card = record_mut(store, id)?;
    let spec = card
        .card_type
        .field(key)
        .ok_or_else(|| CardError::FieldNotInSchema {
            key: key.to_string(),
            card_type: card.card_type.to_string(),
        })?;

    if card.has_value(key) {
        return Ok(MutationOutcome::Unchanged);
    }
    card.set_field(key, field_input(spec.long_text, value));
    Ok(MutationOutcome::Rerender { card: id })
}

/// Replace the value of a field the card already has.
pub fn edit_field(store: &mut CardStore, id: CardId, key: &str, value: &str) -> Result<MutationOutcome> {
    let card = record_mut(store, id)?;
    if !card.has_field(key) {
        return Ok(MutationOutcome::Unchanged);
    }
    let long_text = card.card_type.field(key).is_some_and(|f| f.long_text);
    card.set_field(key, field_input(long_text, value));
    Ok(MutationOutcome::Rerender { card: id })
}

/// Delete a field from a card. Removing an absent field is a no-op.
pub fn remove_field(store: &mut CardStore, id: CardId, key: &str) -> Result<MutationOutcome> {
    let card = record_mut(store, id)?;
    match card.remove_field(key) {
        Some(_) => Ok(MutationOutcome::Rerender { card: id }),
        None => Ok(MutationOutcome::Unchanged),
    }
}

/// Replace the class tags of a card.
pub fn set_classes(store: &mut CardStore, id: CardId, classes: Vec<String>) -> Result<MutationOutcome> {
    let card = record_mut(store, id)?;
    let mut tags = Vec::with_capacity(classes.len());
    for class in classes {
        let class = class.trim().to_string();
        if !class.is_empty() && !tags.contains(&class) {
            tags.push(class);
        }
    }
    if card.classes == tags {
        return Ok(MutationOutcome::Unchanged);
    }
    card.classes = tags;
    Ok(MutationOutcome::Recompute)
}

/// Change the level of a spell card.
pub fn set_level(store: &mut CardStore, id: CardId, level: u8) -> Result<MutationOutcome> {
    if level > MAX_LEVEL {
        return Err(CardError::Validation(format!(
            "level must be between 0 and {MAX_LEVEL}"
        )));
    }
    let card = record_mut(store, id)?;
    if card.card_type != CardType::Spell {
        return Err(CardError::Validation(format!(
            "{} cards have no level",
            card.card_type.label()
        )));
    }
    if card.level == Some(level) {
        return Ok(MutationOutcome::Unchanged);
    }
    card.level = Some(level);
    Ok(MutationOutcome::Recompute)
}

/// Set or clear a custom border colour. Colours are stored as `#rrggbb`.
pub fn recolor(store: &mut CardStore, id: CardId, color: Option<&str>) -> Result<MutationOutcome> {
    let color = color.map(Rgb::parse).transpose()?.map(|c| c.to_hex());
    let card = record_mut(store, id)?;
    if card.border_color_override == color {
        return Ok(MutationOutcome::Unchanged);
    }
    card.border_color_override = color;
    Ok(MutationOutcome::Rerender { card: id })
}

/// Copy a card and insert the copy right after the original.
pub fn duplicate_card(store: &mut CardStore, id: CardId) -> Result<CardId> {
    let copy = store
        .get(id)
        .map(|c| c.record.clone())
        .ok_or(CardError::UnknownCard(id))?;
    Ok(store.insert_after(id, copy))
}

/// Remove a card from the deck, returning its record.
pub fn delete_card(store: &mut CardStore, id: CardId) -> Result<CardRecord> {
    store
        .remove(id)
        .map(|c| c.record)
        .ok_or(CardError::UnknownCard(id))
}

/// Append a new card of the given type.
///
/// `name` is the answer to the name prompt; `None` means the prompt was
/// cancelled. A missing or blank name aborts without touching the store.
pub fn create_card(store: &mut CardStore, card_type: CardType, name: Option<&str>) -> Result<CardId> {
    let name = name.map(str::trim).filter(|n| !n.is_empty()).ok_or_else(|| {
        CardError::Validation(format!("a name is required for a new {}", card_type.label()))
    })?;
    Ok(store.push(blank_card(card_type, name)))
}

/// A new card with the type's starting fields.
pub fn blank_card(card_type: CardType, name: &str) -> CardRecord {
    let card = CardRecord::new(name, card_type);
    match card_type {
        CardType::Spell => card.with_level(0).with_field("school", ""),
        CardType::Weapon => card.with_field("type", "Weapon").with_field("damage", ""),
        CardType::Armor => card.with_field("type", "Armor").with_field("armorClass", ""),
    }
}

fn record_mut(store: &mut CardStore, id: CardId) -> Result<&mut CardRecord> {
    store
        .get_mut(id)
        .map(|c| &mut c.record)
        .ok_or(CardError::UnknownCard(id))
}

/// Long-text input may spell line breaks as a literal `\n`.
fn field_input(long_text: bool, value: &str) -> String {
    if long_text {
        value.replace("\\n", "\n")
    } else {
        value.to_string()
    }
}
