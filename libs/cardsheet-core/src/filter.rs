//! Filter engine and border colour derivation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::classes::ClassRegistry;
use crate::color::Rgb;
use crate::store::{CardStore, StoredCard};
use crate::types::{CardId, CardRecord, CardType, MAX_LEVEL};

/// Border colour of a card with no registered class tags.
pub const DEFAULT_BORDER: Rgb = Rgb::new(0x3a, 0x2f, 0x2f);

/// Active filter checklists of the editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Empty means no class restriction.
    #[serde(default)]
    pub classes: BTreeSet<String>,
    pub levels: BTreeSet<u8>,
    pub card_types: BTreeSet<CardType>,
}

impl Default for FilterSelection {
    /// Every level, every type, no class restriction.
    fn default() -> Self {
        Self {
            classes: BTreeSet::new(),
            levels: (0..=MAX_LEVEL).collect(),
            card_types: CardType::ALL.into_iter().collect(),
        }
    }
}

impl FilterSelection {
    /// Check or uncheck a class tag.
    pub fn set_class(&mut self, class: &str, selected: bool) {
        if selected {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }

    pub fn set_level(&mut self, level: u8, selected: bool) {
        if selected {
            self.levels.insert(level);
        } else {
            self.levels.remove(&level);
        }
    }

    pub fn set_card_type(&mut self, card_type: CardType, selected: bool) {
        if selected {
            self.card_types.insert(card_type);
        } else {
            self.card_types.remove(&card_type);
        }
    }

    /// Whether one card passes every active checklist.
    pub fn matches(&self, card: &CardRecord) -> bool {
        if !self.card_types.contains(&card.card_type) {
            return false;
        }
        if card.card_type == CardType::Spell && !self.levels.contains(&card.effective_level()) {
            return false;
        }
        self.classes.is_empty() || card.classes.iter().any(|c| self.classes.contains(c))
    }
}

/// Cards passing the selection, in deck order.
pub fn visible_cards<'a>(store: &'a CardStore, selection: &FilterSelection) -> Vec<&'a StoredCard> {
    store
        .iter()
        .filter(|card| selection.matches(&card.record))
        .collect()
}

/// Ids of the cards passing the selection, in deck order.
pub fn visible_ids(store: &CardStore, selection: &FilterSelection) -> Vec<CardId> {
    visible_cards(store, selection)
        .into_iter()
        .map(|card| card.id)
        .collect()
}

/// Border colour shown for a card, as `#rrggbb`.
///
/// A custom override is returned verbatim. Otherwise the colours of the
/// card's registered class tags are mixed; unregistered tags are ignored.
pub fn border_color(card: &CardRecord, registry: &ClassRegistry) -> String {
    if let Some(color) = &card.border_color_override {
        return color.clone();
    }
    derived_border(card, registry).to_hex()
}

/// Border colour from class tags alone, ignoring any override.
pub fn derived_border(card: &CardRecord, registry: &ClassRegistry) -> Rgb {
    let colors: Vec<Rgb> = card
        .classes
        .iter()
        .filter_map(|c| registry.get(c))
        .map(|info| info.color)
        .collect();
    Rgb::mix(&colors).unwrap_or(DEFAULT_BORDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spell(name: &str, level: u8, classes: &[&str]) -> CardRecord {
        CardRecord::new(name, CardType::Spell)
            .with_level(level)
            .with_classes(classes.iter().copied())
    }

    fn fixture() -> CardStore {
        CardStore::from_records([
            spell("Light", 0, &["Wizard", "Cleric"]),
            spell("Shield", 1, &["Wizard"]),
            spell("Cure Wounds", 1, &["Cleric", "Druid"]),
            CardRecord::new("Longsword", CardType::Weapon),
            spell("Fireball", 3, &["Wizard", "Sorcerer"]),
            CardRecord::new("Plate", CardType::Armor),
        ])
    }

    fn visible_names(store: &CardStore, selection: &FilterSelection) -> Vec<String> {
        visible_cards(store, selection)
            .into_iter()
            .map(|c| c.record.name.clone())
            .collect()
    }

    #[test]
    fn default_selection_shows_everything() {
        let store = fixture();
        let visible = visible_names(&store, &FilterSelection::default());
        assert_eq!(visible.len(), store.len());
    }

    #[test]
    fn class_filter_keeps_deck_order() {
        let store = fixture();
        let mut selection = FilterSelection::default();
        selection.set_class("Cleric", true);
        selection.set_class("Sorcerer", true);
        assert_eq!(
            visible_names(&store, &selection),
            vec!["Light", "Cure Wounds", "Fireball"]
        );
    }

    #[test]
    fn class_filter_hides_untagged_items() {
        let store = fixture();
        let mut selection = FilterSelection::default();
        selection.set_class("Wizard", true);
        assert!(!visible_names(&store, &selection).contains(&"Longsword".to_string()));
    }

    #[test]
    fn class_filter_matching_nothing_is_empty() {
        let store = fixture();
        let mut selection = FilterSelection::default();
        selection.set_class("Monk", true);
        assert!(visible_names(&store, &selection).is_empty());
    }

    #[test]
    fn level_filter_only_applies_to_spells() {
        let store = fixture();
        let mut selection = FilterSelection::default();
        selection.levels = [1].into_iter().collect();
        assert_eq!(
            visible_names(&store, &selection),
            vec!["Shield", "Cure Wounds", "Longsword", "Plate"]
        );
    }

    #[test]
    fn spell_without_level_counts_as_cantrip() {
        let store = CardStore::from_records([CardRecord::new("Mystery", CardType::Spell)]);
        let mut selection = FilterSelection::default();
        selection.set_level(0, false);
        assert!(visible_names(&store, &selection).is_empty());
    }

    #[test]
    fn type_filter() {
        let store = fixture();
        let mut selection = FilterSelection::default();
        selection.set_card_type(CardType::Spell, false);
        selection.set_card_type(CardType::Armor, false);
        assert_eq!(visible_names(&store, &selection), vec!["Longsword"]);
    }

    #[test]
    fn filtering_is_repeatable() {
        let store = fixture();
        let mut selection = FilterSelection::default();
        selection.set_class("Wizard", true);
        assert_eq!(
            visible_ids(&store, &selection),
            visible_ids(&store, &selection)
        );
    }

    #[test]
    fn border_mixes_two_classes() {
        let mut registry = ClassRegistry::new();
        registry.register("Dark", "DRK", "#000000").unwrap();
        registry.register("Light", "LGT", "#ffffff").unwrap();
        let card = spell("Twilight", 1, &["Dark", "Light"]);
        assert_eq!(border_color(&card, &registry), "#7f7f7f");
    }

    #[test]
    fn border_single_class_uses_its_colour() {
        let registry = ClassRegistry::with_defaults();
        let card = spell("Vicious Mockery", 0, &["Bard"]);
        assert_eq!(border_color(&card, &registry), "#ff69b4");
    }

    #[test]
    fn border_without_valid_classes_uses_default() {
        let registry = ClassRegistry::with_defaults();
        let card = spell("Homebrew", 1, &["Mystic"]);
        assert_eq!(border_color(&card, &registry), "#3a2f2f");
        let bare = CardRecord::new("Club", CardType::Weapon);
        assert_eq!(border_color(&bare, &registry), "#3a2f2f");
    }

    #[test]
    fn border_ignores_unregistered_tags_when_mixing() {
        let registry = ClassRegistry::with_defaults();
        let card = spell("Odd", 1, &["Bard", "Mystic"]);
        assert_eq!(border_color(&card, &registry), "#ff69b4");
    }

    #[test]
    fn border_override_wins() {
        let registry = ClassRegistry::with_defaults();
        let mut card = spell("Shield", 1, &["Wizard"]);
        card.border_color_override = Some("rgb(1, 2, 3)".to_string());
        assert_eq!(border_color(&card, &registry), "rgb(1, 2, 3)");
    }
}
