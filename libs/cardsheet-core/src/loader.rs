//! Card loader for the YAML card format.
//!
//! # Format
//! ```yaml
//! - name: Cure Wounds
//!   level: 1
//!   school: Evocation
//!   classes: [Cleric, Druid]
//!   casting_time: 1 Action
//!   description: |
//!     A creature you touch regains hit points.
//! ```
//!
//! Class card lists are merged by name (see [`merge_sources`]); saved decks
//! are loaded verbatim (see [`load_saved_deck`]).

use serde_yaml::Value;
use std::collections::HashMap;

use crate::error::{CardError, Result};
use crate::types::CardRecord;

/// Name used in errors raised while loading a saved deck.
const SAVED_DECK: &str = "saved deck";

/// One class-scoped card list to merge.
#[derive(Debug, Clone)]
pub struct CardSource {
    /// Class tag every card in this source receives.
    pub tag: String,
    pub text: String,
}

impl CardSource {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
        }
    }
}

/// A source that was skipped during a merge.
#[derive(Debug)]
pub struct SourceFailure {
    pub tag: String,
    pub error: CardError,
}

/// Result of merging several sources.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub cards: Vec<CardRecord>,
    pub failures: Vec<SourceFailure>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parse one source's text into card records.
///
/// An empty document yields no cards. Anything that is not a sequence of card
/// mappings is a [`CardError::Parse`].
pub fn parse_cards(source_name: &str, text: &str) -> Result<Vec<CardRecord>> {
    let document = parse_document(source_name, text)?;
    if document.is_null() {
        return Ok(Vec::new());
    }
    records_from(source_name, document).map_err(|e| match e {
        CardError::Structural(message) => CardError::Parse {
            source_name: source_name.to_string(),
            message,
        },
        other => other,
    })
}

/// Merge class-scoped sources into one deduplicated deck.
///
/// Cards merge on exact `name`. The first occurrence supplies the record; later
/// occurrences only add their source's class tag. Output follows first
/// occurrence across sources in the order given. A source that fails to parse
/// is skipped and reported, the rest still load.
pub fn merge_sources<I>(sources: I) -> LoadReport
where
    I: IntoIterator<Item = CardSource>,
{
    let mut report = LoadReport::default();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for source in sources {
        let cards = match parse_cards(&source.tag, &source.text) {
            Ok(cards) => cards,
            Err(error) => {
                report.failures.push(SourceFailure {
                    tag: source.tag,
                    error,
                });
                continue;
            }
        };

        for mut card in cards {
            match by_name.get(&card.name) {
                Some(&idx) => {
                    report.cards[idx].add_class(source.tag.as_str());
                }
                None => {
                    card.add_class(source.tag.as_str());
                    by_name.insert(card.name.clone(), report.cards.len());
                    report.cards.push(card);
                }
            }
        }
    }

    report
}

/// Load a previously saved full deck without merging.
///
/// Each entry becomes one card, custom border colours included. Text that
/// parses but is not a sequence of mappings is a [`CardError::Structural`].
pub fn load_saved_deck(text: &str) -> Result<Vec<CardRecord>> {
    let document = parse_document(SAVED_DECK, text)?;
    records_from(SAVED_DECK, document)
}

/// Serialize cards to the YAML card format.
pub fn dump_cards<'a, I>(cards: I) -> Result<String>
where
    I: IntoIterator<Item = &'a CardRecord>,
{
    let cards: Vec<&CardRecord> = cards.into_iter().collect();
    serde_yaml::to_string(&cards).map_err(|e| CardError::Serialize(e.to_string()))
}

/// Bundled example deck shown when no class library is selected.
pub fn example_deck() -> Result<Vec<CardRecord>> {
    parse_cards("example deck", EXAMPLE_DECK)
}

fn parse_document(source_name: &str, text: &str) -> Result<Value> {
    serde_yaml::from_str(text).map_err(|e| CardError::parse(source_name, e))
}

fn records_from(source_name: &str, document: Value) -> Result<Vec<CardRecord>> {
    let Value::Sequence(items) = document else {
        return Err(CardError::Structural(
            "expected a sequence of card mappings".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            if !item.is_mapping() {
                return Err(CardError::Structural(format!(
                    "entry {} is not a card mapping",
                    idx + 1
                )));
            }
            let mut card: CardRecord = serde_yaml::from_value(item)
                .map_err(|e| CardError::parse(source_name, format!("entry {}: {}", idx + 1, e)))?;
            card.dedup_classes();
            Ok(card)
        })
        .collect()
}

const EXAMPLE_DECK: &str = r#"
- name: Disguise Self
  level: 1
  school: Illusion
  classes: [Wizard]
  casting_time: 1 Action
  range: Self
  components: V, S
  duration: 1 hour
  description: |
    You make yourself (including clothing, armour, weapons, and belongings) appear different.
    No saving throw, but Investigation check (DC = spell save DC) can reveal illusion.

- name: Cure Wounds
  level: 1
  school: Evocation
  classes: [Cleric, Druid, Bard]
  casting_time: 1 Action
  range: Touch
  components: V, S
  duration: Instantaneous
  description: |
    A creature you touch regains hit points equal to 1d8 + your spellcasting ability modifier.
    This spell has no effect on undead or constructs.

- name: Identify
  level: 1
  school: Divination
  classes: [Wizard, Artificer]
  casting_time: 1 Minute
  range: Touch
  components: V, S, M (a pearl worth at least 100 gp)
  duration: Instantaneous
  description: |
    You choose one object that you must touch throughout the casting. If it is a magic item or some other magic-imbued object, you learn its properties and how to use them.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardType;
    use pretty_assertions::assert_eq;

    const WIZARD: &str = "- name: Shield\n  level: 1\n- name: Light\n  level: 0\n";
    const SORCERER: &str = "- name: Shield\n  level: 1\n- name: Chaos Bolt\n  level: 1\n";

    fn names(cards: &[CardRecord]) -> Vec<&str> {
        cards.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn parse_spell_list() {
        let cards = parse_cards("wizard", WIZARD).unwrap();
        assert_eq!(names(&cards), vec!["Shield", "Light"]);
        assert_eq!(cards[0].card_type, CardType::Spell);
        assert_eq!(cards[1].level, Some(0));
    }

    #[test]
    fn parse_empty_text() {
        assert!(parse_cards("empty", "").unwrap().is_empty());
        assert!(parse_cards("empty", "   \n").unwrap().is_empty());
    }

    #[test]
    fn reject_non_sequence() {
        let result = parse_cards("bad", "name: Shield\n");
        assert!(matches!(result, Err(CardError::Parse { .. })));
    }

    #[test]
    fn reject_malformed_yaml() {
        let result = parse_cards("bad", "- name: [unclosed\n");
        assert!(matches!(result, Err(CardError::Parse { .. })));
    }

    #[test]
    fn reject_entry_without_name() {
        let result = parse_cards("bad", "- level: 3\n");
        assert!(matches!(result, Err(CardError::Parse { .. })));
    }

    #[test]
    fn merge_unions_class_tags() {
        let report = merge_sources([
            CardSource::new("Wizard", WIZARD),
            CardSource::new("Sorcerer", SORCERER),
        ]);
        assert!(report.is_clean());
        assert_eq!(names(&report.cards), vec!["Shield", "Light", "Chaos Bolt"]);
        assert_eq!(report.cards[0].classes, vec!["Wizard", "Sorcerer"]);
        assert_eq!(report.cards[1].classes, vec!["Wizard"]);
        assert_eq!(report.cards[2].classes, vec!["Sorcerer"]);
    }

    #[test]
    fn merge_is_order_independent_for_tags() {
        let forward = merge_sources([
            CardSource::new("Wizard", WIZARD),
            CardSource::new("Sorcerer", SORCERER),
        ]);
        let backward = merge_sources([
            CardSource::new("Sorcerer", SORCERER),
            CardSource::new("Wizard", WIZARD),
        ]);
        let shield = |cards: &[CardRecord]| {
            let mut tags = cards.iter().find(|c| c.name == "Shield").unwrap().classes.clone();
            tags.sort();
            tags
        };
        assert_eq!(shield(&forward.cards), shield(&backward.cards));
        assert_eq!(forward.cards.len(), backward.cards.len());
    }

    #[test]
    fn merge_same_source_twice_does_not_duplicate() {
        let report = merge_sources([
            CardSource::new("Wizard", WIZARD),
            CardSource::new("Wizard", WIZARD),
        ]);
        assert_eq!(report.cards.len(), 2);
        assert_eq!(report.cards[0].classes, vec!["Wizard"]);
    }

    #[test]
    fn merge_keeps_existing_tags_from_text() {
        let text = "- name: Cure Wounds\n  classes: [Cleric, Bard]\n";
        let report = merge_sources([
            CardSource::new("Bard", text),
            CardSource::new("Druid", text),
        ]);
        assert_eq!(report.cards[0].classes, vec!["Cleric", "Bard", "Druid"]);
    }

    #[test]
    fn merge_skips_failed_source() {
        let report = merge_sources([
            CardSource::new("Wizard", WIZARD),
            CardSource::new("Broken", "- name: [oops\n"),
            CardSource::new("Sorcerer", SORCERER),
        ]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].tag, "Broken");
        assert_eq!(names(&report.cards), vec!["Shield", "Light", "Chaos Bolt"]);
    }

    #[test]
    fn saved_deck_rejects_mapping_as_structural() {
        let result = load_saved_deck("name: Shield\n");
        assert!(matches!(result, Err(CardError::Structural(_))));
        let result = load_saved_deck("- just a string\n");
        assert!(matches!(result, Err(CardError::Structural(_))));
    }

    #[test]
    fn saved_deck_restores_border_override() {
        let text = "- name: Shield\n  _customBorderColor: '#123456'\n- name: Light\n";
        let cards = load_saved_deck(text).unwrap();
        assert_eq!(cards[0].border_color_override.as_deref(), Some("#123456"));
        assert_eq!(cards[1].border_color_override, None);
    }

    #[test]
    fn round_trip_preserves_fields_and_override() {
        let mut cards = example_deck().unwrap();
        cards[1].border_color_override = Some("#00ff00".to_string());
        cards.push(
            CardRecord::new("Plate", CardType::Armor)
                .with_field("armorClass", "18")
                .with_field("description", "Heavy.\nNoisy."),
        );

        let text = dump_cards(&cards).unwrap();
        assert!(text.contains("_customBorderColor"));
        let reloaded = load_saved_deck(&text).unwrap();
        assert_eq!(reloaded, cards);
    }

    #[test]
    fn example_deck_loads() {
        let cards = example_deck().unwrap();
        assert_eq!(names(&cards), vec!["Disguise Self", "Cure Wounds", "Identify"]);
        assert_eq!(cards[1].classes, vec!["Cleric", "Druid", "Bard"]);
        assert!(cards[0].field_text("description").unwrap().contains('\n'));
    }
}
