//! Core types for the card editor.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use uuid::Uuid;

/// Highest spell level a card can carry (cantrips are level 0).
pub const MAX_LEVEL: u8 = 9;

/// Kind of printable card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    #[default]
    Spell,
    Weapon,
    Armor,
}

impl CardType {
    /// Every card type, in menu order.
    pub const ALL: [CardType; 3] = [Self::Spell, Self::Weapon, Self::Armor];

    /// Get the card type key as a string.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Spell => "spell",
            Self::Weapon => "weapon",
            Self::Armor => "armor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Spell => "Spell",
            Self::Weapon => "Weapon",
            Self::Armor => "Armor",
        }
    }

    /// Parse from key string.
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "spell" => Some(Self::Spell),
            "weapon" => Some(Self::Weapon),
            "armor" => Some(Self::Armor),
            _ => None,
        }
    }

    /// Ordered field schema for this card type.
    ///
    /// The order drives both the display order on the card and the order of
    /// the add-field menu.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::Spell => SPELL_FIELDS,
            Self::Weapon => WEAPON_FIELDS,
            Self::Armor => ARMOR_FIELDS,
        }
    }

    /// Look up a field of this type's schema by key.
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.key == key)
    }

    fn is_spell(&self) -> bool {
        *self == Self::Spell
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One displayable field of a card type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    /// Rendered with line breaks preserved and always shown, even when empty.
    pub long_text: bool,
}

impl FieldSpec {
    const fn short(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            long_text: false,
        }
    }

    const fn long(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            long_text: true,
        }
    }
}

const SPELL_FIELDS: &[FieldSpec] = &[
    FieldSpec::short("casting_time", "Casting Time"),
    FieldSpec::short("range", "Range"),
    FieldSpec::short("components", "Components"),
    FieldSpec::short("duration", "Duration"),
    FieldSpec::short("concentration", "Concentration"),
    FieldSpec::short("ritual", "Ritual"),
    FieldSpec::short("attack_save", "Attack/Save"),
    FieldSpec::short("damage", "Damage"),
    FieldSpec::short("higher_level", "At Higher Levels"),
    FieldSpec::long("description", "Description"),
];

const WEAPON_FIELDS: &[FieldSpec] = &[
    FieldSpec::short("damage", "Damage"),
    FieldSpec::short("attackBonus", "Attack Bonus"),
    FieldSpec::short("range", "Range"),
    FieldSpec::short("properties", "Properties"),
    FieldSpec::short("attunement", "Attunement"),
    FieldSpec::long("description", "Description"),
];

const ARMOR_FIELDS: &[FieldSpec] = &[
    FieldSpec::short("armorClass", "Armour Class"),
    FieldSpec::short("type", "Armour Type"),
    FieldSpec::short("stealthDisadvantage", "Stealth Disadvantage"),
    FieldSpec::short("weight", "Weight"),
    FieldSpec::short("attunement", "Attunement"),
    FieldSpec::long("description", "Description"),
];

/// Stable identity of a card within an editing session.
///
/// Two cards may share a name (a duplicate starts out identical to its
/// original), so edits always address cards by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CardId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One printable card as stored in the card text format.
///
/// Known keys get typed fields; every other key (the type-specific schema
/// fields and anything the source carried along, like `school` or
/// `subclasses`) is kept verbatim in `fields`, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "CardType::is_spell")]
    pub card_type: CardType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(
        rename = "_customBorderColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub border_color_override: Option<String>,
    #[serde(flatten)]
    pub fields: Mapping,
}

impl CardRecord {
    /// Create a bare card with only a name and type set.
    pub fn new(name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            name: name.into(),
            card_type,
            level: None,
            classes: Vec::new(),
            border_color_override: None,
            fields: Mapping::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_field(key, value);
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for class in classes {
            self.add_class(class);
        }
        self
    }

    /// Level used for filtering. Spells without a level count as cantrips.
    pub fn effective_level(&self) -> u8 {
        self.level.unwrap_or(0)
    }

    /// Add a class tag unless it is already present. Returns whether it was added.
    pub fn add_class(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.classes.contains(&class) {
            return false;
        }
        self.classes.push(class);
        true
    }

    /// Drop repeated class tags, keeping the first occurrence of each.
    pub fn dedup_classes(&mut self) {
        let mut seen = Vec::with_capacity(self.classes.len());
        self.classes.retain(|c| {
            if seen.contains(c) {
                false
            } else {
                seen.push(c.clone());
                true
            }
        });
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Raw value of a free-form field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Display text of a free-form field, if it holds a scalar or a list of scalars.
    pub fn field_text(&self, key: &str) -> Option<String> {
        self.field(key).and_then(value_text)
    }

    /// Whether the field is present with a non-empty value.
    pub fn has_value(&self, key: &str) -> bool {
        self.field_text(key).is_some_and(|s| !s.trim().is_empty())
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Set a free-form field, replacing any previous value in place.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) {
        self.set_value(key, Value::String(value.into()));
    }

    /// Set a free-form field to a list of strings, replacing any previous value in place.
    pub fn set_list_field<I, S>(&mut self, key: &str, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items.into_iter().map(|s| Value::String(s.into())).collect();
        self.set_value(key, Value::Sequence(items));
    }

    fn set_value(&mut self, key: &str, value: Value) {
        let key = Value::String(key.to_string());
        if let Some(slot) = self.fields.get_mut(&key) {
            *slot = value;
        } else {
            self.fields.insert(key, value);
        }
    }

    /// Remove a free-form field entirely, keeping the order of the others.
    pub fn remove_field(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }
}

/// Render a YAML value as card text.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_text).collect();
            Some(parts.join(", "))
        }
        Value::Mapping(_) => None,
        Value::Tagged(tagged) => value_text(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn card_type_keys_round_trip() {
        for card_type in CardType::ALL {
            assert_eq!(CardType::from_key(card_type.key()), Some(card_type));
        }
        assert_eq!(CardType::from_key("potion"), None);
    }

    #[test]
    fn every_schema_ends_with_long_description() {
        for card_type in CardType::ALL {
            let last = card_type.fields().last().unwrap();
            assert_eq!(last.key, "description");
            assert!(last.long_text);
            assert_eq!(
                card_type.fields().iter().filter(|f| f.long_text).count(),
                1
            );
        }
    }

    #[test]
    fn add_class_ignores_duplicates() {
        let mut card = CardRecord::new("Shield", CardType::Spell);
        assert!(card.add_class("Wizard"));
        assert!(!card.add_class("Wizard"));
        assert!(card.add_class("Sorcerer"));
        assert_eq!(card.classes, vec!["Wizard", "Sorcerer"]);
    }

    #[test]
    fn dedup_classes_keeps_first_occurrence() {
        let mut card = CardRecord::new("Shield", CardType::Spell);
        card.classes = vec!["Wizard".into(), "Bard".into(), "Wizard".into()];
        card.dedup_classes();
        assert_eq!(card.classes, vec!["Wizard", "Bard"]);
    }

    #[test]
    fn set_field_replaces_in_place() {
        let mut card = CardRecord::new("Longsword", CardType::Weapon)
            .with_field("damage", "1d8")
            .with_field("properties", "Versatile");
        card.set_field("damage", "1d10");

        let keys: Vec<_> = card.fields.keys().filter_map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["damage", "properties"]);
        assert_eq!(card.field_text("damage").as_deref(), Some("1d10"));
    }

    #[test]
    fn remove_field_preserves_remaining_order() {
        let mut card = CardRecord::new("Plate", CardType::Armor)
            .with_field("armorClass", "18")
            .with_field("type", "Heavy")
            .with_field("weight", "65 lb");
        assert!(card.remove_field("armorClass").is_some());
        assert!(card.remove_field("armorClass").is_none());

        let keys: Vec<_> = card.fields.keys().filter_map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["type", "weight"]);
    }

    #[test]
    fn field_text_renders_scalars_and_lists() {
        let card: CardRecord = serde_yaml::from_str(
            "name: Fireball\nritual: false\nsubclasses: [Lore, Light]\nrange: 150\n",
        )
        .unwrap();
        assert_eq!(card.field_text("ritual").as_deref(), Some("No"));
        assert_eq!(card.field_text("subclasses").as_deref(), Some("Lore, Light"));
        assert_eq!(card.field_text("range").as_deref(), Some("150"));
        assert!(!card.has_value("missing"));
    }

    #[test]
    fn list_fields_stay_lists_in_yaml() {
        let mut card = CardRecord::new("Fireball", CardType::Spell).with_field("subclasses", "old");
        card.set_list_field("subclasses", ["Lore", "Light"]);
        assert_eq!(card.field_text("subclasses").as_deref(), Some("Lore, Light"));

        let yaml = serde_yaml::to_string(&card).unwrap();
        let reloaded: CardRecord = serde_yaml::from_str(&yaml).unwrap();
        let items: Vec<&str> = reloaded
            .field("subclasses")
            .and_then(|v| v.as_sequence())
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(items, vec!["Lore", "Light"]);
    }

    #[test]
    fn empty_string_field_has_no_value() {
        let card = CardRecord::new("Club", CardType::Weapon).with_field("damage", "  ");
        assert!(card.has_field("damage"));
        assert!(!card.has_value("damage"));
    }

    #[test]
    fn spell_type_is_implicit_in_yaml() {
        let spell = CardRecord::new("Light", CardType::Spell).with_level(0);
        let yaml = serde_yaml::to_string(&spell).unwrap();
        assert!(!yaml.contains("card_type"));

        let axe = CardRecord::new("Handaxe", CardType::Weapon);
        let yaml = serde_yaml::to_string(&axe).unwrap();
        assert!(yaml.contains("card_type: weapon"));
    }
}
