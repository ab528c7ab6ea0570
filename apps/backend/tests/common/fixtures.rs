//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

/// Wizard class card file.
pub const WIZARD_CARDS: &str = r#"
- name: Shield
  level: 1
  school: Abjuration
  casting_time: 1 Reaction
  range: Self
- name: Detect Magic
  level: 1
  school: Divination
  ritual: "Yes"
- name: Fire Bolt
  level: 0
  school: Evocation
"#;

/// Druid class card file. Shares Detect Magic with the wizard file.
pub const DRUID_CARDS: &str = r#"
- name: Detect Magic
  level: 1
  school: Divination
  range: 30 feet
- name: Thorn Whip
  level: 0
  school: Transmutation
"#;

/// Generate a saved deck with a specified number of spells.
///
/// Levels cycle through 0, 1 and 2; every card is a Wizard spell.
pub fn sample_deck(num_cards: usize) -> String {
    (0..num_cards)
        .map(|i| {
            format!(
                "- name: Spell {}\n  level: {}\n  classes: [Wizard]\n",
                i + 1,
                i % 3
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Catalog spell listing. `missing-spell` has no detail entry.
pub fn spell_listing() -> Value {
    json!({
        "count": 4,
        "results": [
            { "index": "fireball", "name": "Fireball", "level": 3, "url": "/api/2014/spells/fireball" },
            { "index": "light", "name": "Light", "level": 0, "url": "/api/2014/spells/light" },
            { "index": "cure-wounds", "name": "Cure Wounds", "level": 1, "url": "/api/2014/spells/cure-wounds" },
            { "index": "missing-spell", "name": "Missing", "level": 1, "url": "/api/2014/spells/missing-spell" }
        ]
    })
}

/// Catalog detail for a spell index.
pub fn spell_detail(index: &str) -> Option<Value> {
    let detail = match index {
        "fireball" => json!({
            "index": "fireball",
            "name": "Fireball",
            "level": 3,
            "school": { "index": "evocation", "name": "Evocation" },
            "classes": [{ "index": "sorcerer", "name": "Sorcerer" }, { "index": "wizard", "name": "Wizard" }],
            "subclasses": [],
            "casting_time": "1 action",
            "range": "150 feet",
            "components": ["V", "S", "M"],
            "material": "A tiny ball of bat guano and sulfur.",
            "duration": "Instantaneous",
            "concentration": false,
            "ritual": false,
            "desc": ["A bright streak flashes.", "Each creature makes a Dexterity saving throw."]
        }),
        "light" => json!({
            "index": "light",
            "name": "Light",
            "level": 0,
            "school": { "index": "evocation", "name": "Evocation" },
            "classes": [{ "index": "bard", "name": "Bard" }, { "index": "wizard", "name": "Wizard" }],
            "casting_time": "1 action",
            "range": "Touch",
            "components": ["V", "M"],
            "material": "A firefly.",
            "duration": "1 hour",
            "concentration": false,
            "ritual": false,
            "desc": ["You touch one object."]
        }),
        "cure-wounds" => json!({
            "index": "cure-wounds",
            "name": "Cure Wounds",
            "level": 1,
            "school": { "index": "evocation", "name": "Evocation" },
            "classes": [{ "index": "cleric", "name": "Cleric" }, { "index": "druid", "name": "Druid" }],
            "casting_time": "1 action",
            "range": "Touch",
            "components": ["V", "S"],
            "duration": "Instantaneous",
            "concentration": false,
            "ritual": false,
            "desc": ["A creature you touch regains hit points."],
            "higher_level": ["Healing increases by 1d8 per slot level above 1st."]
        }),
        _ => return None,
    };
    Some(detail)
}
