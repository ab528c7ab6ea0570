//! Class tag registry.
//!
//! Class tags drive filtering, badge text and the derived border colour of a
//! card. The registry keeps registration order so filter checklists list the
//! classes the same way every time.

use serde::Serialize;

use crate::color::Rgb;
use crate::error::{CardError, Result};

/// Registered metadata for one class tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
    pub name: String,
    /// Short badge text, e.g. `WIZ`.
    pub abbreviation: String,
    pub color: Rgb,
    /// File name of this class's card list inside the card directory.
    pub card_file: String,
}

/// Ordered table of known class tags.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassRegistry {
    classes: Vec<ClassInfo>,
}

const DEFAULT_CLASSES: &[(&str, &str, &str)] = &[
    ("Wizard", "WIZ", "#a500a5ff"),
    ("Artificer", "ART", "#9e5b20ff"),
    ("Druid", "DRU", "#059200ff"),
    ("Cleric", "CLE", "#abbfc0ff"),
    ("Bard", "BARD", "#ff69b4"),
    ("Sorcerer", "SOR", "#330063ff"),
    ("Warlock", "WAR", "#b1006dff"),
    ("Paladin", "PAL", "#ffae00ff"),
    ("Ranger", "RAN", "#228b22"),
    ("Fighter", "FIG", "#8b4513"),
    ("Rogue", "ROG", "#2f4f4f"),
    ("Monk", "MONK", "#4682b4"),
    ("Barbarian", "BARB", "#dc143c"),
];

impl ClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard character classes.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, abbreviation, color) in DEFAULT_CLASSES {
            // The table is static and every entry parses.
            if let Ok(color) = Rgb::parse(color) {
                registry.insert(ClassInfo {
                    name: (*name).to_string(),
                    abbreviation: (*abbreviation).to_string(),
                    color,
                    card_file: format!("{}.yml", name.to_lowercase()),
                });
            }
        }
        registry
    }

    /// Register a class tag with a colour given as hex text.
    ///
    /// Re-registering an existing name replaces its metadata in place.
    pub fn register(&mut self, name: &str, abbreviation: &str, color: &str) -> Result<()> {
        let color = Rgb::parse(color)?;
        if name.trim().is_empty() {
            return Err(CardError::Validation("class name is required".to_string()));
        }
        self.insert(ClassInfo {
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            color,
            card_file: format!("{}.yml", name.to_lowercase()),
        });
        Ok(())
    }

    fn insert(&mut self, info: ClassInfo) {
        match self.classes.iter_mut().find(|c| c.name == info.name) {
            Some(existing) => *existing = info,
            None => self.classes.push(info),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Badge text for a tag, falling back to the raw tag when unregistered.
    pub fn badge<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).map_or(name, |c| c.abbreviation.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
