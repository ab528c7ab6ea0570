//! Remote spell catalog client.
//!
//! Imports spell cards from a D&D 5e SRD style API: one listing request, then
//! one detail request per spell. Failures never abort the import; a failed
//! listing yields no cards and a failed detail skips that spell, and both are
//! reported back to the caller.

use std::collections::BTreeMap;

use cardsheet_core::{CardRecord, CardType};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const SPELLS_PATH: &str = "/api/2014/spells";

/// Catalog errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Reference to another catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiReference {
    #[serde(default)]
    pub index: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct SpellList {
    results: Vec<ApiReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpellDamage {
    #[serde(default)]
    pub damage_type: Option<ApiReference>,
    #[serde(default)]
    pub damage_at_slot_level: BTreeMap<String, String>,
    #[serde(default)]
    pub damage_at_character_level: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpellDc {
    pub dc_type: ApiReference,
}

/// Spell detail as served by the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct SpellDetail {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub level: u8,
    pub school: Option<ApiReference>,
    #[serde(default)]
    pub classes: Vec<ApiReference>,
    #[serde(default)]
    pub subclasses: Vec<ApiReference>,
    #[serde(default)]
    pub casting_time: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub concentration: bool,
    #[serde(default)]
    pub ritual: bool,
    #[serde(default)]
    pub attack_type: Option<String>,
    #[serde(default)]
    pub dc: Option<SpellDc>,
    #[serde(default)]
    pub damage: Option<SpellDamage>,
    #[serde(default)]
    pub desc: Vec<String>,
    #[serde(default)]
    pub higher_level: Vec<String>,
}

impl SpellDetail {
    pub fn is_for_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c.name.eq_ignore_ascii_case(class))
    }
}

/// Outcome of a catalog import.
#[derive(Debug, Default)]
pub struct CatalogImport {
    pub cards: Vec<CardRecord>,
    pub errors: Vec<String>,
}

pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Backend { status, message });
        }

        resp.json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    pub async fn list_spells(&self) -> Result<Vec<ApiReference>, CatalogError> {
        let list: SpellList = self.get_json(SPELLS_PATH).await?;
        Ok(list.results)
    }

    pub async fn spell(&self, index: &str) -> Result<SpellDetail, CatalogError> {
        self.get_json(&format!("{}/{}", SPELLS_PATH, index)).await
    }

    /// Import spell cards, optionally only those available to one class.
    ///
    /// Cards come back sorted by level, then name.
    pub async fn import_spells(&self, class: Option<&str>) -> CatalogImport {
        let mut import = CatalogImport::default();

        let listing = match self.list_spells().await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!("Spell listing failed: {}", e);
                import.errors.push(format!("spell listing: {}", e));
                return import;
            }
        };
        tracing::info!("Fetching {} spell details", listing.len());

        let mut details = Vec::new();
        for entry in &listing {
            match self.spell(&entry.index).await {
                Ok(detail) => {
                    if class.map_or(true, |c| detail.is_for_class(c)) {
                        details.push(detail);
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping spell {}: {}", entry.index, e);
                    import.errors.push(format!("{}: {}", entry.index, e));
                }
            }
        }

        details.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));
        import.cards = details.iter().map(spell_card).collect();
        import
    }
}

/// Convert a catalog spell into a spell card.
pub fn spell_card(detail: &SpellDetail) -> CardRecord {
    let mut card = CardRecord::new(detail.name.clone(), CardType::Spell)
        .with_level(detail.level)
        .with_classes(detail.classes.iter().map(|c| c.name.clone()));

    if let Some(school) = &detail.school {
        card.set_field("school", school.name.clone());
    }
    if !detail.subclasses.is_empty() {
        card.set_list_field("subclasses", detail.subclasses.iter().map(|s| s.name.clone()));
    }
    card.set_field("casting_time", detail.casting_time.clone());
    card.set_field("range", detail.range.clone());
    card.set_field("components", components_text(&detail.components, detail.material.as_deref()));
    card.set_field("duration", detail.duration.clone());
    if detail.concentration {
        card.set_field("concentration", "Yes");
    }
    if detail.ritual {
        card.set_field("ritual", "Yes");
    }
    if let Some(attack_save) = attack_save_text(detail) {
        card.set_field("attack_save", attack_save);
    }
    if let Some(damage) = detail.damage.as_ref().and_then(damage_text) {
        card.set_field("damage", damage);
    }
    if !detail.higher_level.is_empty() {
        card.set_field("higher_level", detail.higher_level.join("\n\n"));
    }
    card.set_field("description", detail.desc.join("\n\n"));
    card
}

fn components_text(components: &[String], material: Option<&str>) -> String {
    let mut text = components.join(", ");
    if let Some(material) = material.filter(|m| !m.trim().is_empty()) {
        text.push_str(&format!(" ({})", material));
    }
    text
}

fn attack_save_text(detail: &SpellDetail) -> Option<String> {
    if let Some(dc) = &detail.dc {
        return Some(format!("{} save", dc.dc_type.name));
    }
    detail.attack_type.as_ref().map(|kind| {
        let mut kind = kind.clone();
        if let Some(first) = kind.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        format!("{} attack", kind)
    })
}

/// Damage at the lowest listed slot or character level.
fn damage_text(damage: &SpellDamage) -> Option<String> {
    let table = if damage.damage_at_slot_level.is_empty() {
        &damage.damage_at_character_level
    } else {
        &damage.damage_at_slot_level
    };
    let dice = table
        .iter()
        .min_by_key(|(level, _)| level.parse::<u32>().unwrap_or(u32::MAX))
        .map(|(_, dice)| dice.clone())?;
    Some(match &damage.damage_type {
        Some(kind) => format!("{} {}", dice, kind.name),
        None => dice,
    })
}
