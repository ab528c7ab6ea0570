//! Core card sheet library shared by the editor service.
//!
//! Provides:
//! - Card model with per-type field schemas (spell, weapon, armor)
//! - YAML card loader with class-scoped merging and saved-deck round trips
//! - Filter engine and class-derived border colours
//! - Sheet layout for printable pages and double-sided backing sheets
//! - Card mutation operations and the editing session that ties them together

pub mod classes;
pub mod color;
pub mod error;
pub mod filter;
pub mod layout;
pub mod loader;
pub mod mutation;
pub mod session;
pub mod store;
pub mod types;

pub use classes::{ClassInfo, ClassRegistry};
pub use color::Rgb;
pub use error::{CardError, Result};
pub use filter::{border_color, visible_cards, FilterSelection};
pub use layout::{build_sheets, Sheet, SheetLayout, DEFAULT_PAGE_CAPACITY};
pub use loader::{dump_cards, load_saved_deck, merge_sources, parse_cards, CardSource, LoadReport};
pub use mutation::MutationOutcome;
pub use session::EditorSession;
pub use store::{CardStore, StoredCard};
pub use types::{CardId, CardRecord, CardType, FieldSpec, MAX_LEVEL};
