pub mod cards;
pub mod deck;
pub mod export;
pub mod filters;
pub mod schema;
pub mod sheets;
