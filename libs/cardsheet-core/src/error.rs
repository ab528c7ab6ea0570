//! Error types for cardsheet-core.

use thiserror::Error;

use crate::types::CardId;

/// Result type alias using CardError.
pub type Result<T> = std::result::Result<T, CardError>;

/// Errors raised while loading, editing or laying out cards.
#[derive(Debug, Error)]
pub enum CardError {
    /// Card text could not be parsed as a sequence of card mappings.
    #[error("parse error in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// Loaded content is well-formed text but not a sequence of cards.
    #[error("not a card deck: {0}")]
    Structural(String),

    /// Required user input was missing or cancelled.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("field {key} is not part of the {card_type} schema")]
    FieldNotInSchema { key: String, card_type: String },

    #[error("could not serialize cards: {0}")]
    Serialize(String),

    #[error("invalid colour: {0}")]
    InvalidColor(String),

    #[error("page capacity must be at least 1")]
    InvalidPageCapacity,
}

impl CardError {
    pub(crate) fn parse(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }
}
