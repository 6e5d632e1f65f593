use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Errors a player can run into. None of them end the session; the page shows
/// the message and the player picks again.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("No words found for this category.")]
    InvalidCategory { category: String },
    #[error("'{input}' is not a letter from A to Z.")]
    InvalidLetter { input: String },
    #[error("Please select a category to start.")]
    NoActiveRound,
    #[error("Invalid message: {reason}")]
    InvalidMessage { reason: String },
}
