//! Handler failures

use crate::dictionary::DictionaryError;
use thiserror::Error;

/// Anything that stops a handler from producing its normal response.
///
/// None of these reach the user verbatim; the dispatcher turns every one
/// into the same apology.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("Dictionary lookup failed: {0}")]
    Dictionary(#[from] DictionaryError),
    #[error("Attribute store failed: {0}")]
    Store(String),
    #[error("Missing slot value: {0}")]
    MissingSlot(&'static str),
    #[error("No round in progress")]
    NotPlaying,
    #[error("Nothing to choose from: {0}")]
    NoChoices(&'static str),
}
