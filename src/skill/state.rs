//! Per-user game state
//!
//! The same record lives in two places: the session attributes the voice
//! platform echoes back on every turn, and the durable attribute store.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where the user is in the spelling game.
///
/// The active word only exists while a round is in progress, so it lives
/// inside the `Started` variant instead of beside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    #[default]
    Ended,
    Started {
        word: String,
    },
}

impl GameState {
    pub fn is_started(&self) -> bool {
        matches!(self, GameState::Started { .. })
    }

    pub fn word(&self) -> Option<&str> {
        match self {
            GameState::Started { word } => Some(word),
            GameState::Ended => None,
        }
    }
}

/// Definitions and example sentences fetched for one word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDetails {
    pub definitions: Vec<String>,
    pub sentences: Vec<String>,
}

/// Session attributes for one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub games_played: u64,
    pub ended_session_count: u64,
    pub game: GameState,
    /// Lookups accumulated for this user; entries are never evicted.
    pub definitions_cache: HashMap<String, WordDetails>,
}

impl SessionState {
    pub fn currently_playing(&self) -> bool {
        self.game.is_started()
    }

    pub fn current_word(&self) -> Option<&str> {
        self.game.word()
    }

    /// ENDED -> STARTED with the given word.
    pub fn start_round(&mut self, word: impl Into<String>) {
        self.game = GameState::Started { word: word.into() };
    }

    /// Finish the current round after a spelling attempt.
    pub fn complete_round(&mut self) {
        self.games_played += 1;
        self.game = GameState::Ended;
    }

    /// The user declined to play.
    pub fn decline(&mut self) {
        self.ended_session_count += 1;
        self.game = GameState::Ended;
    }

    pub fn cached_details(&self, word: &str) -> Option<&WordDetails> {
        self.definitions_cache.get(word)
    }

    pub fn cache_details(&mut self, word: impl Into<String>, details: WordDetails) {
        self.definitions_cache.insert(word.into(), details);
    }
}
