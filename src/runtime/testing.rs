//! Mock implementations for testing
//!
//! These mocks enable handler and runtime tests without real I/O.

use super::traits::AttributesStore;
use crate::dictionary::{DictionaryClient, DictionaryError};
use crate::skill::{RandomSource, SessionState, WordDetails};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

// ============================================================================
// Mock Dictionary
// ============================================================================

/// Dictionary that returns queued results and records every lookup
pub struct MockDictionary {
    responses: Mutex<VecDeque<Result<WordDetails, DictionaryError>>>,
    fallback: Option<WordDetails>,
    lookups: Mutex<Vec<String>>,
}

impl MockDictionary {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: None,
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Answer every lookup with the same details
    pub fn always(details: WordDetails) -> Self {
        Self {
            fallback: Some(details),
            ..Self::new()
        }
    }

    pub fn queue_details(&self, details: WordDetails) {
        self.responses.lock().unwrap().push_back(Ok(details));
    }

    pub fn queue_error(&self, error: DictionaryError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Words looked up so far, in order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl Default for MockDictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DictionaryClient for MockDictionary {
    async fn lookup(&self, word: &str) -> Result<WordDetails, DictionaryError> {
        self.lookups.lock().unwrap().push(word.to_string());
        if let Some(queued) = self.responses.lock().unwrap().pop_front() {
            return queued;
        }
        self.fallback
            .clone()
            .ok_or_else(|| DictionaryError::network("No mock response queued"))
    }
}

// ============================================================================
// Fixed Random Source
// ============================================================================

/// Always picks the same index (wrapped into range)
pub struct FixedRandom {
    index: usize,
}

impl FixedRandom {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl RandomSource for FixedRandom {
    fn index(&self, len: usize) -> usize {
        self.index % len
    }
}

// ============================================================================
// In-Memory Store
// ============================================================================

/// Attribute store backed by a map, with a failure switch
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<HashMap<String, SessionState>>,
    saves: Mutex<Vec<String>>,
    fail_saves: Mutex<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, user_id: &str, state: SessionState) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(user_id.to_string(), state);
        self
    }

    pub fn record(&self, user_id: &str) -> Option<SessionState> {
        self.records.lock().unwrap().get(user_id).cloned()
    }

    /// User ids in save order
    pub fn saves(&self) -> Vec<String> {
        self.saves.lock().unwrap().clone()
    }

    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }
}

#[async_trait]
impl AttributesStore for InMemoryStore {
    async fn load(&self, user_id: &str) -> Result<Option<SessionState>, String> {
        Ok(self.record(user_id))
    }

    async fn save(&self, user_id: &str, state: &SessionState) -> Result<(), String> {
        if *self.fail_saves.lock().unwrap() {
            return Err("store unavailable".to_string());
        }
        self.saves.lock().unwrap().push(user_id.to_string());
        self.records
            .lock()
            .unwrap()
            .insert(user_id.to_string(), state.clone());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_dictionary_queue_then_error() {
        let mock = MockDictionary::new();
        mock.queue_details(WordDetails::default());

        assert!(mock.lookup("happy").await.is_ok());
        assert!(mock.lookup("happy").await.is_err());
        assert_eq!(mock.lookups(), vec!["happy", "happy"]);
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryStore::new();
        assert_eq!(store.load("u").await.unwrap(), None);

        store.save("u", &SessionState::default()).await.unwrap();
        assert_eq!(store.saves(), vec!["u"]);

        store.fail_saves(true);
        assert!(store.save("u", &SessionState::default()).await.is_err());
        assert_eq!(store.saves().len(), 1);
    }

    #[test]
    fn test_fixed_random_wraps() {
        let rng = FixedRandom::new(5);
        assert_eq!(rng.index(2), 1);
        assert_eq!(rng.index(10), 5);
    }
}
