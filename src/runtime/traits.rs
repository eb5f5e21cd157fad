//! Trait abstractions for runtime I/O
//!
//! The runtime only talks to the durable store through `AttributesStore`,
//! so tests can run against an in-memory map.

use crate::db::Database;
use crate::skill::SessionState;
use async_trait::async_trait;
use std::sync::Arc;

/// Durable per-user attribute storage
#[async_trait]
pub trait AttributesStore: Send + Sync {
    /// Load the user's record, `None` if the user has never been saved
    async fn load(&self, user_id: &str) -> Result<Option<SessionState>, String>;

    /// Replace the user's record
    async fn save(&self, user_id: &str, state: &SessionState) -> Result<(), String>;
}

#[async_trait]
impl<T: AttributesStore + ?Sized> AttributesStore for Arc<T> {
    async fn load(&self, user_id: &str) -> Result<Option<SessionState>, String> {
        (**self).load(user_id).await
    }

    async fn save(&self, user_id: &str, state: &SessionState) -> Result<(), String> {
        (**self).save(user_id, state).await
    }
}

// ============================================================================
// Production Adapter
// ============================================================================

/// Adapter to use Database as an `AttributesStore`
#[derive(Clone)]
pub struct DatabaseStore {
    db: Database,
}

impl DatabaseStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttributesStore for DatabaseStore {
    async fn load(&self, user_id: &str) -> Result<Option<SessionState>, String> {
        self.db.get_attributes(user_id).map_err(|e| e.to_string())
    }

    async fn save(&self, user_id: &str, state: &SessionState) -> Result<(), String> {
        self.db
            .save_attributes(user_id, state)
            .map_err(|e| e.to_string())
    }
}
