//! Dictionary lookups
//!
//! One outbound GET per uncached word. Handlers only see the
//! `DictionaryClient` trait.

mod client;
mod error;
mod parse;

pub use client::MerriamWebsterClient;
pub use error::{DictionaryError, DictionaryErrorKind};

use crate::skill::WordDetails;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for dictionary services
#[async_trait]
pub trait DictionaryClient: Send + Sync {
    /// Fetch definitions and example sentences for `word`
    async fn lookup(&self, word: &str) -> Result<WordDetails, DictionaryError>;
}

#[async_trait]
impl<T: DictionaryClient + ?Sized> DictionaryClient for Arc<T> {
    async fn lookup(&self, word: &str) -> Result<WordDetails, DictionaryError> {
        (**self).lookup(word).await
    }
}

/// Logging wrapper for dictionary clients
pub struct LoggingDictionary {
    inner: Arc<dyn DictionaryClient>,
}

impl LoggingDictionary {
    pub fn new(inner: Arc<dyn DictionaryClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DictionaryClient for LoggingDictionary {
    async fn lookup(&self, word: &str) -> Result<WordDetails, DictionaryError> {
        let start = std::time::Instant::now();
        let result = self.inner.lookup(word).await;
        let duration = start.elapsed();

        match &result {
            Ok(details) => {
                tracing::info!(
                    word = %word,
                    duration_ms = %duration.as_millis(),
                    definitions = details.definitions.len(),
                    sentences = details.sentences.len(),
                    "Dictionary lookup completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    word = %word,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "Dictionary lookup failed"
                );
            }
        }

        result
    }
}
