//! Dictionary lookup error types

use thiserror::Error;

/// Dictionary error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DictionaryError {
    pub kind: DictionaryErrorKind,
    pub message: String,
}

impl DictionaryError {
    pub fn new(kind: DictionaryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(DictionaryErrorKind::Network, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(DictionaryErrorKind::Status, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(DictionaryErrorKind::Parse, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(DictionaryErrorKind::NotFound, message)
    }
}

/// Error classification for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryErrorKind {
    /// Connection failures, unreadable bodies
    Network,
    /// Non-2xx response
    Status,
    /// Body is not the JSON shape we expect
    Parse,
    /// The service has no entry for the word
    NotFound,
}
