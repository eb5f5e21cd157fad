//! Merriam-Webster collegiate dictionary client

use super::parse::parse_word_details;
use super::{DictionaryClient, DictionaryError};
use crate::skill::WordDetails;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

pub const DEFAULT_ENDPOINT: &str =
    "https://www.dictionaryapi.com/api/v3/references/collegiate/json";

/// HTTP client for the collegiate dictionary API
pub struct MerriamWebsterClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl MerriamWebsterClient {
    pub fn new(api_key: impl Into<String>, endpoint: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string(),
        }
    }

    /// `{endpoint}/{word}?key={api_key}`
    fn lookup_url(&self, word: &str) -> Result<Url, DictionaryError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| DictionaryError::network(format!("Invalid endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| DictionaryError::network("Endpoint cannot take a path"))?
            .pop_if_empty()
            .push(word);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    fn classify_error(status: StatusCode, body: &str) -> DictionaryError {
        match status.as_u16() {
            404 => DictionaryError::not_found(format!("Not found: {body}")),
            _ => DictionaryError::status(format!("HTTP {status}: {body}")),
        }
    }
}

#[async_trait]
impl DictionaryClient for MerriamWebsterClient {
    async fn lookup(&self, word: &str) -> Result<WordDetails, DictionaryError> {
        let url = self.lookup_url(word)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_connect() {
                DictionaryError::network(format!("Connection failed: {e}"))
            } else {
                DictionaryError::network(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DictionaryError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        parse_word_details(word, &body)
    }
}
