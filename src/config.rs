//! Process configuration from the environment

use crate::skill::handlers::DEFAULT_WORDS;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub const API_KEY_VAR: &str = "DICTIONARY_API_KEY";
pub const ENDPOINT_VAR: &str = "DICTIONARY_ENDPOINT";
pub const DB_PATH_VAR: &str = "SPELLING_BEE_DB_PATH";
pub const PORT_VAR: &str = "SPELLING_BEE_PORT";
pub const WORDS_VAR: &str = "SPELLING_BEE_WORDS";

const DEFAULT_PORT: u16 = 8000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Skill configuration
#[derive(Clone)]
pub struct SkillConfig {
    pub dictionary_api_key: String,
    /// Override for the dictionary base URL
    pub dictionary_endpoint: Option<String>,
    pub db_path: String,
    pub port: u16,
    pub words: Vec<String>,
}

// Hand-written so the API key never reaches a log line
impl fmt::Debug for SkillConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillConfig")
            .field("dictionary_api_key", &"<redacted>")
            .field("dictionary_endpoint", &self.dictionary_endpoint)
            .field("db_path", &self.db_path)
            .field("port", &self.port)
            .field("words", &self.words)
            .finish()
    }
}

impl SkillConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build from an explicit variable map
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

        let dictionary_api_key = get(API_KEY_VAR)
            .ok_or(ConfigError::Missing(API_KEY_VAR))?
            .to_string();

        let port = match get(PORT_VAR) {
            Some(p) => p.parse().map_err(|e| ConfigError::Invalid {
                var: PORT_VAR,
                reason: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let db_path = get(DB_PATH_VAR).map_or_else(
            || {
                let home = vars.get("HOME").map_or("/tmp", String::as_str);
                format!("{home}/.spelling-bee/attributes.db")
            },
            String::from,
        );

        let words = match get(WORDS_VAR) {
            Some(list) => parse_words(list)?,
            None => DEFAULT_WORDS.iter().map(|w| (*w).to_string()).collect(),
        };

        Ok(Self {
            dictionary_api_key,
            dictionary_endpoint: get(ENDPOINT_VAR).map(String::from),
            db_path,
            port,
            words,
        })
    }
}

fn parse_words(list: &str) -> Result<Vec<String>, ConfigError> {
    let words: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    if words.is_empty() {
        return Err(ConfigError::Invalid {
            var: WORDS_VAR,
            reason: "no words listed".to_string(),
        });
    }
    if let Some(bad) = words.iter().find(|w| !w.chars().all(char::is_alphabetic)) {
        return Err(ConfigError::Invalid {
            var: WORDS_VAR,
            reason: format!("'{bad}' is not a single spellable word"),
        });
    }
    Ok(words)
}
