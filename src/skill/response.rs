//! Spoken responses

use serde::Serialize;

/// What the skill says back for one event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillResponse {
    pub speech: Option<String>,
    pub reprompt: Option<String>,
    pub end_session: bool,
}

impl SkillResponse {
    /// Empty response, used for notifications that expect no speech
    pub fn empty() -> Self {
        Self::default()
    }

    /// Speak and keep the session open for an answer
    pub fn ask(speech: impl Into<String>, reprompt: impl Into<String>) -> Self {
        Self {
            speech: Some(speech.into()),
            reprompt: Some(reprompt.into()),
            end_session: false,
        }
    }

    /// Speak and close the session
    pub fn tell(speech: impl Into<String>) -> Self {
        Self {
            speech: Some(speech.into()),
            reprompt: None,
            end_session: true,
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn speech_text(&self) -> &str {
        self.speech.as_deref().unwrap_or_default()
    }
}
