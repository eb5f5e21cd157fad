//! Inbound events as the handlers see them

use std::collections::HashMap;

/// Slot carrying the user's spelled-out letters
pub const SPELLING_SLOT: &str = "spelling";

/// Top-level request type from the envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Launch,
    Intent(Intent),
    SessionEnded { reason: Option<String> },
    Other(String),
}

/// Recognized intent names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Yes,
    No,
    Help,
    Cancel,
    Stop,
    Fallback,
    DefineWord,
    Sentence,
    SpellWord,
    Other(String),
}

impl Intent {
    pub fn from_name(name: &str) -> Self {
        match name {
            "AMAZON.YesIntent" => Intent::Yes,
            "AMAZON.NoIntent" => Intent::No,
            "AMAZON.HelpIntent" => Intent::Help,
            "AMAZON.CancelIntent" => Intent::Cancel,
            "AMAZON.StopIntent" => Intent::Stop,
            "AMAZON.FallbackIntent" => Intent::Fallback,
            "DefineWordIntent" => Intent::DefineWord,
            "SentenceIntent" => Intent::Sentence,
            "SpellWordIntent" => Intent::SpellWord,
            other => Intent::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Intent::Yes => "AMAZON.YesIntent",
            Intent::No => "AMAZON.NoIntent",
            Intent::Help => "AMAZON.HelpIntent",
            Intent::Cancel => "AMAZON.CancelIntent",
            Intent::Stop => "AMAZON.StopIntent",
            Intent::Fallback => "AMAZON.FallbackIntent",
            Intent::DefineWord => "DefineWordIntent",
            Intent::Sentence => "SentenceIntent",
            Intent::SpellWord => "SpellWordIntent",
            Intent::Other(name) => name,
        }
    }
}

/// One event addressed to the skill
#[derive(Debug, Clone)]
pub struct SkillEvent {
    pub user_id: String,
    pub kind: RequestKind,
    pub slots: HashMap<String, String>,
}

impl SkillEvent {
    pub fn new(user_id: impl Into<String>, kind: RequestKind) -> Self {
        Self {
            user_id: user_id.into(),
            kind,
            slots: HashMap::new(),
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn intent(user_id: impl Into<String>, intent: Intent) -> Self {
        Self::new(user_id, RequestKind::Intent(intent))
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    pub fn is_launch(&self) -> bool {
        matches!(self.kind, RequestKind::Launch)
    }

    pub fn is_session_ended(&self) -> bool {
        matches!(self.kind, RequestKind::SessionEnded { .. })
    }

    pub fn is_intent(&self, intent: &Intent) -> bool {
        matches!(&self.kind, RequestKind::Intent(i) if i == intent)
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }

    /// Short label for logs
    pub fn label(&self) -> &str {
        match &self.kind {
            RequestKind::Launch => "LaunchRequest",
            RequestKind::Intent(intent) => intent.name(),
            RequestKind::SessionEnded { .. } => "SessionEndedRequest",
            RequestKind::Other(kind) => kind,
        }
    }
}
