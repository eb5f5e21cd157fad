//! Wire envelope types
//!
//! The voice platform's JSON request and response shapes, reduced to the
//! fields this skill reads and writes.

use crate::skill::{Intent, RequestKind, SessionState, SkillEvent, SkillResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const ENVELOPE_VERSION: &str = "1.0";

/// Inbound event envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub session: Option<SessionInfo>,
    #[serde(default)]
    pub context: Option<ContextInfo>,
    pub request: RequestBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub attributes: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ContextInfo {
    #[serde(rename = "System")]
    pub system: Option<SystemInfo>,
}

#[derive(Debug, Deserialize)]
pub struct SystemInfo {
    pub user: Option<UserInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub intent: Option<IntentBody>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IntentBody {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, SlotBody>,
}

#[derive(Debug, Deserialize)]
pub struct SlotBody {
    #[serde(default)]
    pub value: Option<String>,
}

impl RequestEnvelope {
    /// User id from the session, falling back to the device context
    pub fn user_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.user.as_ref())
            .or_else(|| {
                self.context
                    .as_ref()
                    .and_then(|c| c.system.as_ref())
                    .and_then(|s| s.user.as_ref())
            })
            .map(|u| u.user_id.as_str())
    }

    /// Attributes echoed from the previous turn. New sessions and empty
    /// objects carry none.
    pub fn session_attributes(&self) -> Result<Option<SessionState>, String> {
        let Some(session) = &self.session else {
            return Ok(None);
        };
        if session.new {
            return Ok(None);
        }
        match &session.attributes {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) if map.is_empty() => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| format!("Invalid session attributes: {e}")),
        }
    }

    /// Convert to the typed event the dispatcher routes on
    pub fn to_event(&self) -> Result<SkillEvent, String> {
        let user_id = self.user_id().ok_or("Envelope has no user id")?;

        let kind = match self.request.kind.as_str() {
            "LaunchRequest" => RequestKind::Launch,
            "SessionEndedRequest" => RequestKind::SessionEnded {
                reason: self.request.reason.clone(),
            },
            "IntentRequest" => {
                let intent = self
                    .request
                    .intent
                    .as_ref()
                    .ok_or("IntentRequest has no intent")?;
                RequestKind::Intent(Intent::from_name(&intent.name))
            }
            other => RequestKind::Other(other.to_string()),
        };

        let mut event = SkillEvent::new(user_id, kind);
        if let Some(intent) = &self.request.intent {
            for (name, slot) in &intent.slots {
                if let Some(value) = &slot.value {
                    event = event.with_slot(name.clone(), value.clone());
                }
            }
        }
        Ok(event)
    }
}

/// Outbound response envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: &'static str,
    pub session_attributes: SessionState,
    pub response: ResponseBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl OutputSpeech {
    pub fn plain(text: String) -> Self {
        Self {
            kind: "PlainText",
            text,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl ResponseEnvelope {
    pub fn new(session_attributes: SessionState, response: SkillResponse) -> Self {
        // A closing response never re-asks
        let reprompt = if response.end_session {
            None
        } else {
            response.reprompt.map(|text| Reprompt {
                output_speech: OutputSpeech::plain(text),
            })
        };

        Self {
            version: ENVELOPE_VERSION,
            session_attributes,
            response: ResponseBody {
                output_speech: response.speech.map(OutputSpeech::plain),
                reprompt,
                should_end_session: response.end_session,
            },
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
