//! Routing of events to handlers
//!
//! Handlers sit in an explicit ordered list. The first one whose
//! `can_handle` returns true runs; nothing else is consulted.

use super::handlers;
use super::random::RandomSource;
use super::{SessionState, SkillError, SkillEvent, SkillResponse};
use crate::dictionary::DictionaryClient;
use async_trait::async_trait;
use std::sync::Arc;

pub const ERROR_SPEECH: &str = "Sorry, I can't understand that. Please say again!!";

/// Collaborators a handler may call
pub struct SkillServices {
    pub dictionary: Arc<dyn DictionaryClient>,
    pub random: Arc<dyn RandomSource>,
    /// Candidate words for a new round
    pub words: Vec<String>,
}

impl SkillServices {
    pub fn new(
        dictionary: Arc<dyn DictionaryClient>,
        random: Arc<dyn RandomSource>,
        words: Vec<String>,
    ) -> Self {
        Self {
            dictionary,
            random,
            words,
        }
    }
}

/// Everything a handler sees for one event
pub struct HandlerInput<'a> {
    pub event: &'a SkillEvent,
    /// In-memory session attributes; handlers mutate this copy
    pub session: SessionState,
    persisted: Option<SessionState>,
    services: &'a SkillServices,
    checkpoint: bool,
}

impl<'a> HandlerInput<'a> {
    pub fn new(
        event: &'a SkillEvent,
        session: SessionState,
        persisted: Option<SessionState>,
        services: &'a SkillServices,
    ) -> Self {
        Self {
            event,
            session,
            persisted,
            services,
            checkpoint: false,
        }
    }

    pub fn currently_playing(&self) -> bool {
        self.session.currently_playing()
    }

    /// The durable record loaded for this user, if one exists
    pub fn persistent_attributes(&self) -> Option<&SessionState> {
        self.persisted.as_ref()
    }

    pub fn services(&self) -> &'a SkillServices {
        self.services
    }

    /// Ask the runtime to write the session attributes to durable storage
    pub fn save_persistent_attributes(&mut self) {
        self.checkpoint = true;
    }

    pub fn checkpoint_requested(&self) -> bool {
        self.checkpoint
    }

    pub fn into_session(self) -> SessionState {
        self.session
    }
}

/// One entry in the dispatch table
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Handler name for logs
    fn name(&self) -> &'static str;

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool;

    async fn handle(&self, input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError>;
}

/// Result of routing one event
#[derive(Debug)]
pub struct Dispatched {
    pub handler: &'static str,
    pub result: Result<SkillResponse, SkillError>,
}

/// Ordered handler list
pub struct Dispatcher {
    handlers: Vec<Box<dyn RequestHandler>>,
}

impl Dispatcher {
    pub fn new(handlers: Vec<Box<dyn RequestHandler>>) -> Self {
        Self { handlers }
    }

    /// The skill's handler table.
    ///
    /// Session-aware handlers come before the generic ones that share their
    /// intents; the catch-all is last.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(handlers::LaunchHandler),
            Box::new(handlers::HelpHandler),
            Box::new(handlers::CancelAndStopHandler),
            Box::new(handlers::SessionEndedHandler),
            Box::new(handlers::AcceptHandler),
            Box::new(handlers::DeclineHandler),
            Box::new(handlers::FallbackHandler),
            Box::new(handlers::DefineWordHandler),
            Box::new(handlers::SentenceHandler),
            Box::new(handlers::SpellWordHandler),
            Box::new(handlers::UnhandledHandler),
        ])
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Run the first matching handler
    pub async fn dispatch(&self, input: &mut HandlerInput<'_>) -> Dispatched {
        let Some(handler) = self.handlers.iter().find(|h| h.can_handle(&*input)) else {
            tracing::warn!(request = %input.event.label(), "No handler matched");
            return Dispatched {
                handler: "none",
                result: Ok(handlers::unhandled_response()),
            };
        };

        tracing::info!(
            request = %input.event.label(),
            handler = handler.name(),
            playing = input.currently_playing(),
            "Dispatching request"
        );

        let result = handler.handle(input).await;
        if let Ok(response) = &result {
            tracing::debug!(handler = handler.name(), response = ?response, "Response");
        }

        Dispatched {
            handler: handler.name(),
            result,
        }
    }
}

/// The catch-all exception handler: log and apologise
pub fn error_response(handler: &str, error: &SkillError) -> SkillResponse {
    tracing::error!(handler = %handler, error = %error, details = ?error, "Handler failed");
    SkillResponse::ask(ERROR_SPEECH, ERROR_SPEECH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::{FixedRandom, MockDictionary};
    use crate::skill::{Intent, RequestKind};

    fn services() -> SkillServices {
        SkillServices::new(
            Arc::new(MockDictionary::new()),
            Arc::new(FixedRandom::new(0)),
            vec!["happy".to_string(), "sad".to_string()],
        )
    }

    async fn route(event: &SkillEvent, session: SessionState) -> &'static str {
        let services = services();
        let mut input = HandlerInput::new(event, session, None, &services);
        Dispatcher::standard().dispatch(&mut input).await.handler
    }

    fn playing() -> SessionState {
        let mut state = SessionState::default();
        state.start_round("happy");
        state
    }

    #[tokio::test]
    async fn test_yes_routes_by_game_state() {
        let yes = SkillEvent::intent("u", Intent::Yes);
        assert_eq!(route(&yes, SessionState::default()).await, "accept");
        assert_eq!(route(&yes, playing()).await, "fallback");
    }

    #[tokio::test]
    async fn test_no_routes_by_game_state() {
        let no = SkillEvent::intent("u", Intent::No);
        assert_eq!(route(&no, SessionState::default()).await, "decline");
        assert_eq!(route(&no, playing()).await, "fallback");
    }

    #[tokio::test]
    async fn test_game_intents_need_a_round() {
        for intent in [Intent::DefineWord, Intent::Sentence, Intent::SpellWord] {
            let event = SkillEvent::intent("u", intent);
            assert_eq!(route(&event, SessionState::default()).await, "unhandled");
        }
        let define = SkillEvent::intent("u", Intent::DefineWord);
        assert_eq!(route(&define, playing()).await, "define_word");
        let sentence = SkillEvent::intent("u", Intent::Sentence);
        assert_eq!(route(&sentence, playing()).await, "sentence");
        let spell = SkillEvent::intent("u", Intent::SpellWord);
        assert_eq!(route(&spell, playing()).await, "spell_word");
    }

    #[tokio::test]
    async fn test_state_independent_routes() {
        let cases = [
            (SkillEvent::new("u", RequestKind::Launch), "launch"),
            (SkillEvent::intent("u", Intent::Help), "help"),
            (SkillEvent::intent("u", Intent::Cancel), "cancel_and_stop"),
            (SkillEvent::intent("u", Intent::Stop), "cancel_and_stop"),
            (SkillEvent::intent("u", Intent::Fallback), "fallback"),
            (
                SkillEvent::new("u", RequestKind::SessionEnded { reason: None }),
                "session_ended",
            ),
            (
                SkillEvent::new("u", RequestKind::Other("CanFulfillIntentRequest".into())),
                "unhandled",
            ),
        ];
        for (event, expected) in cases {
            assert_eq!(route(&event, SessionState::default()).await, expected);
            assert_eq!(route(&event, playing()).await, expected);
        }
    }

    #[tokio::test]
    async fn test_empty_table_falls_back_to_unhandled() {
        let services = services();
        let event = SkillEvent::intent("u", Intent::Help);
        let mut input = HandlerInput::new(&event, SessionState::default(), None, &services);
        let dispatched = Dispatcher::new(vec![]).dispatch(&mut input).await;
        assert_eq!(dispatched.handler, "none");
        let response = dispatched.result.unwrap();
        assert_eq!(response.speech_text(), handlers::UNHANDLED_SPEECH);
    }

    #[test]
    fn test_standard_table_ends_with_catch_all() {
        let names = Dispatcher::standard().handler_names();
        assert_eq!(names.last(), Some(&"unhandled"));
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_error_response_is_apology() {
        let response = error_response("define_word", &SkillError::NotPlaying);
        assert_eq!(response.speech_text(), ERROR_SPEECH);
        assert_eq!(response.reprompt.as_deref(), Some(ERROR_SPEECH));
        assert!(!response.end_session);
    }
}
