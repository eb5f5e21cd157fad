//! Per-event runtime
//!
//! Loads the user's attributes, runs the dispatcher, and writes the
//! checkpoint a handler asked for. Every failure on this path turns into
//! the apology response; nothing escapes to the caller.

pub mod traits;

#[cfg(test)]
pub mod testing;

pub use traits::*;

use crate::skill::dispatch::error_response;
use crate::skill::{
    Dispatcher, HandlerInput, SessionState, SkillError, SkillEvent, SkillResponse, SkillServices,
};

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime = SkillRuntime<DatabaseStore>;

/// What goes back to the voice platform for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillReply {
    /// Session attributes for the platform to echo on the next turn
    pub session: SessionState,
    pub response: SkillResponse,
}

/// Stateless event processor; all per-user state is in the store or the envelope
pub struct SkillRuntime<S: AttributesStore> {
    store: S,
    dispatcher: Dispatcher,
    services: SkillServices,
}

impl<S: AttributesStore> SkillRuntime<S> {
    pub fn new(store: S, dispatcher: Dispatcher, services: SkillServices) -> Self {
        Self {
            store,
            dispatcher,
            services,
        }
    }

    /// Handle one event. `session_attributes` is what the platform echoed
    /// back from the previous turn of the same session, if anything.
    pub async fn handle_event(
        &self,
        event: &SkillEvent,
        session_attributes: Option<SessionState>,
    ) -> SkillReply {
        let persisted = match self.store.load(&event.user_id).await {
            Ok(record) => record,
            Err(e) => {
                let session = session_attributes.unwrap_or_default();
                return SkillReply {
                    session,
                    response: error_response("load_attributes", &SkillError::Store(e)),
                };
            }
        };

        let session = session_attributes
            .or_else(|| persisted.clone())
            .unwrap_or_default();
        let original = session.clone();

        let mut input = HandlerInput::new(event, session, persisted, &self.services);
        let dispatched = self.dispatcher.dispatch(&mut input).await;
        let checkpoint = input.checkpoint_requested();
        let session = input.into_session();

        let response = match dispatched.result {
            Ok(response) => response,
            Err(e) => {
                return SkillReply {
                    session: original,
                    response: error_response(dispatched.handler, &e),
                };
            }
        };

        if checkpoint {
            if let Err(e) = self.store.save(&event.user_id, &session).await {
                return SkillReply {
                    session: original,
                    response: error_response(dispatched.handler, &SkillError::Store(e)),
                };
            }
            tracing::info!(
                user = %event.user_id,
                games_played = session.games_played,
                ended_session_count = session.ended_session_count,
                "Attributes saved"
            );
        }

        SkillReply { session, response }
    }
}
