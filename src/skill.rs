//! Spelling game logic
//!
//! Typed events come in, the dispatcher picks exactly one handler, and the
//! handler mutates the session state and returns a spoken response.

pub mod dispatch;
mod error;
pub mod event;
pub mod handlers;
pub mod random;
mod response;
mod state;

#[cfg(test)]
mod proptests;

pub use dispatch::{Dispatched, Dispatcher, HandlerInput, RequestHandler, SkillServices};
pub use error::SkillError;
pub use event::{Intent, RequestKind, SkillEvent};
pub use random::{OsRandom, RandomSource};
pub use response::SkillResponse;
pub use state::{GameState, SessionState, WordDetails};
