//! Game flow handlers
//!
//! Each handler reads and mutates `HandlerInput::session` and returns the
//! speech for the turn. Round-ending transitions request a checkpoint.

use super::dispatch::{HandlerInput, RequestHandler};
use super::event::SPELLING_SLOT;
use super::random::{choose, RandomSource};
use super::{Intent, SessionState, SkillError, SkillResponse, WordDetails};
use async_trait::async_trait;

pub const SKILL_NAME: &str = "Spelling Bee Plus";

pub const DEFAULT_WORDS: &[&str] = &["happy", "sad"];

const PLAY_REPROMPT: &str = "Say yes to start the game or no to quit.";
const NEW_GAME_REPROMPT: &str = "Say yes to get a new word or no to end the game.";
pub const GOODBYE_SPEECH: &str = "Thanks for playing!!";
pub const DECLINE_SPEECH: &str = "Ok. See you next time!!";
pub const UNHANDLED_SPEECH: &str = "I can't handle that kind of input. Sorry.";
const HELP_SPEECH: &str = "I ask you to spell words to help you practice. You can ask me to \
     provide definitions, use the word in a sentence or repeat the word. When you're ready, \
     say 'spelling' and then spell the word. I'll ask you to confirm the spelling and then \
     let you know if you're right.";
const HELP_REPROMPT: &str = "Try asking for a definition.";

pub fn unhandled_response() -> SkillResponse {
    SkillResponse::ask(UNHANDLED_SPEECH, UNHANDLED_SPEECH)
}

fn active_word(session: &SessionState) -> Result<String, SkillError> {
    session
        .current_word()
        .map(String::from)
        .ok_or(SkillError::NotPlaying)
}

/// Cached details for the active word, fetched on first use
async fn word_details(input: &mut HandlerInput<'_>) -> Result<(String, WordDetails), SkillError> {
    let word = active_word(&input.session)?;
    if let Some(details) = input.session.cached_details(&word) {
        return Ok((word, details.clone()));
    }

    let details = input.services().dictionary.lookup(&word).await?;
    input.session.cache_details(word.clone(), details.clone());
    Ok((word, details))
}

fn pick<'a>(
    rng: &dyn RandomSource,
    items: &'a [String],
    what: &'static str,
) -> Result<&'a str, SkillError> {
    choose(rng, items)
        .map(String::as_str)
        .ok_or(SkillError::NoChoices(what))
}

/// Normalize spoken letters ("H. A. P. P. Y.") to a word ("happy")
pub fn normalize_spelling(attempt: &str) -> String {
    attempt
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Letters of `word` separated by pauses
pub fn spell_out(word: &str) -> String {
    word.chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(". ")
}

// ============================================================
// Session lifecycle
// ============================================================

pub struct LaunchHandler;

#[async_trait]
impl RequestHandler for LaunchHandler {
    fn name(&self) -> &'static str {
        "launch"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.event.is_launch()
    }

    async fn handle(&self, input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError> {
        input.session = input.persistent_attributes().cloned().unwrap_or_default();

        let speech = format!(
            "Welcome to the Spelling Bee game. You have played {} times. Would you like to play?",
            input.session.games_played
        );
        Ok(SkillResponse::ask(speech, PLAY_REPROMPT))
    }
}

pub struct HelpHandler;

#[async_trait]
impl RequestHandler for HelpHandler {
    fn name(&self) -> &'static str {
        "help"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.event.is_intent(&Intent::Help)
    }

    async fn handle(&self, _input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError> {
        Ok(SkillResponse::ask(HELP_SPEECH, HELP_REPROMPT))
    }
}

pub struct CancelAndStopHandler;

#[async_trait]
impl RequestHandler for CancelAndStopHandler {
    fn name(&self) -> &'static str {
        "cancel_and_stop"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.event.is_intent(&Intent::Cancel) || input.event.is_intent(&Intent::Stop)
    }

    async fn handle(&self, _input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError> {
        Ok(SkillResponse::tell(GOODBYE_SPEECH))
    }
}

pub struct SessionEndedHandler;

#[async_trait]
impl RequestHandler for SessionEndedHandler {
    fn name(&self) -> &'static str {
        "session_ended"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.event.is_session_ended()
    }

    async fn handle(&self, input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError> {
        if let super::RequestKind::SessionEnded { reason } = &input.event.kind {
            tracing::info!(
                user = %input.event.user_id,
                reason = reason.as_deref().unwrap_or("unknown"),
                "Session ended"
            );
        }
        Ok(SkillResponse::empty())
    }
}

// ============================================================
// Starting a round
// ============================================================

/// "Yes" to the play prompt
pub struct AcceptHandler;

#[async_trait]
impl RequestHandler for AcceptHandler {
    fn name(&self) -> &'static str {
        "accept"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        !input.currently_playing() && input.event.is_intent(&Intent::Yes)
    }

    async fn handle(&self, input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError> {
        let services = input.services();
        let word = pick(services.random.as_ref(), &services.words, "candidate words")?.to_string();

        input.session.start_round(word.clone());

        let speech = format!("Please spell {word}.");
        Ok(SkillResponse::ask(speech.clone(), speech))
    }
}

/// "No" to the play prompt
pub struct DeclineHandler;

#[async_trait]
impl RequestHandler for DeclineHandler {
    fn name(&self) -> &'static str {
        "decline"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        !input.currently_playing() && input.event.is_intent(&Intent::No)
    }

    async fn handle(&self, input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError> {
        input.session.decline();
        input.save_persistent_attributes();
        Ok(SkillResponse::tell(DECLINE_SPEECH))
    }
}

/// Fallback, plus yes/no that arrive mid-round
pub struct FallbackHandler;

#[async_trait]
impl RequestHandler for FallbackHandler {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.event.is_intent(&Intent::Fallback)
            || input.event.is_intent(&Intent::Yes)
            || input.event.is_intent(&Intent::No)
    }

    async fn handle(&self, input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError> {
        let response = match input.session.current_word() {
            Some(word) => SkillResponse::ask(
                format!(
                    "The {SKILL_NAME} skill can't help you with that.  \
                     Try asking for an example sentence."
                ),
                format!("Please try to spell {word}."),
            ),
            None => SkillResponse::ask(
                format!(
                    "The {SKILL_NAME} skill can't help you with that.  \
                     It will ask you to spell words and provide definitions and example \
                     sentences. Would you like to play?"
                ),
                PLAY_REPROMPT,
            ),
        };
        Ok(response)
    }
}

// ============================================================
// During a round
// ============================================================

pub struct DefineWordHandler;

#[async_trait]
impl RequestHandler for DefineWordHandler {
    fn name(&self) -> &'static str {
        "define_word"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.currently_playing() && input.event.is_intent(&Intent::DefineWord)
    }

    async fn handle(&self, input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError> {
        let (word, details) = word_details(input).await?;
        let rng = input.services().random.as_ref();

        let speech = format!(
            "Here's a definition for {word}. {}",
            pick(rng, &details.definitions, "definitions")?
        );
        let reprompt = format!(
            "Here's a definition for {word}. {}",
            pick(rng, &details.definitions, "definitions")?
        );
        Ok(SkillResponse::ask(speech, reprompt))
    }
}

pub struct SentenceHandler;

#[async_trait]
impl RequestHandler for SentenceHandler {
    fn name(&self) -> &'static str {
        "sentence"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.currently_playing() && input.event.is_intent(&Intent::Sentence)
    }

    async fn handle(&self, input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError> {
        let (word, details) = word_details(input).await?;
        let rng = input.services().random.as_ref();

        let speech = format!(
            "Here's an example sentence for {word}. {}",
            pick(rng, &details.sentences, "example sentences")?
        );
        let reprompt = format!(
            "Here's an example sentence for {word}. {}",
            pick(rng, &details.sentences, "example sentences")?
        );
        Ok(SkillResponse::ask(speech, reprompt))
    }
}

/// One attempt per round; the round ends either way
pub struct SpellWordHandler;

#[async_trait]
impl RequestHandler for SpellWordHandler {
    fn name(&self) -> &'static str {
        "spell_word"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.currently_playing() && input.event.is_intent(&Intent::SpellWord)
    }

    async fn handle(&self, input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError> {
        let word = active_word(&input.session)?;
        let attempt = input
            .event
            .slot(SPELLING_SLOT)
            .map(normalize_spelling)
            .filter(|a| !a.is_empty())
            .ok_or(SkillError::MissingSlot(SPELLING_SLOT))?;

        let speech = if attempt == word {
            format!(
                "Congratulations. You spelled {word} correctly! Would you like to play a new game?"
            )
        } else {
            format!(
                "Sorry, but your spelling was incorrect. The correct spelling is. {}",
                spell_out(&word)
            )
        };

        input.session.complete_round();
        input.save_persistent_attributes();

        Ok(SkillResponse::ask(speech, NEW_GAME_REPROMPT))
    }
}

pub struct UnhandledHandler;

#[async_trait]
impl RequestHandler for UnhandledHandler {
    fn name(&self) -> &'static str {
        "unhandled"
    }

    fn can_handle(&self, _input: &HandlerInput<'_>) -> bool {
        true
    }

    async fn handle(&self, _input: &mut HandlerInput<'_>) -> Result<SkillResponse, SkillError> {
        Ok(unhandled_response())
    }
}
