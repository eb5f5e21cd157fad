//! Property-based tests for the game flow
//!
//! Arbitrary event sequences are pushed through the dispatcher and the
//! counter and round invariants are checked after every step.

use super::*;
use crate::runtime::testing::{FixedRandom, MockDictionary};
use proptest::prelude::*;
use std::sync::Arc;

const WORDS: &[&str] = &["happy", "sad"];

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::Yes),
        Just(Intent::No),
        Just(Intent::Help),
        Just(Intent::Fallback),
        Just(Intent::DefineWord),
        Just(Intent::Sentence),
        Just(Intent::SpellWord),
        Just(Intent::Cancel),
        "[A-Za-z]{3,12}Intent".prop_map(Intent::Other),
    ]
}

fn arb_event() -> impl Strategy<Value = SkillEvent> {
    prop_oneof![
        1 => Just(SkillEvent::new("user", RequestKind::Launch)),
        1 => Just(SkillEvent::new("user", RequestKind::SessionEnded { reason: None })),
        8 => (arb_intent(), proptest::option::of("[a-z .]{0,8}")).prop_map(|(intent, spelling)| {
            let event = SkillEvent::intent("user", intent);
            match spelling {
                Some(s) => event.with_slot(event::SPELLING_SLOT, s),
                None => event,
            }
        }),
    ]
}

fn services(dictionary: Arc<MockDictionary>, pick: usize) -> SkillServices {
    SkillServices::new(
        dictionary,
        Arc::new(FixedRandom::new(pick)),
        WORDS.iter().map(|w| (*w).to_string()).collect(),
    )
}

fn run(events: &[SkillEvent], pick: usize) -> Result<(), TestCaseError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    let dictionary = Arc::new(MockDictionary::always(WordDetails {
        definitions: vec!["a definition".into()],
        sentences: vec!["a sentence".into()],
    }));
    let services = services(dictionary.clone(), pick);
    let dispatcher = Dispatcher::standard();

    let mut session = SessionState::default();
    let mut persisted: Option<SessionState> = None;
    let mut seen = 0;

    for event in events {
        let before = session.clone();
        let mut input = HandlerInput::new(event, session.clone(), persisted.clone(), &services);
        let dispatched = runtime.block_on(dispatcher.dispatch(&mut input));
        let checkpoint = input.checkpoint_requested();
        let after = input.into_session();

        prop_assert!(after.games_played >= before.games_played);
        prop_assert!(after.ended_session_count >= before.ended_session_count);

        // A word already in the loaded cache is never fetched again
        let lookups = dictionary.lookups();
        for word in lookups.get(seen..).unwrap_or_default() {
            prop_assert!(before.cached_details(word).is_none(), "refetched {}", word);
        }
        seen = lookups.len();

        match dispatched.handler {
            "accept" => {
                prop_assert!(!before.currently_playing());
                prop_assert!(after.currently_playing());
                prop_assert!(WORDS.contains(&after.current_word().unwrap_or_default()));
                prop_assert_eq!(after.games_played, before.games_played);
            }
            "decline" => {
                prop_assert_eq!(after.ended_session_count, before.ended_session_count + 1);
                prop_assert_eq!(after.games_played, before.games_played);
                prop_assert!(checkpoint);
            }
            "spell_word" if dispatched.result.is_ok() => {
                prop_assert!(before.currently_playing());
                prop_assert!(!after.currently_playing());
                prop_assert_eq!(after.games_played, before.games_played + 1);
                prop_assert_eq!(after.ended_session_count, before.ended_session_count);
                prop_assert!(checkpoint);
            }
            "launch" => {}
            _ => {
                prop_assert_eq!(after.games_played, before.games_played);
                prop_assert_eq!(after.ended_session_count, before.ended_session_count);
                prop_assert!(!checkpoint);
            }
        }

        // Failed handlers leave the in-memory state untouched upstream
        session = if dispatched.result.is_ok() { after } else { before };
        if checkpoint && dispatched.result.is_ok() {
            persisted = Some(session.clone());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_game_invariants(events in prop::collection::vec(arb_event(), 1..40), pick in 0usize..2) {
        run(&events, pick)?;
    }
}

#[test]
fn test_scenario_correct_spelling() {
    let events = vec![
        SkillEvent::new("user", RequestKind::Launch),
        SkillEvent::intent("user", Intent::Yes),
        SkillEvent::intent("user", Intent::SpellWord).with_slot(event::SPELLING_SLOT, "s. a. d."),
    ];
    run(&events, 1).unwrap();
}
