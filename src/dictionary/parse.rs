//! Extraction of definitions and usage examples from collegiate JSON
//!
//! The response is an array of entries. The first entry carries `shortdef`
//! (plain strings) and `def[0].sseq`, a nested list of senses whose `dt`
//! arrays may hold `["vis", [{"t": "..."}]]` usage examples marked up with
//! `{it}word{/it}` style tags.

use super::DictionaryError;
use crate::skill::WordDetails;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Spoken when no usable example sentence exists
pub const NO_SENTENCES: &str = "there are no valid example sentences to use";

const SHORTDEF_SEPARATOR: &str = " : ";

fn markup_tag() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"\{.*?\}").expect("static regex"))
}

/// Parse a raw response body for `word`
pub fn parse_word_details(word: &str, body: &str) -> Result<WordDetails, DictionaryError> {
    let content: Value = serde_json::from_str(body)
        .map_err(|e| DictionaryError::parse(format!("Response is not JSON: {e}")))?;
    parse_entries(word, &content)
}

/// Parse an already-decoded response for `word`
pub fn parse_entries(word: &str, content: &Value) -> Result<WordDetails, DictionaryError> {
    let entries = content
        .as_array()
        .ok_or_else(|| DictionaryError::parse("Expected a JSON array of entries"))?;

    let entry = entries
        .first()
        .ok_or_else(|| DictionaryError::not_found(format!("No entries for '{word}'")))?;

    // Unknown words come back as an array of spelling suggestions
    if entry.is_string() {
        return Err(DictionaryError::not_found(format!(
            "No entries for '{word}', only suggestions"
        )));
    }
    if !entry.is_object() {
        return Err(DictionaryError::parse("First entry is not an object"));
    }

    let definitions = short_definitions(entry)?;
    let sentences = example_sentences(word, entry);

    Ok(WordDetails {
        definitions,
        sentences,
    })
}

fn short_definitions(entry: &Value) -> Result<Vec<String>, DictionaryError> {
    let shortdef = entry
        .get("shortdef")
        .and_then(Value::as_array)
        .ok_or_else(|| DictionaryError::parse("Entry has no shortdef list"))?;

    let definitions: Vec<String> = shortdef
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|d| d.split(SHORTDEF_SEPARATOR).next())
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
        .collect();

    if definitions.is_empty() {
        return Err(DictionaryError::not_found("Entry has no short definitions"));
    }
    Ok(definitions)
}

fn example_sentences(word: &str, entry: &Value) -> Vec<String> {
    let marked = format!("}}{word}{{");

    let mut sentences: Vec<String> = senses(entry)
        .filter_map(first_usage)
        .filter(|text| text.contains(&marked))
        .map(|text| markup_tag().replace_all(text, "").trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    if sentences.is_empty() {
        sentences.push(NO_SENTENCES.to_string());
    }
    sentences
}

/// Each sense under `def[0].sseq`; missing structure yields nothing
fn senses(entry: &Value) -> impl Iterator<Item = &Value> {
    entry
        .get("def")
        .and_then(|d| d.get(0))
        .and_then(|d| d.get("sseq"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// `sense[0][1].dt` -> first `vis` block -> first usage text
fn first_usage(sense: &Value) -> Option<&str> {
    let dt = sense.get(0)?.get(1)?.get("dt")?.as_array()?;
    let vis = dt
        .iter()
        .find(|item| item.get(0).and_then(Value::as_str) == Some("vis"))?;
    vis.get(1)?.get(0)?.get("t")?.as_str()
}
