//! Stateless parse/serialize endpoints
//!
//! These operate on values passed from JavaScript and hold no state;
//! the editing session endpoints live in [`super::session`].

use wasm_bindgen::prelude::*;

use super::helpers;
use crate::key::SongKey;
use crate::models::{ChordParagraph, Paragraph};
use crate::{parse, render};

/// Parse raw song content into display paragraphs (chords stripped)
///
/// Returns a JavaScript array of Paragraph objects.
#[wasm_bindgen(js_name = parseLyrics)]
pub fn parse_lyrics(content: Option<String>) -> Result<js_sys::Array, JsValue> {
    let paragraphs = parse::parse_to_paragraphs(content.as_deref());

    let result = js_sys::Array::new();
    for paragraph in &paragraphs {
        result.push(&helpers::serialize(paragraph, "Failed to serialize paragraph")?);
    }
    Ok(result)
}

/// Parse raw song content into chord-preserving paragraphs
#[wasm_bindgen(js_name = parseChords)]
pub fn parse_chords(content: Option<String>) -> Result<js_sys::Array, JsValue> {
    let paragraphs = parse::parse_to_chord_paragraphs(content.as_deref());

    let result = js_sys::Array::new();
    for paragraph in &paragraphs {
        result.push(&helpers::serialize(paragraph, "Failed to serialize chord paragraph")?);
    }
    Ok(result)
}

/// Serialize plain paragraphs back to song markup
#[wasm_bindgen(js_name = serializeParagraphs)]
pub fn serialize_paragraphs(paragraphs_js: JsValue) -> Result<String, JsValue> {
    let paragraphs: Vec<Paragraph> =
        helpers::deserialize(paragraphs_js, "Failed to deserialize paragraphs")?;
    Ok(render::serialize(&paragraphs))
}

/// Serialize chord-aware paragraphs back to song markup
#[wasm_bindgen(js_name = serializeChordParagraphs)]
pub fn serialize_chord_paragraphs(paragraphs_js: JsValue) -> Result<String, JsValue> {
    let paragraphs: Vec<ChordParagraph> =
        helpers::deserialize(paragraphs_js, "Failed to deserialize chord paragraphs")?;
    Ok(render::serialize_chords(&paragraphs))
}

/// Parse a key label like "C#m"; null for anything unparseable
#[wasm_bindgen(js_name = parseKey)]
pub fn parse_key(label: &str) -> Result<JsValue, JsValue> {
    match SongKey::parse(label) {
        Some(key) => helpers::serialize(&key, "Failed to serialize key"),
        None => Ok(JsValue::NULL),
    }
}
