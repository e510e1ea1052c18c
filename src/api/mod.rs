//! Songbook WASM API
//!
//! This module provides the JavaScript-facing API for the lyrics
//! engine. The UI keeps rendering and persistence (the Firebase-backed
//! store) on its side of the boundary; the engine owns the document
//! structure and the editing state machine.
//!
//! # Module Structure
//!
//! - `helpers`: shared serialization, error handling and logging
//! - `lyrics`: stateless parse/serialize endpoints
//! - `session`: the WASM-owned editing session and its operations

pub mod helpers;
pub mod lyrics;
pub mod session;

pub use lyrics::{parse_chords, parse_key, parse_lyrics, serialize_chord_paragraphs, serialize_paragraphs};
pub use session::{
    add_paragraph, complete_key_change, complete_save, current_key, fail_key_change, fail_save,
    key_save_request, load_song, remove_paragraph, session_state, set_edit_title,
    set_paragraph_text, toggle_edit_mode,
};
