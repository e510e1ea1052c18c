//! Songbook Lyrics Engine WASM Module
//!
//! This is the WASM module for the songbook web application. It owns
//! the paragraph-based lyrics model (parser/serializer for the
//! line-oriented chord markup) and the editing session state machine;
//! the UI and the real-time backend stay on the JavaScript side.

pub mod models;
pub mod parse;
pub mod render;
pub mod session;
pub mod store;
pub mod key;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use models::core::*;
pub use models::chords::*;
pub use parse::{filter_empty_paragraphs, parse_to_chord_paragraphs, parse_to_paragraphs};
pub use render::{serialize, serialize_chords};
pub use session::{EditorSession, KeyChangeRequest, Notice, Position, SaveRequest, ToggleOutcome};
pub use store::{MemoryStore, SongStore, StoreError};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Songbook lyrics engine WASM module initialized");
}
