//! Parsing module for the songbook lyrics engine
//!
//! This module converts the raw line-oriented song markup into the
//! structured paragraph representation. Two variants exist: the plain
//! parser (chords stripped, drives the editor) and the chord-aware
//! parser (chords kept as segments, drives chord rendering).

pub mod markers;
pub mod lyrics;
pub mod chords;

// Re-export commonly used functions
pub use lyrics::{filter_empty_paragraphs, parse_to_paragraphs};
pub use chords::parse_to_chord_paragraphs;
pub use markers::strip_markers;
