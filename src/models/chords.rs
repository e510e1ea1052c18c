//! Chord-aware variant of the line model
//!
//! The plain [`super::core::Line`] drops chord annotations for display;
//! this variant keeps each `[CHORD]` attached to the text that follows it
//! so a renderer can place chords above lyrics. It is read-only: the
//! editing flow works on the plain variant and does not rebuild segments.

use serde::{Deserialize, Serialize};

use super::core::ParagraphType;
use crate::utils::id::short_id;

/// A (chord, text) pair within a line
///
/// Invariant: concatenating each segment's bracket-wrapped chord (when
/// present) followed by its text, in order, reconstructs the source line
/// exactly.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Chord label without brackets (e.g. "F#m/C#"), or None for plain text
    pub chord: Option<String>,
    pub text: String,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            chord: None,
            text: text.into(),
        }
    }

    pub fn chorded(chord: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chord: Some(chord.into()),
            text: text.into(),
        }
    }
}

/// One row of a chord-aware paragraph
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChordLine {
    pub segments: Vec<Segment>,

    #[serde(rename = "isSpacer")]
    pub is_spacer: bool,
}

impl ChordLine {
    pub fn spacer() -> Self {
        Self {
            segments: Vec::new(),
            is_spacer: true,
        }
    }
}

/// Chord-preserving counterpart of [`super::core::Paragraph`]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChordParagraph {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ParagraphType,

    pub lines: Vec<ChordLine>,
}

impl ChordParagraph {
    pub fn new(kind: ParagraphType) -> Self {
        Self {
            id: short_id(),
            kind,
            lines: Vec::new(),
        }
    }
}
