//! Core data structures for the songbook lyrics engine
//!
//! This module defines the paragraph/line representation of annotated
//! song text. Paragraphs and lines are rebuilt from the raw content
//! string on every parse; only the serialized content is ever persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::id::short_id;

/// Semantic kind of a paragraph, which drives bracketing markers
/// on serialization (verse gets no markers)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphType {
    Verse,
    Chorus,
    Coda,
}

impl Default for ParagraphType {
    fn default() -> Self {
        ParagraphType::Verse
    }
}

/// One display row of a paragraph
///
/// A line is immutable once produced by parsing; edit buffers regenerate
/// lines wholesale from raw text (see [`Paragraph::sync_lines`]).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// Display text with markers and chord annotations already stripped
    pub text: String,

    /// True iff the text is empty/whitespace after stripping annotations
    #[serde(rename = "isSpacer")]
    pub is_spacer: bool,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let is_spacer = text.trim().is_empty();
        Self { text, is_spacer }
    }

    /// An intentionally blank row used for display spacing
    pub fn spacer() -> Self {
        Self {
            text: String::new(),
            is_spacer: true,
        }
    }
}

/// A contiguous block of song text of one semantic type, the unit of
/// structural editing
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Paragraph {
    /// Opaque id for UI keying, unique within a document. Stable across
    /// one editing session, never persisted across reloads.
    pub id: String,

    /// Paragraph kind (verse/chorus/coda)
    #[serde(rename = "type")]
    pub kind: ParagraphType,

    /// Rendered projection of the paragraph text, one entry per row
    pub lines: Vec<Line>,

    /// Raw edit buffer. When set, this is the authoritative source for
    /// the paragraph's text during an active editing session.
    #[serde(rename = "editText", skip_serializing_if = "Option::is_none")]
    pub edit_text: Option<String>,
}

impl Paragraph {
    /// Create a new empty paragraph with a fresh id
    pub fn new(kind: ParagraphType) -> Self {
        Self {
            id: short_id(),
            kind,
            lines: Vec::new(),
            edit_text: None,
        }
    }

    /// Create a new empty verse paragraph
    pub fn verse() -> Self {
        Self::new(ParagraphType::Verse)
    }

    /// Replace this paragraph's lines from a raw text string, one line
    /// per `\n`-separated segment
    ///
    /// This is the plain-text edit-buffer path: chord segments are not
    /// reconstructed here. Chords present before editing are lost unless
    /// the user retypes them.
    pub fn sync_lines(&mut self, text: &str) {
        self.lines = text.split('\n').map(Line::new).collect();
    }

    /// Concatenated rendered text, used for emptiness checks
    pub fn rendered_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<String>()
    }

    /// Text the user sees in the edit buffer: `edit_text` when set,
    /// otherwise the concatenated rendered lines
    pub fn effective_text(&self) -> String {
        match &self.edit_text {
            Some(text) => text.clone(),
            None => self.rendered_text(),
        }
    }
}

/// A song record as stored by the persistence collaborator
///
/// The engine consumes `content` and `original_key` and produces a new
/// pair on save; it does not own persistence.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,

    /// Raw serialized lyrics in the line-oriented markup
    pub content: String,

    /// Musical key label (e.g. "C#m"), edited via the key dialog,
    /// not part of the lyrics grammar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Song {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            original_key: None,
            created_at: None,
            updated_at: None,
        }
    }
}
