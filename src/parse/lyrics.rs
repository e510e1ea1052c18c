//! Plain-lyrics parser
//!
//! Converts raw song markup into display paragraphs with chord
//! annotations stripped. This is the variant wired into the editing
//! flow: edit buffers are plain text, so chords do not survive a
//! paragraph being edited.
//!
//! The parser is permissive by contract. Song content is free text from
//! non-technical editors; malformed markers and stray brackets degrade
//! to literal text instead of failing, and no input makes it return an
//! error.

use once_cell::sync::Lazy;
use regex::Regex;

use super::markers::{classify, strip_markers, LineEvent};
use crate::models::{Line, Paragraph, ParagraphType};

static CHORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]+\]").expect("chord pattern is valid"));

/// Accumulator for the paragraph scan
///
/// Owns the "current paragraph" state so the flush-on-boundary and
/// never-emit-empty invariants live in one place instead of being
/// scattered through the loop.
struct Accumulator {
    current: Option<Paragraph>,
    done: Vec<Paragraph>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            current: None,
            done: Vec::new(),
        }
    }

    /// Flush the current paragraph if it has at least one line
    fn flush(&mut self) {
        if let Some(paragraph) = self.current.take() {
            if !paragraph.lines.is_empty() {
                self.done.push(paragraph);
            }
        }
    }

    /// Flush and open a fresh paragraph of the given kind
    fn open(&mut self, kind: ParagraphType) {
        self.flush();
        self.current = Some(Paragraph::new(kind));
    }

    /// Append a line, opening an implicit verse when nothing is open
    fn push_line(&mut self, line: Line) {
        self.current
            .get_or_insert_with(Paragraph::verse)
            .lines
            .push(line);
    }

    fn finish(mut self) -> Vec<Paragraph> {
        self.flush();
        self.done
    }
}

/// Parse raw song content into display paragraphs
///
/// Returns an empty vec for `None` or empty input. Never fails.
pub fn parse_to_paragraphs(content: Option<&str>) -> Vec<Paragraph> {
    let content = match content {
        Some(c) if !c.is_empty() => c,
        _ => return Vec::new(),
    };

    let mut acc = Accumulator::new();

    for raw_line in content.split('\n') {
        match classify(raw_line) {
            LineEvent::Start(kind) => acc.open(kind),
            LineEvent::End | LineEvent::Blank => acc.flush(),
            LineEvent::Content => acc.push_line(parse_line(raw_line)),
        }
    }

    let paragraphs = acc.finish();
    log::debug!("parsed {} paragraph(s)", paragraphs.len());
    paragraphs
}

/// Parse a single content line: strip markers and chord annotations,
/// leaving display text
fn parse_line(raw: &str) -> Line {
    let clean = strip_markers(raw);
    let clean = CHORD_RE.replace_all(&clean, "");

    if clean.trim().is_empty() {
        return Line::spacer();
    }

    Line {
        text: clean.into_owned(),
        is_spacer: false,
    }
}

/// Drop paragraphs with no content: the edit buffer (when set) or else
/// the concatenated line text must trim to something non-empty
pub fn filter_empty_paragraphs(paragraphs: Vec<Paragraph>) -> Vec<Paragraph> {
    paragraphs
        .into_iter()
        .filter(|p| !p.effective_text().trim().is_empty())
        .collect()
}
