//! Chord-aware parser
//!
//! Same paragraph scan as the plain parser, but each line keeps its
//! `[CHORD]` annotations as (chord, text) segments so a renderer can
//! place chords above the lyrics they belong to.

use once_cell::sync::Lazy;
use regex::Regex;

use super::markers::{classify, strip_markers, LineEvent};
use crate::models::{ChordLine, ChordParagraph, ParagraphType, Segment};

static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]([^\[]*)").expect("segment pattern is valid"));

struct Accumulator {
    current: Option<ChordParagraph>,
    done: Vec<ChordParagraph>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            current: None,
            done: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if let Some(paragraph) = self.current.take() {
            if !paragraph.lines.is_empty() {
                self.done.push(paragraph);
            }
        }
    }

    fn open(&mut self, kind: ParagraphType) {
        self.flush();
        self.current = Some(ChordParagraph::new(kind));
    }

    fn push_line(&mut self, line: ChordLine) {
        self.current
            .get_or_insert_with(|| ChordParagraph::new(ParagraphType::Verse))
            .lines
            .push(line);
    }

    fn finish(mut self) -> Vec<ChordParagraph> {
        self.flush();
        self.done
    }
}

/// Parse raw song content into chord-preserving paragraphs
///
/// Returns an empty vec for `None` or empty input. Never fails.
pub fn parse_to_chord_paragraphs(content: Option<&str>) -> Vec<ChordParagraph> {
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

    acc.finish()
}

/// Split one line into chord segments
///
/// Leading text before the first `[` becomes a chord-less segment; each
/// `[CHORD]` captures the text up to the next bracket or end of line.
/// A line with no brackets is a single chord-less segment.
fn parse_line(raw: &str) -> ChordLine {
    let clean = strip_markers(raw);

    if clean.trim().is_empty() && !clean.contains('[') {
        return ChordLine::spacer();
    }

    let mut segments = Vec::new();

    match clean.find('[') {
        None => {
            return ChordLine {
                segments: vec![Segment::plain(clean)],
                is_spacer: false,
            };
        }
        Some(first) if first > 0 => {
            segments.push(Segment::plain(&clean[..first]));
        }
        Some(_) => {}
    }

    for cap in SEGMENT_RE.captures_iter(&clean) {
        segments.push(Segment::chorded(&cap[1], &cap[2]));
    }

    ChordLine {
        segments,
        is_spacer: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_keep_chords_attached_to_following_text() {
        let paragraphs = parse_to_chord_paragraphs(Some("[A]Amazing [D]Grace"));
        let line = &paragraphs[0].lines[0];

        assert_eq!(line.segments.len(), 2);
        assert_eq!(line.segments[0], Segment::chorded("A", "Amazing "));
        assert_eq!(line.segments[1], Segment::chorded("D", "Grace"));
    }

    #[test]
    fn leading_text_becomes_a_chordless_segment() {
        let paragraphs = parse_to_chord_paragraphs(Some("Oh [G]happy day"));
        let line = &paragraphs[0].lines[0];

        assert_eq!(line.segments[0], Segment::plain("Oh "));
        assert_eq!(line.segments[1], Segment::chorded("G", "happy day"));
    }

    #[test]
    fn line_without_brackets_is_one_plain_segment() {
        let paragraphs = parse_to_chord_paragraphs(Some("no chords at all"));
        let line = &paragraphs[0].lines[0];

        assert_eq!(line.segments.len(), 1);
        assert_eq!(line.segments[0], Segment::plain("no chords at all"));
        assert!(!line.is_spacer);
    }

    #[test]
    fn chord_only_line_is_not_a_spacer() {
        // Whitespace line with a bracket still carries chord information
        let paragraphs = parse_to_chord_paragraphs(Some("[C] "));
        let line = &paragraphs[0].lines[0];
        assert!(!line.is_spacer);
        assert_eq!(line.segments[0], Segment::chorded("C", " "));
    }

    #[test]
    fn unterminated_bracket_yields_no_chord_segment() {
        let paragraphs = parse_to_chord_paragraphs(Some("text [A with no close"));
        let line = &paragraphs[0].lines[0];

        // The prefix before '[' survives; the regex matches nothing after.
        assert_eq!(line.segments.len(), 1);
        assert_eq!(line.segments[0], Segment::plain("text "));
    }
}
