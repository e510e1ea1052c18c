//! Serializers: structured paragraphs back to the line-oriented markup
//!
//! Chorus and coda paragraphs get explicit start/end markers; verses get
//! none. Paragraphs are joined with a blank line. For parser-produced
//! input from well-formed source text, serialize(parse(x)) == x.

use crate::models::{ChordParagraph, Paragraph, ParagraphType, Segment};

fn wrap(kind: ParagraphType, body: String) -> String {
    match kind {
        ParagraphType::Verse => body,
        ParagraphType::Chorus => format!("{{start_of_chorus}}\n{}\n{{end_of_chorus}}", body),
        ParagraphType::Coda => format!("{{start_of_coda}}\n{}\n{{end_of_coda}}", body),
    }
}

/// Serialize plain paragraphs (chords already stripped from lines)
pub fn serialize(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(|p| {
            let body = p
                .lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            wrap(p.kind, body)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_segment(segment: &Segment) -> String {
    match &segment.chord {
        Some(chord) => format!("[{}]{}", chord, segment.text),
        None => segment.text.clone(),
    }
}

/// Serialize chord-aware paragraphs, re-rendering each segment as
/// `[chord]text`
pub fn serialize_chords(paragraphs: &[ChordParagraph]) -> String {
    paragraphs
        .iter()
        .map(|p| {
            let body = p
                .lines
                .iter()
                .map(|l| l.segments.iter().map(render_segment).collect::<String>())
                .collect::<Vec<_>>()
                .join("\n");
            wrap(p.kind, body)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
