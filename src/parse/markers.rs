//! Paragraph-boundary markers of the song markup
//!
//! Markers are matched by substring containment on the trimmed line,
//! not anchored, and are case-sensitive. Either end marker closes any
//! open explicit paragraph; stored content relies on that leniency.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ParagraphType;

pub const START_OF_CHORUS: &str = "{start_of_chorus}";
pub const END_OF_CHORUS: &str = "{end_of_chorus}";
pub const START_OF_CODA: &str = "{start_of_coda}";
pub const END_OF_CODA: &str = "{end_of_coda}";

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{start_of_chorus\}|\{end_of_chorus\}|\{start_of_coda\}|\{end_of_coda\}")
        .expect("marker pattern is valid")
});

/// How one raw input line affects the paragraph scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    /// Explicit start marker: flush the current paragraph, open a new one
    Start(ParagraphType),
    /// Explicit end marker: flush and close whatever paragraph is open
    End,
    /// Blank line: flush and close, exactly like an end marker
    Blank,
    /// Regular content line
    Content,
}

/// Classify a raw line for the paragraph scanner
pub fn classify(line: &str) -> LineEvent {
    let trimmed = line.trim();

    if trimmed.contains(START_OF_CHORUS) {
        return LineEvent::Start(ParagraphType::Chorus);
    }
    if trimmed.contains(START_OF_CODA) {
        return LineEvent::Start(ParagraphType::Coda);
    }
    if trimmed.contains(END_OF_CHORUS) || trimmed.contains(END_OF_CODA) {
        return LineEvent::End;
    }
    if trimmed.is_empty() {
        return LineEvent::Blank;
    }
    LineEvent::Content
}

/// Remove all four marker tokens from a line, in case they appear
/// inline rather than alone on a row
pub fn strip_markers(line: &str) -> String {
    MARKER_RE.replace_all(line, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_recognizes_markers_with_surrounding_text() {
        assert_eq!(
            classify("  {start_of_chorus}  "),
            LineEvent::Start(ParagraphType::Chorus)
        );
        assert_eq!(
            classify("x{start_of_coda}y"),
            LineEvent::Start(ParagraphType::Coda)
        );
        assert_eq!(classify("{end_of_coda}"), LineEvent::End);
        assert_eq!(classify("   "), LineEvent::Blank);
        assert_eq!(classify("Amazing grace"), LineEvent::Content);
    }

    #[test]
    fn classify_is_case_sensitive() {
        assert_eq!(classify("{START_OF_CHORUS}"), LineEvent::Content);
    }

    #[test]
    fn strip_markers_removes_inline_tokens() {
        assert_eq!(strip_markers("la{end_of_chorus}la"), "lala");
        assert_eq!(strip_markers("no markers here"), "no markers here");
    }
}
