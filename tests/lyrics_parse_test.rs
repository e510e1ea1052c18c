// Parser/serializer round-trip and boundary-marker behavior

use songbook_wasm::models::ParagraphType;
use songbook_wasm::parse::{parse_to_chord_paragraphs, parse_to_paragraphs};
use songbook_wasm::render::{serialize, serialize_chords};

#[test]
fn test_plain_verses_round_trip() {
    let source = "Verse 1 line 1\nVerse 1 line 2\n\nVerse 2 line 1";
    let paragraphs = parse_to_paragraphs(Some(source));

    assert_eq!(paragraphs.len(), 2, "blank line should split two verses");
    assert_eq!(paragraphs[0].kind, ParagraphType::Verse);
    assert_eq!(paragraphs[0].lines.len(), 2);
    assert_eq!(paragraphs[1].lines[0].text, "Verse 2 line 1");

    assert_eq!(
        serialize(&paragraphs),
        source,
        "well-formed text must survive parse -> serialize unchanged"
    );
}

#[test]
fn test_chorus_markers_round_trip() {
    let source = "{start_of_chorus}\nChorus line\n{end_of_chorus}";
    let paragraphs = parse_to_paragraphs(Some(source));

    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].kind, ParagraphType::Chorus);
    assert_eq!(paragraphs[0].lines.len(), 1);
    assert_eq!(paragraphs[0].lines[0].text, "Chorus line");

    assert_eq!(serialize(&paragraphs), source);
}

#[test]
fn test_coda_markers_round_trip() {
    let source = "{start_of_coda}\nOutro line\n{end_of_coda}";
    let paragraphs = parse_to_paragraphs(Some(source));

    assert_eq!(paragraphs[0].kind, ParagraphType::Coda);
    assert_eq!(serialize(&paragraphs), source);
}

#[test]
fn test_mixed_document_round_trip() {
    let source = "Verse one\n\n{start_of_chorus}\nRefrain\n{end_of_chorus}\n\nVerse two";
    let paragraphs = parse_to_paragraphs(Some(source));

    assert_eq!(paragraphs.len(), 3);
    assert_eq!(paragraphs[1].kind, ParagraphType::Chorus);
    assert_eq!(serialize(&paragraphs), source);
}

#[test]
fn test_chords_are_stripped_in_plain_variant() {
    let paragraphs = parse_to_paragraphs(Some("[A]Amazing [D]Grace"));
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].lines[0].text, "Amazing Grace");

    // Chord complexity does not matter
    let paragraphs = parse_to_paragraphs(Some("[F#m/C#]Amazing [Dsus4]Grace"));
    assert_eq!(paragraphs[0].lines[0].text, "Amazing Grace");
}

#[test]
fn test_empty_input_yields_no_paragraphs() {
    assert!(parse_to_paragraphs(None).is_empty());
    assert!(parse_to_paragraphs(Some("")).is_empty());
    assert!(parse_to_chord_paragraphs(None).is_empty());
    assert!(parse_to_chord_paragraphs(Some("")).is_empty());
}

#[test]
fn test_consecutive_blank_lines_collapse() {
    let paragraphs = parse_to_paragraphs(Some("Verse 1\n\n\n\nVerse 2"));
    assert_eq!(
        paragraphs.len(),
        2,
        "runs of blank lines must not produce empty paragraphs"
    );
}

#[test]
fn test_end_marker_closes_any_open_paragraph() {
    // A coda closed by {end_of_chorus}: the closer is not required to
    // match the opener. Stored content relies on this.
    let paragraphs = parse_to_paragraphs(Some("{start_of_coda}\nOutro\n{end_of_chorus}\nAfter"));

    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].kind, ParagraphType::Coda);
    assert_eq!(
        paragraphs[1].kind,
        ParagraphType::Verse,
        "content after the closer starts a fresh implicit verse"
    );
}

#[test]
fn test_stray_end_marker_without_open_paragraph_is_ignored() {
    let paragraphs = parse_to_paragraphs(Some("{end_of_chorus}\nJust a verse"));
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].kind, ParagraphType::Verse);
}

#[test]
fn test_unterminated_marker_stays_literal() {
    // "{start_of_chorus" (no closing brace) is not a marker
    let paragraphs = parse_to_paragraphs(Some("{start_of_chorus\nline"));
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].kind, ParagraphType::Verse);
    assert_eq!(paragraphs[0].lines[0].text, "{start_of_chorus");
}

#[test]
fn test_unterminated_chord_bracket_degrades_to_text() {
    let paragraphs = parse_to_paragraphs(Some("Amazing [A Grace"));
    assert_eq!(paragraphs[0].lines[0].text, "Amazing [A Grace");
}

#[test]
fn test_chord_variant_round_trips_with_chords_intact() {
    let source = "[A]Amazing [D]Grace, how [E]sweet\n\n{start_of_chorus}\nOh [G]happy day\n{end_of_chorus}";
    let paragraphs = parse_to_chord_paragraphs(Some(source));

    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[1].kind, ParagraphType::Chorus);
    assert_eq!(
        serialize_chords(&paragraphs),
        source,
        "chord-aware variant must reconstruct the source exactly"
    );
}

#[test]
fn test_marker_sharing_a_line_with_content_drops_the_line() {
    // The start marker is matched by containment; the rest of the row
    // is consumed with it.
    let paragraphs = parse_to_paragraphs(Some("{start_of_chorus}Refrain\nBody"));
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].kind, ParagraphType::Chorus);
    assert_eq!(paragraphs[0].lines.len(), 1);
    assert_eq!(paragraphs[0].lines[0].text, "Body");
}
