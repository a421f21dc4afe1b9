//! Tests for post-render normalisation.

use soulprompt::prompt::stripper::{collapse_blank_lines, normalize, strip_empty_sections};

#[test]
fn all_sections_empty_yields_empty_text() {
    let text = "## Identity\n\n\n## Soul\n\n\n## Session\n";
    assert_eq!(normalize(text), "");
}

#[test]
fn strip_keeps_surrounding_sections_verbatim() {
    let text = "## A\nalpha\n\n## B\n\n\n## C\ngamma\n";
    assert_eq!(strip_empty_sections(text), "## A\nalpha\n\n## C\ngamma\n");
}

#[test]
fn body_with_single_space_keeps_header() {
    let text = "## Identity\nAtlas.\n\n## Tool Guidance\n \n\n## Session\nHi.";
    let out = normalize(text);
    assert!(out.contains("## Tool Guidance\n \n"));
}

#[test]
fn trailing_whitespace_section_keeps_header_only() {
    let out = normalize("## Identity\nAtlas.\n\n## Tool Guidance\n ");
    assert_eq!(out, "## Identity\nAtlas.\n\n## Tool Guidance");
}

#[test]
fn header_needs_trailing_space() {
    let text = "##Not a header\n\n\n## Real\nbody";
    assert_eq!(normalize(text), "##Not a header\n\n## Real\nbody");
}

#[test]
fn indented_header_is_body_text() {
    let text = "## A\n  ## indented\n";
    assert_eq!(normalize(text), "## A\n  ## indented");
}

#[test]
fn blank_run_collapses_to_one_blank_line() {
    assert_eq!(collapse_blank_lines("a\n\n\nb"), "a\n\nb");
    assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
}

#[test]
fn output_never_has_triple_newlines() {
    let text = "\n\n\n## A\nx\n\n\n\n\n\n## B\n\n\n\n## C\n\n\ny\n\n\n\n";
    let out = normalize(text);
    assert!(!out.contains("\n\n\n"));
    assert_eq!(out, "## A\nx\n\n## C\n\ny");
}

#[test]
fn surrounding_whitespace_trimmed() {
    assert_eq!(normalize("  \n## A\nalpha\n\n  "), "## A\nalpha");
}
