//! Post-render normalisation: drop empty sections, collapse blank lines.
//!
//! A *section* is a line starting with `## ` plus everything up to the next
//! such line or the end of the text. A section is empty when its body holds
//! nothing but newline characters. The check is textual: a body containing a
//! single space is not empty and the section survives with its header.

use std::sync::LazyLock;

use regex::Regex;

/// Prefix of a section header line.
pub const SECTION_HEADER_PREFIX: &str = "## ";

static BLANK_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\n{3,}").ok());

/// Normalise rendered prompt text.
///
/// 1. Remove every empty section, header included.
/// 2. Collapse runs of three or more newlines to two and trim the result.
pub fn normalize(text: &str) -> String {
    let stripped = strip_empty_sections(text);
    collapse_blank_lines(&stripped).trim().to_owned()
}

/// Remove sections whose body is only newline characters.
///
/// Text before the first header is kept as-is.
pub fn strip_empty_sections(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut lines = text.split_inclusive('\n').peekable();

    while let Some(line) = lines.next() {
        if !is_header(line) {
            out.push_str(line);
            continue;
        }

        let mut body: Vec<&str> = Vec::new();
        while let Some(&next) = lines.peek() {
            if is_header(next) {
                break;
            }
            body.push(next);
            lines.next();
        }

        if body.iter().all(|l| l.chars().all(|c| c == '\n')) {
            continue;
        }
        out.push_str(line);
        for l in body {
            out.push_str(l);
        }
    }

    out
}

/// Collapse every run of three or more `\n` into exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    match BLANK_RUN.as_ref() {
        Some(re) => re.replace_all(text, "\n\n").into_owned(),
        None => text.to_owned(),
    }
}

fn is_header(line: &str) -> bool {
    line.starts_with(SECTION_HEADER_PREFIX)
}
