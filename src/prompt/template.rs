//! Template rendering: safe substitution and the structured fallback.
//!
//! Two strategies share one contract, `render(values, template) -> text`:
//!
//! - **Templated**: the agent supplies a template with `$name` / `${name}`
//!   placeholders. Known names are replaced by section values. Unknown or
//!   misspelled names are left in the output verbatim so a typo shows up as
//!   visible leftover text instead of failing the render. `$$` renders `$`.
//! - **Fallback**: no template. The canonical section list is walked directly,
//!   skipping sections whose value is the empty string.
//!
//! After [`normalize`](crate::prompt::stripper::normalize), the fallback output
//! equals the templated output for [`DEFAULT_TEMPLATE`].

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::warn;

use crate::prompt::sections::{SectionKey, SectionValues, CANONICAL_SECTIONS, DEFAULT_TEMPLATE};

/// `$$`, `$name`, or `${name}`. A lone `$` does not match and stays literal.
const PLACEHOLDER_PATTERN: &str =
    r"\$(?:(?P<escaped>\$)|(?P<named>[_A-Za-z][_A-Za-z0-9]*)|\{(?P<braced>[_A-Za-z][_A-Za-z0-9]*)\})";

static PLACEHOLDER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).ok());

/// Which strategy a render uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy<'a> {
    /// Substitute into an agent-supplied template.
    Templated(&'a str),
    /// Walk the canonical section list.
    Fallback,
}

impl<'a> RenderStrategy<'a> {
    /// Templated when a template is present, fallback otherwise.
    pub fn for_template(template: Option<&'a str>) -> Self {
        template.map_or(Self::Fallback, Self::Templated)
    }

    /// Render `values` with this strategy.
    pub fn render(self, values: &SectionValues) -> String {
        match self {
            Self::Templated(template) => render_templated(values, template),
            Self::Fallback => render_fallback(values),
        }
    }
}

/// Render with the templated strategy when `template` is present, the
/// fallback strategy otherwise.
pub fn render(values: &SectionValues, template: Option<&str>) -> String {
    RenderStrategy::for_template(template).render(values)
}

/// Safe substitution of section values into `template`.
///
/// Single pass: placeholder-looking text inside substituted values is never
/// expanded again.
pub fn render_templated(values: &SectionValues, template: &str) -> String {
    let Some(re) = PLACEHOLDER.as_ref() else {
        warn!("placeholder pattern failed to compile, template left unrendered");
        return template.to_owned();
    };

    let mut unresolved: Vec<String> = Vec::new();
    let rendered = re.replace_all(template, |caps: &Captures<'_>| -> String {
        let token = caps.get(0).map_or("", |m| m.as_str());
        if caps.name("escaped").is_some() {
            return "$".to_owned();
        }
        match placeholder_name(caps).and_then(SectionKey::from_placeholder) {
            Some(key) => values.get(key).to_owned(),
            None => {
                if !unresolved.iter().any(|t| t == token) {
                    unresolved.push(token.to_owned());
                }
                token.to_owned()
            }
        }
    });

    if !unresolved.is_empty() {
        warn!(placeholders = ?unresolved, "template has unresolved placeholders");
    }
    rendered.into_owned()
}

/// Walk [`CANONICAL_SECTIONS`], emitting `"{header}\n{value}"` for each
/// section whose value is not the empty string, joined by a blank line.
///
/// Emptiness is textual: a whitespace-only value is emitted with its header.
pub fn render_fallback(values: &SectionValues) -> String {
    CANONICAL_SECTIONS
        .iter()
        .filter_map(|&key| {
            let value = values.get(key);
            if value.is_empty() {
                None
            } else {
                Some(format!("{}\n{value}", key.header()))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the canonical default template with the templated strategy.
pub fn render_default_template(values: &SectionValues) -> String {
    render_templated(values, &DEFAULT_TEMPLATE)
}

/// Placeholder tokens in `template` that will be left literal, in order of
/// first appearance, without duplicates.
pub fn unresolved_placeholders(template: &str) -> Vec<String> {
    let Some(re) = PLACEHOLDER.as_ref() else {
        return Vec::new();
    };

    let mut tokens: Vec<String> = Vec::new();
    for caps in re.captures_iter(template) {
        if caps.name("escaped").is_some() {
            continue;
        }
        if placeholder_name(&caps)
            .and_then(SectionKey::from_placeholder)
            .is_some()
        {
            continue;
        }
        let token = caps.get(0).map_or("", |m| m.as_str());
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_owned());
        }
    }
    tokens
}

fn placeholder_name<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.name("named")
        .or_else(|| caps.name("braced"))
        .map(|m| m.as_str())
}
