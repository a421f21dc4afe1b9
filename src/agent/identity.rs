//! Identity line and soul fallback.
//!
//! The identity section is a single self-introduction line built from the
//! structured `[identity]` table of an agent config. The soul is passed through
//! verbatim unless it is blank, in which case a generic philosophy stands in
//! so the agent never runs without one.

use std::fmt::Write as _;

use crate::config::Identity;

/// Behavioral philosophy used when an agent has no soul configured.
pub const FALLBACK_SOUL: &str = "\
Be genuinely helpful, not performatively helpful. Be honest about what you \
know and what you don't. Respect the user's time: answer directly, ask when \
something is ambiguous, and never invent facts, results, or actions you did \
not take.";

/// Render the identity line: `"{name} — {description}. {vibe}"`.
///
/// The vibe is omitted when absent or blank.
pub fn format_identity(identity: &Identity) -> String {
    let mut line = String::with_capacity(
        identity
            .name
            .len()
            .saturating_add(identity.description.len())
            .saturating_add(8),
    );
    let _ = write!(line, "{} — {}.", identity.name, identity.description);

    if let Some(vibe) = identity.vibe.as_deref().filter(|v| !v.trim().is_empty()) {
        let _ = write!(line, " {vibe}");
    }

    line
}

/// Resolve the soul text, substituting [`FALLBACK_SOUL`] when blank.
pub fn resolve_soul(soul: &str) -> &str {
    if soul.trim().is_empty() {
        FALLBACK_SOUL
    } else {
        soul
    }
}
