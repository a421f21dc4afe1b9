//! The ten canonical prompt sections.
//!
//! [`CANONICAL_SECTIONS`] is the single ordered list both rendering strategies
//! are driven from: the default template is generated from it, and the
//! fallback renderer walks it directly.

use std::sync::LazyLock;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Key of one prompt section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    /// One-line self-introduction.
    Identity,
    /// Behavioral philosophy.
    Soul,
    /// How to operate when a human is present.
    OperatingModel,
    /// Channel-specific conventions.
    ChannelGuidance,
    /// Clock reading in the user's zone.
    CurrentTime,
    /// Pre-fetched memory summary.
    MemoryNotes,
    /// User-authored customisations.
    UserInstructions,
    /// Aggregated tool guidance.
    ToolGuidance,
    /// How to learn from the conversation.
    InteractionLearning,
    /// Onboarding, greeting, or silent-wake sentinel.
    SessionSection,
}

/// Canonical section order.
pub const CANONICAL_SECTIONS: [SectionKey; 10] = [
    SectionKey::Identity,
    SectionKey::Soul,
    SectionKey::OperatingModel,
    SectionKey::ChannelGuidance,
    SectionKey::CurrentTime,
    SectionKey::MemoryNotes,
    SectionKey::UserInstructions,
    SectionKey::ToolGuidance,
    SectionKey::InteractionLearning,
    SectionKey::SessionSection,
];

impl SectionKey {
    /// Template placeholder name, without the leading `$`.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Soul => "soul",
            Self::OperatingModel => "operatingModel",
            Self::ChannelGuidance => "channelGuidance",
            Self::CurrentTime => "currentTime",
            Self::MemoryNotes => "memoryNotes",
            Self::UserInstructions => "userInstructions",
            Self::ToolGuidance => "toolGuidance",
            Self::InteractionLearning => "interactionLearning",
            Self::SessionSection => "sessionSection",
        }
    }

    /// Markdown header line introducing the section.
    pub fn header(self) -> &'static str {
        match self {
            Self::Identity => "## Identity",
            Self::Soul => "## Soul",
            Self::OperatingModel => "## Operating Model",
            Self::ChannelGuidance => "## Channel",
            Self::CurrentTime => "## Current Time",
            Self::MemoryNotes => "## Memory",
            Self::UserInstructions => "## User Instructions",
            Self::ToolGuidance => "## Tool Guidance",
            Self::InteractionLearning => "## Interaction Learning",
            Self::SessionSection => "## Session",
        }
    }

    /// Position in [`CANONICAL_SECTIONS`]. Variants are declared in canonical order.
    fn index(self) -> usize {
        self as usize
    }

    /// Look up a key by placeholder name. Matching is exact.
    pub fn from_placeholder(name: &str) -> Option<Self> {
        CANONICAL_SECTIONS
            .iter()
            .copied()
            .find(|key| key.placeholder() == name)
    }
}

/// Canonical default template: `"{header}\n${placeholder}"` per section,
/// joined by a blank line.
pub static DEFAULT_TEMPLATE: LazyLock<String> = LazyLock::new(|| {
    CANONICAL_SECTIONS
        .iter()
        .map(|key| format!("{}\n${}", key.header(), key.placeholder()))
        .collect::<Vec<_>>()
        .join("\n\n")
});

// ---------------------------------------------------------------------------
// SectionValues
// ---------------------------------------------------------------------------

/// Resolved text for every canonical section.
///
/// Every key is always present. An empty string means "nothing to say".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionValues {
    values: [String; 10],
}

impl SectionValues {
    /// All sections empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of one section.
    pub fn get(&self, key: SectionKey) -> &str {
        &self.values[key.index()]
    }

    /// Replace the text of one section.
    pub fn set(&mut self, key: SectionKey, value: impl Into<String>) {
        self.values[key.index()] = value.into();
    }

    /// Builder form of [`SectionValues::set`].
    pub fn with(mut self, key: SectionKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sections in canonical order with their text.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &str)> {
        CANONICAL_SECTIONS.iter().map(move |&key| (key, self.get(key)))
    }
}

// Serialised as a map keyed by placeholder name, in canonical order.
impl Serialize for SectionValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CANONICAL_SECTIONS.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.placeholder(), value)?;
        }
        map.end()
    }
}
