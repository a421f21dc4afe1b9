//! Per-render context and character-budget truncation.
//!
//! A [`RenderContext`] is built fresh by the caller for every render. It holds
//! the channel, recency signals, pre-fetched memory and user instructions, the
//! clock reading, and the tools attached to the agent.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::agent::Channel;
use crate::tools::ToolDescriptor;

// ---------------------------------------------------------------------------
// Character budgets
// ---------------------------------------------------------------------------

/// Maximum characters of memory notes included in a prompt.
pub const MEMORY_NOTES_CHAR_LIMIT: usize = 4000;

/// Maximum characters of user instructions included in a prompt.
pub const USER_INSTRUCTIONS_CHAR_LIMIT: usize = 2000;

// ---------------------------------------------------------------------------
// RenderContext
// ---------------------------------------------------------------------------

/// Immutable snapshot of everything a single render depends on.
#[derive(Clone)]
pub struct RenderContext {
    /// Surface the prompt is rendered for.
    pub channel: Channel,
    /// True iff both memory notes and user instructions are empty.
    pub is_new_user: bool,
    /// When the user last sent a message, if ever.
    pub last_message_at: Option<DateTime<Utc>>,
    /// Whether anything new happened since the user's last message.
    pub has_new_activity: bool,
    /// Pre-fetched memory summary.
    pub memory_notes: Option<String>,
    /// User-authored customisations.
    pub user_instructions: Option<String>,
    /// Clock reading for this render. Never read implicitly.
    pub current_time: DateTime<Utc>,
    /// Zone the current time is presented in.
    pub time_zone: Tz,
    /// Tools attached to the agent, in attachment order.
    pub tools: Vec<Arc<dyn ToolDescriptor>>,
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tool_classes: Vec<&str> = self.tools.iter().map(|t| t.class_name()).collect();
        f.debug_struct("RenderContext")
            .field("channel", &self.channel)
            .field("is_new_user", &self.is_new_user)
            .field("last_message_at", &self.last_message_at)
            .field("has_new_activity", &self.has_new_activity)
            .field(
                "memory_notes_chars",
                &self.memory_notes.as_deref().map(|s| s.chars().count()),
            )
            .field(
                "user_instructions_chars",
                &self.user_instructions.as_deref().map(|s| s.chars().count()),
            )
            .field("current_time", &self.current_time)
            .field("time_zone", &self.time_zone)
            .field("tools", &tool_classes)
            .finish()
    }
}

impl RenderContext {
    /// Create a context with no memory, no instructions, and no tools.
    ///
    /// The user starts out as new; attaching memory or instructions through
    /// the `with_*` setters re-derives [`RenderContext::is_new_user`].
    pub fn new(channel: Channel, current_time: DateTime<Utc>, time_zone: Tz) -> Self {
        Self {
            channel,
            is_new_user: true,
            last_message_at: None,
            has_new_activity: false,
            memory_notes: None,
            user_instructions: None,
            current_time,
            time_zone,
            tools: Vec::new(),
        }
    }

    /// Attach the memory summary.
    pub fn with_memory_notes(mut self, notes: impl Into<String>) -> Self {
        self.memory_notes = Some(notes.into());
        self.is_new_user = infer_new_user(
            self.memory_notes.as_deref(),
            self.user_instructions.as_deref(),
        );
        self
    }

    /// Attach user instructions.
    pub fn with_user_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.user_instructions = Some(instructions.into());
        self.is_new_user = infer_new_user(
            self.memory_notes.as_deref(),
            self.user_instructions.as_deref(),
        );
        self
    }

    /// Record when the user last sent a message.
    pub fn with_last_message_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_message_at = Some(at);
        self
    }

    /// Flag that something new happened since the last message.
    pub fn with_new_activity(mut self, has_new_activity: bool) -> Self {
        self.has_new_activity = has_new_activity;
        self
    }

    /// Append a tool descriptor.
    pub fn with_tool(mut self, tool: Arc<dyn ToolDescriptor>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Replace the attached tools.
    pub fn with_tools(mut self, tools: Vec<Arc<dyn ToolDescriptor>>) -> Self {
        self.tools = tools;
        self
    }
}

/// A user is new iff there is neither memory nor instructions about them.
pub fn infer_new_user(memory_notes: Option<&str>, user_instructions: Option<&str>) -> bool {
    memory_notes.map_or(true, str::is_empty) && user_instructions.map_or(true, str::is_empty)
}

// ---------------------------------------------------------------------------
// Truncation
// ---------------------------------------------------------------------------

/// Truncate `text` to at most `max_chars` characters.
///
/// Counts Unicode scalar values, so multi-byte text is never split inside a
/// character. Text already within budget is returned unchanged.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text.get(..byte_idx).unwrap_or(text),
        None => text,
    }
}
