//! Section value resolution.
//!
//! Turns a [`RenderContext`] and an [`AgentConfig`] into [`SectionValues`].
//! Pure: no I/O, no clock reads. Every optional input has a default, so
//! resolution cannot fail.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::agent::context::{
    truncate_chars, MEMORY_NOTES_CHAR_LIMIT, USER_INSTRUCTIONS_CHAR_LIMIT,
};
use crate::agent::identity::{format_identity, resolve_soul};
use crate::agent::session::compute_session_section;
use crate::agent::{Channel, RenderContext};
use crate::config::AgentConfig;
use crate::prompt::sections::{SectionKey, SectionValues};
use crate::tools::aggregate_tool_guidance;

// ---------------------------------------------------------------------------
// Static texts
// ---------------------------------------------------------------------------

/// How to work when a human is on the other end.
pub const OPERATING_MODEL_TEXT: &str = "\
You are talking with a person in real time.
- Lead with the answer, then the detail that supports it.
- Ask one clarifying question when a request is ambiguous instead of guessing.
- Before anything irreversible (sending, deleting, paying, scheduling), say what \
you are about to do and wait for a yes.
- If a tool fails, say so plainly and offer the next best step.";

/// How to learn from an ongoing conversation.
pub const INTERACTION_LEARNING_TEXT: &str = "\
Pay attention to how this user likes to work. When they state a durable \
preference, correct you, or tell you something about themselves that will \
matter later, save it to memory in one short sentence. Do not save small talk, \
one-off requests, or anything they ask you to forget.";

/// Guidance for channels without a dedicated entry.
pub const DEFAULT_CHANNEL_GUIDANCE: &str = "\
Reply in plain text. Keep formatting minimal and do not assume the surface can \
render markdown, buttons, or images.";

const WEB_GUIDANCE: &str = "\
You are in the web app. Markdown renders: use short headings, lists, and code \
blocks where they help. Longer answers are fine when the question calls for it.";

const TELEGRAM_GUIDANCE: &str = "\
You are in a Telegram chat on a phone. Keep replies short, a few sentences at \
most. Avoid tables and headings; use plain lists sparingly. Split long content \
into a summary and offer the rest.";

const SCHEDULED_GUIDANCE: &str = "\
This is a scheduled run. No one is reading along. Do the task, then write one \
concise result message. Do not ask questions; if something blocks you, state \
what and stop.";

const HEARTBEAT_GUIDANCE: &str = "\
This is a background heartbeat. Check whether anything needs the user's \
attention. If nothing does, produce no message at all. If something does, \
write one short notification.";

const SESSION_OPEN_GUIDANCE: &str = "\
The user has just opened the app and has not written anything. Whatever you \
send appears as the first message of the session.";

/// Channel guidance lookup. Unknown channels get [`DEFAULT_CHANNEL_GUIDANCE`].
pub fn channel_guidance(channel: &Channel) -> &'static str {
    match channel {
        Channel::Web => WEB_GUIDANCE,
        Channel::Telegram => TELEGRAM_GUIDANCE,
        Channel::Scheduled => SCHEDULED_GUIDANCE,
        Channel::Heartbeat => HEARTBEAT_GUIDANCE,
        Channel::SessionOpen => SESSION_OPEN_GUIDANCE,
        Channel::Other(_) => DEFAULT_CHANNEL_GUIDANCE,
    }
}

/// Render `now` in `tz`, e.g. `Friday, October 16, 2026 at 2:00 PM CEST (Europe/Berlin)`.
pub fn format_current_time(now: DateTime<Utc>, tz: Tz) -> String {
    let local = now.with_timezone(&tz);
    format!(
        "{} ({})",
        local.format("%A, %B %-d, %Y at %-I:%M %p %Z"),
        tz.name()
    )
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve all ten sections for one render.
pub fn resolve_sections(ctx: &RenderContext, agent: &AgentConfig) -> SectionValues {
    let channel = &ctx.channel;

    let operating_model = if channel.is_interactive() {
        OPERATING_MODEL_TEXT
    } else {
        ""
    };
    let interaction_learning = if channel.is_conversational() {
        INTERACTION_LEARNING_TEXT
    } else {
        ""
    };

    let memory_notes = bounded(
        ctx.memory_notes.as_deref(),
        MEMORY_NOTES_CHAR_LIMIT,
        "memory_notes",
    );
    let user_instructions = bounded(
        ctx.user_instructions.as_deref(),
        USER_INSTRUCTIONS_CHAR_LIMIT,
        "user_instructions",
    );

    let session = compute_session_section(
        channel,
        ctx.is_new_user,
        ctx.last_message_at,
        ctx.current_time,
        ctx.has_new_activity,
    );

    SectionValues::new()
        .with(SectionKey::Identity, format_identity(&agent.identity))
        .with(SectionKey::Soul, resolve_soul(&agent.soul))
        .with(SectionKey::OperatingModel, operating_model)
        .with(SectionKey::ChannelGuidance, channel_guidance(channel))
        .with(
            SectionKey::CurrentTime,
            format_current_time(ctx.current_time, ctx.time_zone),
        )
        .with(SectionKey::MemoryNotes, memory_notes)
        .with(SectionKey::UserInstructions, user_instructions)
        .with(
            SectionKey::ToolGuidance,
            aggregate_tool_guidance(&ctx.tools, channel),
        )
        .with(SectionKey::InteractionLearning, interaction_learning)
        .with(SectionKey::SessionSection, session)
}

/// Absent text becomes empty; oversized text is cut to `limit` characters.
fn bounded<'a>(text: Option<&'a str>, limit: usize, field: &'static str) -> &'a str {
    let text = text.unwrap_or_default();
    let kept = truncate_chars(text, limit);
    if kept.len() < text.len() {
        debug!(field, limit, "truncated section input");
    }
    kept
}
