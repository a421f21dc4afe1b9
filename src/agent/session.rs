//! Session section: onboarding, returning-user greeting, or silent wake.
//!
//! Decides what the agent should do about the conversation opening itself.
//! A brand-new user gets onboarding; a returning user who reopens the app gets
//! a greeting; a user who reopens the app moments after their last message,
//! with nothing new to report, gets the [`WAKEUP_SILENT`] sentinel. The caller
//! special-cases the sentinel to suppress a visible reply. This module only
//! emits it.

use chrono::{DateTime, Duration, Utc};

use crate::agent::Channel;

/// Sentinel telling the caller not to send a visible reply.
pub const WAKEUP_SILENT: &str = "WAKEUP_SILENT";

/// Phrase present in every onboarding text.
pub const ONBOARDING_MARKER: &str = "This is your first conversation with this user.";

/// Opening the app for the very first time.
pub const ONBOARDING_BOOTSTRAP_TEXT: &str = "\
This is your first conversation with this user. They have just opened the app \
and have not written anything yet. Open the conversation yourself: introduce \
yourself in one or two sentences, say plainly what you can help with, and ask \
one question that helps you learn how they want to work with you. Do not list \
every capability.";

/// First message from a new user on a chat channel.
pub const ONBOARDING_FIRST_MESSAGE_TEXT: &str = "\
This is your first conversation with this user. Answer what they asked first. \
Then, briefly and only if it fits naturally, introduce yourself and ask one \
question that helps you learn their preferences. Save anything durable they \
tell you about themselves.";

/// A known user reopened the app after a while, or something new happened.
pub const RETURNING_USER_GREETING_TEXT: &str = "\
The user has just reopened the app. Greet them briefly and naturally, as \
someone who remembers them. If something new happened since their last \
message, lead with that. Otherwise keep it to a short hello and an offer to \
pick up where you left off.";

/// How recent (in seconds) the last message must be for a reopen to stay silent.
pub const SILENT_WAKE_WINDOW_SECS: i64 = 300;

// ---------------------------------------------------------------------------
// Decision tree
// ---------------------------------------------------------------------------

/// Outcome of the session decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionDecision {
    /// New user opened the app.
    OnboardingBootstrap,
    /// Returning user opened the app.
    ReturningGreeting,
    /// Returning user reopened the app moments ago with nothing new.
    Silent,
    /// New user sent their first chat message.
    OnboardingFirstMessage,
    /// No session guidance for this render.
    Nothing,
}

impl SessionDecision {
    /// Decide the session behavior for one render.
    pub fn decide(
        channel: &Channel,
        is_new_user: bool,
        last_message_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        has_new_activity: bool,
    ) -> Self {
        match channel {
            Channel::SessionOpen if is_new_user => Self::OnboardingBootstrap,
            Channel::SessionOpen => {
                if is_recent(last_message_at, now) && !has_new_activity {
                    Self::Silent
                } else {
                    Self::ReturningGreeting
                }
            }
            Channel::Web | Channel::Telegram if is_new_user => Self::OnboardingFirstMessage,
            _ => Self::Nothing,
        }
    }

    /// Section text for this decision.
    pub fn text(self) -> &'static str {
        match self {
            Self::OnboardingBootstrap => ONBOARDING_BOOTSTRAP_TEXT,
            Self::ReturningGreeting => RETURNING_USER_GREETING_TEXT,
            Self::Silent => WAKEUP_SILENT,
            Self::OnboardingFirstMessage => ONBOARDING_FIRST_MESSAGE_TEXT,
            Self::Nothing => "",
        }
    }
}

/// Compute the session section text.
pub fn compute_session_section(
    channel: &Channel,
    is_new_user: bool,
    last_message_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    has_new_activity: bool,
) -> String {
    SessionDecision::decide(channel, is_new_user, last_message_at, now, has_new_activity)
        .text()
        .to_owned()
}

/// A last message counts as recent when it is less than
/// [`SILENT_WAKE_WINDOW_SECS`] old. Timestamps in the future count as recent.
fn is_recent(last_message_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last_message_at {
        Some(at) => now.signed_duration_since(at) < Duration::seconds(SILENT_WAKE_WINDOW_SECS),
        None => false,
    }
}
