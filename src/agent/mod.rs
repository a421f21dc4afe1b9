//! Agent-facing inputs to prompt assembly: channels, the per-render context,
//! identity formatting, and the session decision tree.
//!
//! Everything here is a snapshot. The caller fetches agent configuration,
//! memory notes and tool descriptors before a render and hands them in; nothing
//! in this module performs I/O or reads the clock.

use std::fmt;

pub mod context;
pub mod identity;
pub mod session;

pub use context::RenderContext;

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Communication surface a render is performed for.
///
/// The channel gates which sections of the prompt are populated. Parsing never
/// fails: unrecognised names become [`Channel::Other`] and receive the default
/// channel guidance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Browser chat.
    Web,
    /// Telegram direct messages.
    Telegram,
    /// Cron-triggered task with no user in the loop.
    Scheduled,
    /// Periodic background check-in.
    Heartbeat,
    /// The user just opened the app; no message has been sent yet.
    SessionOpen,
    /// Any channel name this engine does not know about.
    Other(String),
}

impl Channel {
    /// Resolve a channel from its wire name. Unknown names map to `Other`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "web" => Self::Web,
            "telegram" => Self::Telegram,
            "scheduled" => Self::Scheduled,
            "heartbeat" => Self::Heartbeat,
            "sessionOpen" | "session_open" => Self::SessionOpen,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Wire name of the channel.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Web => "web",
            Self::Telegram => "telegram",
            Self::Scheduled => "scheduled",
            Self::Heartbeat => "heartbeat",
            Self::SessionOpen => "sessionOpen",
            Self::Other(name) => name,
        }
    }

    /// Whether a human is present on the other end (`web`, `telegram`,
    /// `sessionOpen`).
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Web | Self::Telegram | Self::SessionOpen)
    }

    /// Whether the user is actively sending messages (`web`, `telegram`).
    pub fn is_conversational(&self) -> bool {
        matches!(self, Self::Web | Self::Telegram)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
