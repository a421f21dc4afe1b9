//! Scheduling tool descriptor.
//!
//! Lets the agent create cron-style scheduled runs of itself. Guidance differs
//! sharply by channel: inside a scheduled run the agent must not schedule more
//! runs, or a single task could fan out indefinitely.

use super::ToolDescriptor;
use crate::agent::Channel;

/// Class name of the scheduling tool.
pub const CLASS_NAME: &str = "schedule";

const DESCRIPTION: &str = "Create, list, and cancel scheduled runs of the agent.";

/// Scheduler attached to the agent.
#[derive(Debug, Clone, Default)]
pub struct ScheduleTool;

impl ScheduleTool {
    /// Create the descriptor.
    pub fn new() -> Self {
        Self
    }
}

impl ToolDescriptor for ScheduleTool {
    fn class_name(&self) -> &str {
        CLASS_NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn prompt_section(&self, channel: &Channel) -> Option<String> {
        let guidance = if channel.is_interactive() {
            "\
### Scheduling
- Schedule a run only when the user asks for something recurring or for later.
- Repeat the schedule back in plain words (\"every weekday at 8:00\") before creating it.
- Times are in the user's time zone unless they say otherwise."
        } else {
            "\
### Scheduling
- You are already inside a scheduled or background run.
- Never create, modify, or cancel schedules from here."
        };
        Some(guidance.to_owned())
    }
}
