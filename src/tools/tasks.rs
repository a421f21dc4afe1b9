//! Task list tool descriptor.

use super::ToolDescriptor;
use crate::agent::Channel;

/// Class name of the task tool.
pub const CLASS_NAME: &str = "tasks";

const DESCRIPTION: &str = "Create, update, complete, and list the user's tasks.";

/// Task list attached to the agent.
#[derive(Debug, Clone, Default)]
pub struct TaskTool;

impl TaskTool {
    /// Create the descriptor.
    pub fn new() -> Self {
        Self
    }
}

impl ToolDescriptor for TaskTool {
    fn class_name(&self) -> &str {
        CLASS_NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    // Heartbeats only check in; they never touch the task list.
    fn prompt_section(&self, channel: &Channel) -> Option<String> {
        match channel {
            Channel::Heartbeat => None,
            Channel::Scheduled => Some(
                "\
### Tasks
- Check due and overdue tasks first and mention them in your result.
- Do not create new tasks from a scheduled run unless the task says so."
                    .to_owned(),
            ),
            _ => Some(
                "\
### Tasks
- When the user mentions something they need to do later, offer to add it as a task.
- Keep titles short and actionable; put details in the notes.
- Confirm due dates in the user's time zone."
                    .to_owned(),
            ),
        }
    }
}
