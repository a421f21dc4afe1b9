//! Gmail tool descriptor.
//!
//! One instance per connected mailbox. All instances share the `gmail` class,
//! so guidance appears once however many accounts are attached.

use super::ToolDescriptor;
use crate::agent::Channel;

/// Class name shared by every Gmail instance.
pub const CLASS_NAME: &str = "gmail";

const DESCRIPTION: &str = "Search, read, draft, and send email in a connected Gmail account.";

const INTERACTIVE_GUIDANCE: &str = "\
### Email
- Search before you read: narrow by sender, subject, or date instead of listing the inbox.
- Summarise threads; quote only the lines the user needs.
- Always show a draft and wait for explicit confirmation before sending.
- Never forward or reply-all without being asked.";

const UNATTENDED_GUIDANCE: &str = "\
### Email
- No one is watching this run. Never send, reply, or delete mail.
- You may read and summarise. Create drafts only if the task asks for them.
- Report anything that needs the user's attention in your final message.";

/// Gmail mailbox attached to the agent.
#[derive(Debug, Clone, Default)]
pub struct GmailTool {
    account: Option<String>,
}

impl GmailTool {
    /// Create a descriptor for the default account.
    pub fn new() -> Self {
        Self { account: None }
    }

    /// Create a descriptor for a specific account address.
    pub fn for_account(account: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
        }
    }

    /// Account address, when bound to one.
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }
}

impl ToolDescriptor for GmailTool {
    fn class_name(&self) -> &str {
        CLASS_NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn prompt_section(&self, channel: &Channel) -> Option<String> {
        let guidance = match channel {
            Channel::Web | Channel::Telegram | Channel::SessionOpen => INTERACTIVE_GUIDANCE,
            Channel::Scheduled | Channel::Heartbeat => UNATTENDED_GUIDANCE,
            Channel::Other(_) => INTERACTIVE_GUIDANCE,
        };
        Some(guidance.to_owned())
    }
}
