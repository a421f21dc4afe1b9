//! Tool descriptors and tool guidance aggregation.
//!
//! Tools themselves live outside this crate. The only capability they expose
//! here is [`ToolDescriptor::prompt_section`]: channel-aware behavioral
//! guidance that is folded into the `## Tool Guidance` section of the prompt.
//!
//! Guidance is contributed per tool *class*, never per instance. Two attached
//! instances of the same class (say, two mailboxes) produce one block.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::agent::Channel;

pub mod gmail;
pub mod schedule;
pub mod tasks;

pub use gmail::GmailTool;
pub use schedule::ScheduleTool;
pub use tasks::TaskTool;

/// Boundary a tool class exposes to prompt assembly.
pub trait ToolDescriptor: Send + Sync {
    /// Stable identifier of the tool class. Guidance is deduplicated on it.
    fn class_name(&self) -> &str;

    /// Description shown next to the tool's machine schema.
    fn description(&self) -> &str;

    /// Behavioral guidance for the given channel, if any.
    fn prompt_section(&self, _channel: &Channel) -> Option<String> {
        None
    }
}

/// Collect guidance from `tools` for `channel`.
///
/// Tools are visited in order. Only the first tool of each class is asked for
/// guidance; later instances of a seen class are skipped even when the first
/// one returned nothing. Blank guidance is dropped. Blocks are joined with a
/// single blank line.
pub fn aggregate_tool_guidance(tools: &[Arc<dyn ToolDescriptor>], channel: &Channel) -> String {
    let mut seen: HashSet<&str> = HashSet::with_capacity(tools.len());
    let mut blocks: Vec<String> = Vec::new();

    for tool in tools {
        let class = tool.class_name();
        if !seen.insert(class) {
            debug!(class, "skipping duplicate tool class");
            continue;
        }
        match tool.prompt_section(channel) {
            Some(guidance) if !guidance.trim().is_empty() => blocks.push(guidance),
            _ => {}
        }
    }

    blocks.join("\n\n")
}

/// Names accepted by [`builtin`].
pub const BUILTIN_TOOL_NAMES: &[&str] = &[gmail::CLASS_NAME, tasks::CLASS_NAME, schedule::CLASS_NAME];

/// Resolve a built-in tool descriptor by class name.
pub fn builtin(name: &str) -> Option<Arc<dyn ToolDescriptor>> {
    match name {
        gmail::CLASS_NAME => Some(Arc::new(GmailTool::new())),
        tasks::CLASS_NAME => Some(Arc::new(TaskTool::new())),
        schedule::CLASS_NAME => Some(Arc::new(ScheduleTool::new())),
        _ => None,
    }
}
