//! Tests for tool guidance aggregation.

use std::sync::Arc;

use soulprompt::agent::Channel;
use soulprompt::tools::{aggregate_tool_guidance, ToolDescriptor};

/// Test descriptor with fixed guidance.
struct FakeTool {
    class: &'static str,
    guidance: Option<&'static str>,
}

impl ToolDescriptor for FakeTool {
    fn class_name(&self) -> &str {
        self.class
    }

    fn description(&self) -> &str {
        "fake tool"
    }

    fn prompt_section(&self, _channel: &Channel) -> Option<String> {
        self.guidance.map(str::to_owned)
    }
}

fn tool(class: &'static str, guidance: Option<&'static str>) -> Arc<dyn ToolDescriptor> {
    Arc::new(FakeTool { class, guidance })
}

#[test]
fn empty_list_yields_empty_string() {
    assert_eq!(aggregate_tool_guidance(&[], &Channel::Web), "");
}

#[test]
fn blocks_join_with_blank_line_in_order() {
    let tools = vec![tool("a", Some("alpha")), tool("b", Some("beta"))];
    assert_eq!(aggregate_tool_guidance(&tools, &Channel::Web), "alpha\n\nbeta");
}

#[test]
fn same_class_contributes_once() {
    let tools = vec![
        tool("mail", Some("first mailbox")),
        tool("mail", Some("second mailbox")),
    ];
    assert_eq!(
        aggregate_tool_guidance(&tools, &Channel::Web),
        "first mailbox"
    );
}

#[test]
fn first_instance_decides_even_when_silent() {
    let tools = vec![tool("mail", None), tool("mail", Some("second mailbox"))];
    assert_eq!(aggregate_tool_guidance(&tools, &Channel::Web), "");
}

#[test]
fn none_and_blank_guidance_skipped() {
    let tools = vec![
        tool("a", None),
        tool("b", Some("")),
        tool("c", Some("  \n")),
        tool("d", Some("delta")),
    ];
    assert_eq!(aggregate_tool_guidance(&tools, &Channel::Web), "delta");
}

#[test]
fn interleaved_duplicates_keep_first_position() {
    let tools = vec![
        tool("a", Some("alpha")),
        tool("b", Some("beta")),
        tool("a", Some("alpha again")),
        tool("c", Some("gamma")),
    ];
    assert_eq!(
        aggregate_tool_guidance(&tools, &Channel::Telegram),
        "alpha\n\nbeta\n\ngamma"
    );
}
