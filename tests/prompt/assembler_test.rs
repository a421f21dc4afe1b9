//! End-to-end tests for prompt assembly.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use soulprompt::agent::session::{ONBOARDING_MARKER, WAKEUP_SILENT};
use soulprompt::agent::{Channel, RenderContext};
use soulprompt::config::{AgentConfig, Identity};
use soulprompt::prompt::{
    assemble, assemble_prompt, normalize, render, SectionKey, SectionValues, DEFAULT_TEMPLATE,
};
use soulprompt::tools::{GmailTool, ScheduleTool, TaskTool, ToolDescriptor};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-16T12:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn agent(template: Option<&str>) -> AgentConfig {
    AgentConfig {
        agent_name: "atlas".to_owned(),
        soul: "Be direct. Be kind.".to_owned(),
        identity: Identity {
            name: "Atlas".to_owned(),
            description: "a personal operations assistant".to_owned(),
            vibe: None,
        },
        prompt_template: template.map(str::to_owned),
        llm_config: toml::Table::new(),
    }
}

fn channels() -> Vec<Channel> {
    vec![
        Channel::Web,
        Channel::Telegram,
        Channel::Scheduled,
        Channel::Heartbeat,
        Channel::SessionOpen,
        Channel::Other("sms".to_owned()),
    ]
}

fn contexts() -> Vec<RenderContext> {
    let mut out = Vec::new();
    for channel in channels() {
        out.push(RenderContext::new(channel.clone(), now(), Tz::UTC));
        out.push(
            RenderContext::new(channel, now(), Tz::UTC)
                .with_memory_notes("Prefers mornings.")
                .with_user_instructions("Answer in English.")
                .with_last_message_at(now() - Duration::minutes(10))
                .with_tool(Arc::new(GmailTool::new()))
                .with_tool(Arc::new(TaskTool::new())),
        );
    }
    out
}

fn templates() -> Vec<Option<String>> {
    vec![
        None,
        Some(DEFAULT_TEMPLATE.clone()),
        Some("# $identity\n\n$soul\n\n## Context\n$currentTime\n\n## Memory\n$memoryNotes".to_owned()),
    ]
}

#[test]
fn assembly_is_idempotent_under_normalize() {
    for template in templates() {
        for ctx in contexts() {
            let out = assemble(&ctx, &agent(template.as_deref()));
            assert_eq!(normalize(&out), out);
        }
    }
}

#[test]
fn no_triple_newlines_anywhere() {
    for template in templates() {
        for ctx in contexts() {
            let out = assemble(&ctx, &agent(template.as_deref()));
            assert!(!out.contains("\n\n\n"), "channel {}", ctx.channel);
            assert_eq!(out.trim(), out);
        }
    }
}

#[test]
fn fallback_matches_default_template() {
    for ctx in contexts() {
        let fallback = assemble(&ctx, &agent(None));
        let templated = assemble(&ctx, &agent(Some(DEFAULT_TEMPLATE.as_str())));
        assert_eq!(fallback, templated, "channel {}", ctx.channel);
    }
}

#[test]
fn recent_session_open_contains_sentinel() {
    let ctx = RenderContext::new(Channel::SessionOpen, now(), Tz::UTC)
        .with_memory_notes("Known user.")
        .with_last_message_at(now() - Duration::minutes(2));
    let out = assemble(&ctx, &agent(None));
    assert!(out.contains(WAKEUP_SILENT));
    assert!(out.ends_with(&format!("## Session\n{WAKEUP_SILENT}")));
    assert!(!out.contains("## Interaction Learning"));
}

#[test]
fn new_web_user_is_onboarded() {
    let ctx = RenderContext::new(Channel::Web, now(), Tz::UTC);
    let out = assemble(&ctx, &agent(None));
    assert!(out.contains(ONBOARDING_MARKER));
    assert!(!out.contains(WAKEUP_SILENT));
}

#[test]
fn heartbeat_prompt_has_no_human_sections() {
    let ctx = RenderContext::new(Channel::Heartbeat, now(), Tz::UTC);
    let out = assemble(&ctx, &agent(None));
    assert!(!out.contains("## Operating Model"));
    assert!(!out.contains("## Interaction Learning"));
    assert!(!out.contains("## Session"));
    assert!(!out.contains("## Memory"));
    assert!(out.starts_with("## Identity\nAtlas — a personal operations assistant."));
}

#[test]
fn typo_survives_assembly() {
    let template = "## Identity\n$identity\n\n## Extra\n$unknown_field";
    let ctx = RenderContext::new(Channel::Web, now(), Tz::UTC);
    let out = assemble(&ctx, &agent(Some(template)));
    assert!(out.contains("$unknown_field"));
}

#[test]
fn empty_tool_guidance_section_is_removed() {
    let values = SectionValues::new()
        .with(SectionKey::Identity, "Atlas.")
        .with(SectionKey::ToolGuidance, "");
    let out = normalize(&render(&values, None));
    assert!(!out.contains("## Tool Guidance"));

    let templated = normalize(&render(&values, Some(DEFAULT_TEMPLATE.as_str())));
    assert!(!templated.contains("## Tool Guidance"));
}

#[test]
fn whitespace_tool_guidance_section_keeps_header() {
    let values = SectionValues::new()
        .with(SectionKey::Identity, "Atlas.")
        .with(SectionKey::ToolGuidance, " ");
    let out = normalize(&render(&values, None));
    assert!(out.contains("## Tool Guidance"));

    let templated = normalize(&render(&values, Some(DEFAULT_TEMPLATE.as_str())));
    assert!(templated.contains("## Tool Guidance"));
}

#[test]
fn truncation_reaches_the_prompt() {
    let notes = format!("{}TAIL", "n".repeat(4000));
    let ctx = RenderContext::new(Channel::Web, now(), Tz::UTC).with_memory_notes(notes);
    let out = assemble(&ctx, &agent(None));
    assert!(out.contains(&"n".repeat(4000)));
    assert!(!out.contains("TAIL"));
}

#[test]
fn duplicate_tool_classes_contribute_once() {
    let ctx = RenderContext::new(Channel::Telegram, now(), Tz::UTC)
        .with_tool(Arc::new(GmailTool::for_account("home@example.com")))
        .with_tool(Arc::new(ScheduleTool::new()))
        .with_tool(Arc::new(GmailTool::for_account("work@example.com")));
    let out = assemble(&ctx, &agent(None));
    assert_eq!(out.matches("### Email").count(), 1);
    let email = out.find("### Email").expect("email guidance");
    let scheduling = out.find("### Scheduling").expect("schedule guidance");
    assert!(email < scheduling);
}

#[test]
fn char_count_matches_text() {
    let ctx = RenderContext::new(Channel::Web, now(), Tz::UTC).with_memory_notes("Likes é and ü.");
    let prompt = assemble_prompt(&ctx, &agent(None));
    assert_eq!(prompt.char_count, prompt.text.chars().count());
    assert!(prompt.char_count < prompt.text.len());
}

#[test]
fn concurrent_renders_agree() {
    let agent = agent(None);
    let ctx = RenderContext::new(Channel::Web, now(), Tz::UTC)
        .with_memory_notes("Shared context.")
        .with_tool(Arc::new(GmailTool::new()));
    let expected = assemble(&ctx, &agent);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| assemble(&ctx, &agent)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("render thread"), expected);
        }
    });
}

#[test]
fn tool_descriptor_object_is_usable_directly() {
    let tool: Arc<dyn ToolDescriptor> = Arc::new(TaskTool::new());
    assert_eq!(tool.class_name(), "tasks");
    assert!(tool.prompt_section(&Channel::Heartbeat).is_none());
}
