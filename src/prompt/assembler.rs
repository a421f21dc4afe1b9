//! Prompt assembly: resolve, render, normalise.

use serde::Serialize;
use tracing::debug;

use crate::agent::RenderContext;
use crate::config::AgentConfig;
use crate::prompt::resolver::resolve_sections;
use crate::prompt::stripper::normalize;
use crate::prompt::template::RenderStrategy;

/// Final prompt text with its length for observability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledPrompt {
    /// The system prompt.
    pub text: String,
    /// Length of `text` in characters.
    pub char_count: usize,
}

/// Assemble the system prompt for one render.
///
/// The agent config contributes only identity, soul and template. Everything
/// else comes from `ctx`. Calling this any number of times with the same
/// inputs returns the same prompt.
pub fn assemble_prompt(ctx: &RenderContext, agent: &AgentConfig) -> AssembledPrompt {
    let values = resolve_sections(ctx, agent);
    let strategy = RenderStrategy::for_template(agent.prompt_template.as_deref());
    let text = normalize(&strategy.render(&values));
    let char_count = text.chars().count();

    debug!(
        agent = %agent.agent_name,
        channel = %ctx.channel,
        templated = matches!(strategy, RenderStrategy::Templated(_)),
        chars = char_count,
        "assembled system prompt"
    );

    AssembledPrompt { text, char_count }
}

/// Assemble the system prompt text.
pub fn assemble(ctx: &RenderContext, agent: &AgentConfig) -> String {
    assemble_prompt(ctx, agent).text
}
