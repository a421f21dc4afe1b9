//! soulprompt CLI entry point.
//!
//! Loads an agent config, builds a render context from flags, and prints the
//! assembled system prompt. All I/O and the clock read happen here; the engine
//! itself only sees the resulting snapshot.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};

use soulprompt::agent::{Channel, RenderContext};
use soulprompt::config::{default_agents_dir, load_agent_config, AgentConfig, AgentRegistry};
use soulprompt::prompt::{
    assemble_prompt, resolve_sections, unresolved_placeholders, DEFAULT_TEMPLATE,
};
use soulprompt::tools::{self, ToolDescriptor, BUILTIN_TOOL_NAMES};

/// soulprompt — assemble agent system prompts from layered configuration.
#[derive(Parser)]
#[command(name = "soulprompt", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write JSON logs (daily rotation) to this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Assemble and print the system prompt.
    Render {
        /// Render inputs.
        #[command(flatten)]
        inputs: RenderArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the resolved section values as JSON.
    Sections {
        /// Render inputs.
        #[command(flatten)]
        inputs: RenderArgs,
    },
    /// List placeholders in the agent's template that will stay literal.
    CheckTemplate {
        /// Agent selection.
        #[command(flatten)]
        agent: AgentArgs,
    },
    /// Print the canonical default template.
    DefaultTemplate,
}

/// How `render` prints its result.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// The prompt text only.
    Text,
    /// A JSON object with the prompt and its length.
    Json,
}

/// Which agent config to use.
#[derive(Args)]
struct AgentArgs {
    /// Path to an agent TOML file, or an agent name to look up in `--agents-dir`.
    #[arg(long)]
    agent: String,

    /// Directory of agent TOML files (default: ~/.soulprompt/agents).
    #[arg(long)]
    agents_dir: Option<PathBuf>,
}

/// Inputs for a single render.
#[derive(Args)]
struct RenderArgs {
    /// Agent selection.
    #[command(flatten)]
    agent: AgentArgs,

    /// Channel name (web, telegram, scheduled, heartbeat, sessionOpen).
    #[arg(long, default_value = "web")]
    channel: String,

    /// File with the pre-fetched memory summary.
    #[arg(long)]
    memory: Option<PathBuf>,

    /// File with user-authored instructions.
    #[arg(long)]
    instructions: Option<PathBuf>,

    /// When the user last sent a message (RFC 3339).
    #[arg(long, value_parser = parse_timestamp)]
    last_message: Option<DateTime<Utc>>,

    /// Something new happened since the user's last message.
    #[arg(long)]
    new_activity: bool,

    /// Clock reading to render with (RFC 3339, default: now).
    #[arg(long, value_parser = parse_timestamp)]
    now: Option<DateTime<Utc>>,

    /// IANA time zone for the current-time section.
    #[arg(long, default_value = "UTC", value_parser = parse_time_zone)]
    tz: Tz,

    /// Attach a built-in tool (gmail, tasks, schedule). Repeatable.
    #[arg(long = "tool")]
    tools: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = soulprompt::logging::level_for_verbosity(cli.verbose);
    let _logging_guard = match &cli.log_dir {
        Some(dir) => Some(soulprompt::logging::init_production(dir, level)?),
        None => {
            if !soulprompt::logging::init_cli(level) {
                debug!("log subscriber already installed, keeping it");
            }
            None
        }
    };

    match cli.command {
        Command::Render { inputs, format } => handle_render(&inputs, format),
        Command::Sections { inputs } => handle_sections(&inputs),
        Command::CheckTemplate { agent } => handle_check_template(&agent),
        Command::DefaultTemplate => {
            println!("{}", *DEFAULT_TEMPLATE);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Assemble the prompt and print it.
fn handle_render(inputs: &RenderArgs, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let agent = load_agent(&inputs.agent)?;
    let ctx = build_context(inputs)?;
    let prompt = assemble_prompt(&ctx, &agent);
    info!(agent = %agent.agent_name, channel = %ctx.channel, chars = prompt.char_count, "rendered prompt");

    match format {
        OutputFormat::Text => println!("{}", prompt.text),
        OutputFormat::Json => {
            let out = serde_json::json!({
                "agent": agent.agent_name,
                "channel": ctx.channel.as_str(),
                "char_count": prompt.char_count,
                "prompt": prompt.text,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Print resolved section values keyed by placeholder name.
fn handle_sections(inputs: &RenderArgs) -> anyhow::Result<ExitCode> {
    let agent = load_agent(&inputs.agent)?;
    let ctx = build_context(inputs)?;
    let values = resolve_sections(&ctx, &agent);
    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(ExitCode::SUCCESS)
}

/// Report placeholders the agent's template leaves literal.
fn handle_check_template(args: &AgentArgs) -> anyhow::Result<ExitCode> {
    let agent = load_agent(args)?;
    let Some(template) = agent.prompt_template.as_deref() else {
        println!("{}: no prompt_template, fallback rendering is used", agent.agent_name);
        return Ok(ExitCode::SUCCESS);
    };

    let unresolved = unresolved_placeholders(template);
    if unresolved.is_empty() {
        println!("{}: all placeholders resolve", agent.agent_name);
        return Ok(ExitCode::SUCCESS);
    }

    for token in &unresolved {
        println!("{}: unresolved placeholder {token}", agent.agent_name);
    }
    Ok(ExitCode::FAILURE)
}

/// Load the agent from a file path or by name from the agents directory.
fn load_agent(args: &AgentArgs) -> anyhow::Result<AgentConfig> {
    let as_path = Path::new(&args.agent);
    if as_path.is_file() {
        debug!(path = %as_path.display(), "loading agent config from file");
        return load_agent_config(as_path)
            .with_context(|| format!("failed to load agent config {}", as_path.display()));
    }

    let dir = match &args.agents_dir {
        Some(dir) => dir.clone(),
        None => default_agents_dir()?,
    };
    let registry = AgentRegistry::load_from_dir(&dir)
        .with_context(|| format!("failed to load agents from {}", dir.display()))?;
    let agent = registry.require(&args.agent)?.clone();
    Ok(agent)
}

/// Build the render context. Reads input files and, if `--now` is absent, the clock.
fn build_context(inputs: &RenderArgs) -> anyhow::Result<RenderContext> {
    let channel = Channel::from_name(&inputs.channel);
    if let Channel::Other(name) = &channel {
        warn!(channel = %name, "unknown channel, default guidance applies");
    }

    let now = inputs.now.unwrap_or_else(Utc::now);
    let mut ctx = RenderContext::new(channel, now, inputs.tz)
        .with_new_activity(inputs.new_activity)
        .with_tools(resolve_tools(&inputs.tools)?);

    if let Some(path) = &inputs.memory {
        ctx = ctx.with_memory_notes(read_text(path)?);
    }
    if let Some(path) = &inputs.instructions {
        ctx = ctx.with_user_instructions(read_text(path)?);
    }
    if let Some(at) = inputs.last_message {
        ctx = ctx.with_last_message_at(at);
    }

    debug!(?ctx, "built render context");
    Ok(ctx)
}

fn resolve_tools(names: &[String]) -> anyhow::Result<Vec<Arc<dyn ToolDescriptor>>> {
    names
        .iter()
        .map(|name| {
            tools::builtin(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown tool '{name}' (available: {})",
                    BUILTIN_TOOL_NAMES.join(", ")
                )
            })
        })
        .collect()
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{raw}': {e}"))
}

fn parse_time_zone(raw: &str) -> Result<Tz, String> {
    raw.parse::<Tz>()
        .map_err(|e| format!("unknown time zone '{raw}': {e}"))
}
