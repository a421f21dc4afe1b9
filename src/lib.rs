//! soulprompt — deterministic system prompt assembly for channel-aware agents.
//!
//! Composes the instruction text handed to a language model from independently
//! owned layers: the agent's soul and identity, the channel being served, tool
//! guidance, user instructions, and a pre-fetched memory summary.
//!
//! Assembly is a pure function of an immutable snapshot. Fetching and caching
//! configuration is the caller's job.
//!
//! See `DESIGN.md` for the architecture notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;

pub mod agent;
pub mod prompt;
pub mod tools;

pub use agent::{Channel, RenderContext};
pub use config::AgentConfig;
pub use prompt::{assemble, assemble_prompt, AssembledPrompt};
