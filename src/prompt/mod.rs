//! System prompt assembly.
//!
//! ```text
//! assemble ─► resolver ─► (tools::aggregate_tool_guidance, agent::session)
//!          ─► template (templated | fallback)
//!          ─► stripper
//! ```
//!
//! Every stage is a pure function of its inputs.

pub mod assembler;
pub mod resolver;
pub mod sections;
pub mod stripper;
pub mod template;

pub use assembler::{assemble, assemble_prompt, AssembledPrompt};
pub use resolver::resolve_sections;
pub use sections::{SectionKey, SectionValues, CANONICAL_SECTIONS, DEFAULT_TEMPLATE};
pub use stripper::normalize;
pub use template::{render, unresolved_placeholders, RenderStrategy};
