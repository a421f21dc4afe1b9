//! Agent configuration loading.
//!
//! Each agent is described by one TOML file:
//!
//! ```toml
//! agent_name = "atlas"
//! soul = "Be direct."
//! prompt_template = "## Identity\n$identity"   # optional
//!
//! [identity]
//! name = "Atlas"
//! description = "a personal operations assistant"
//! vibe = "Calm and precise."                    # optional
//!
//! [llm_config]                                  # optional, opaque
//! model = "anthropic/claude-sonnet"
//! ```
//!
//! Configuration is owned by an external authority. This crate only reads it
//! and treats every loaded [`AgentConfig`] as an immutable snapshot.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Errors raised while loading agent configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading a config file or directory failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File or directory that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A config file is not valid TOML for [`AgentConfig`].
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// A required field is present but blank.
    #[error("{path}: field `{field}` must not be empty")]
    MissingField {
        /// Offending file.
        path: PathBuf,
        /// Name of the blank field.
        field: &'static str,
    },
    /// Two files declare the same `agent_name`.
    #[error("agent `{0}` is defined more than once")]
    DuplicateAgent(String),
    /// No agent with the requested name is registered.
    #[error("agent not found: {0}")]
    NotFound(String),
}

/// Structured identity used for the one-line self-introduction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    /// Display name.
    pub name: String,
    /// What the agent is, as a noun phrase.
    pub description: String,
    /// Optional tone line appended after the description.
    #[serde(default)]
    pub vibe: Option<String>,
}

/// One agent's configuration record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentConfig {
    /// Unique agent key.
    pub agent_name: String,
    /// Behavioral philosophy. Blank means "use the generic fallback".
    #[serde(default)]
    pub soul: String,
    /// Structured identity.
    pub identity: Identity,
    /// Optional template with `$placeholder` tokens.
    #[serde(default)]
    pub prompt_template: Option<String>,
    /// Model settings. Carried through untouched; prompt assembly ignores them.
    #[serde(default)]
    pub llm_config: toml::Table,
}

impl AgentConfig {
    /// Parse an agent config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid agent config,
    /// or [`ConfigError::MissingField`] if `agent_name` or `identity.name` is blank.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: AgentConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    fn validate(&self, origin: &Path) -> Result<(), ConfigError> {
        if self.agent_name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                path: origin.to_path_buf(),
                field: "agent_name",
            });
        }
        if self.identity.name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                path: origin.to_path_buf(),
                field: "identity.name",
            });
        }
        Ok(())
    }
}

/// Load a single agent config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid agent config.
pub fn load_agent_config(path: &Path) -> Result<AgentConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    AgentConfig::from_toml_str(&contents, path)
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Agent configs indexed by `agent_name`.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<String, AgentConfig>,
}

impl AgentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            agents: BTreeMap::new(),
        }
    }

    /// Register an agent config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateAgent`] if the name is already taken.
    pub fn register(&mut self, config: AgentConfig) -> Result<(), ConfigError> {
        if self.agents.contains_key(&config.agent_name) {
            return Err(ConfigError::DuplicateAgent(config.agent_name));
        }
        debug!(agent = %config.agent_name, "registered agent config");
        self.agents.insert(config.agent_name.clone(), config);
        Ok(())
    }

    /// Load every `.toml` file in `dir` as an agent config.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read, any file fails to
    /// parse, or two files share an `agent_name`.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("toml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut registry = Self::new();
        for path in &paths {
            registry.register(load_agent_config(path)?)?;
        }
        info!(dir = %dir.display(), count = registry.len(), "loaded agent configs");
        Ok(registry)
    }

    /// Look up an agent by name.
    pub fn get(&self, name: &str) -> Option<&AgentConfig> {
        self.agents.get(name)
    }

    /// Look up an agent by name, failing when it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no agent has that name.
    pub fn require(&self, name: &str) -> Result<&AgentConfig, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::NotFound(name.to_owned()))
    }

    /// Registered agent names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(String::as_str)
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Resolve the default config directory (`~/.soulprompt/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".soulprompt"))
}

/// Resolve the default agents directory (`~/.soulprompt/agents/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_agents_dir() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("agents"))
}
