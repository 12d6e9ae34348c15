//! Network configuration loading and validation.
//!
//! A YAML document describing the completion host, routing bounds, and the
//! agents to register. Every field is optional; an absent file section
//! falls back to the built-in two-agent network.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::agent::prompts::{CODING_DESCRIPTION, TRIGONOMETRY_DESCRIPTION};

/// Environment variable that replaces `llm.host`.
pub const LLM_HOST_ENV: &str = "TRIGONET_LLM_HOST";

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config lists no agents")]
    NoAgents,

    #[error("duplicate agent name '{0}'")]
    DuplicateAgent(String),

    #[error("agent name must not be empty")]
    EmptyAgentName,

    #[error("remote agent '{0}' has no url")]
    MissingUrl(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

// ─── Sections ───────────────────────────────────────────────────────────────

/// Completion endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub host: String,
    pub generation_timeout_secs: u64,
    pub ping_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:5001".into(),
            generation_timeout_secs: 30,
            ping_timeout_secs: 10,
        }
    }
}

impl LlmConfig {
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_secs(self.ping_timeout_secs)
    }
}

/// Router settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Bound on the routing task.
    pub timeout_secs: u64,
    /// Replaces the built-in routing instructions.
    pub system_prompt: Option<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 45,
            system_prompt: None,
        }
    }
}

impl RoutingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Which implementation backs an agent entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Trigonometry,
    Coding,
    Remote,
}

/// One agent entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub kind: AgentKind,
    /// Routing-prompt description; the kind's built-in text when absent.
    #[serde(default)]
    pub description: Option<String>,
    /// Coding agents only: generate through the LLM instead of templates.
    #[serde(default)]
    pub use_llm: bool,
    /// Remote agents only.
    #[serde(default)]
    pub url: Option<String>,
}

impl AgentConfig {
    pub fn local(name: &str, kind: AgentKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: None,
            use_llm: false,
            url: None,
        }
    }

    /// Description embedded in the routing prompt.
    pub fn description(&self) -> &str {
        match (&self.description, self.kind) {
            (Some(d), _) => d,
            (None, AgentKind::Trigonometry) => TRIGONOMETRY_DESCRIPTION,
            (None, AgentKind::Coding) => CODING_DESCRIPTION,
            (None, AgentKind::Remote) => "Remote agent",
        }
    }
}

fn default_agents() -> Vec<AgentConfig> {
    vec![
        AgentConfig::local("trigonometry_math", AgentKind::Trigonometry),
        AgentConfig {
            use_llm: true,
            ..AgentConfig::local("coding", AgentKind::Coding)
        },
    ]
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default = "default_agents")]
    pub agents: Vec<AgentConfig>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            routing: RoutingConfig::default(),
            agents: default_agents(),
        }
    }
}

// ─── Loading ────────────────────────────────────────────────────────────────

impl NetworkConfig {
    /// Read and parse a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults".
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply `TRIGONET_LLM_HOST` when set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var(LLM_HOST_ENV) {
            self.override_llm_host(&host);
        }
    }

    fn override_llm_host(&mut self, host: &str) {
        let host = host.trim();
        if !host.is_empty() {
            self.llm.host = host.to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents.is_empty() {
            return Err(ConfigError::NoAgents);
        }
        if self.llm.generation_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("llm.generation_timeout_secs"));
        }
        if self.llm.ping_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("llm.ping_timeout_secs"));
        }
        if self.routing.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("routing.timeout_secs"));
        }

        let mut seen = HashSet::new();
        for agent in &self.agents {
            if agent.name.trim().is_empty() {
                return Err(ConfigError::EmptyAgentName);
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(ConfigError::DuplicateAgent(agent.name.clone()));
            }
            if agent.kind == AgentKind::Remote
                && agent.url.as_deref().map_or(true, |u| u.trim().is_empty())
            {
                return Err(ConfigError::MissingUrl(agent.name.clone()));
            }
        }
        Ok(())
    }
}
