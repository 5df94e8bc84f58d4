//! Configuration management for vitals.
//!
//! Settings are layered: built-in defaults, then the optional TOML file,
//! then values from the environment or command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::agent::AgentConfig;
use crate::error::{Result, VitalsError};
use crate::provider::{ProviderConfig, normalize_host};

/// Environment variable naming the model.
pub const ENV_MODEL_NAME: &str = "ENV_MODEL_NAME";
/// Environment variable overriding the seed prompt.
pub const ENV_PROMPT: &str = "ENV_PROMPT";
/// Ollama's own server address variable.
pub const OLLAMA_HOST: &str = "OLLAMA_HOST";

pub const DEFAULT_MODEL: &str = "llama3.2:3b";
pub const DEFAULT_PROMPT: &str =
    "Get Storage/memory info and generate short health report(<350 chars).";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VitalsConfig {
    #[serde(default)]
    pub provider: ProviderSection,

    #[serde(default)]
    pub agent: AgentSection,

    #[serde(default)]
    pub probes: ProbeSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    pub host: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentSection {
    pub prompt: Option<String>,
    /// Re-append the turn-1 assistant message before tool results.
    #[serde(default)]
    pub keep_assistant_turn: bool,
}

/// Command lines (program followed by arguments) replacing the built-in probes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProbeSection {
    pub storage: Option<Vec<String>>,
    pub memory: Option<Vec<String>>,
}

impl VitalsConfig {
    /// Load config from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| VitalsError::Config(format!("Failed to read config: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| VitalsError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vitals")
            .join("config.toml")
    }
}

/// Values taken from the environment or command line. Empty strings count as unset.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub host: Option<String>,
    pub timeout_secs: Option<u64>,
    pub keep_assistant_turn: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderConfig,
    pub agent: AgentConfig,
    pub probes: ProbeSection,
}

impl Settings {
    pub fn resolve(file: VitalsConfig, overrides: Overrides) -> Result<Self> {
        let model = non_empty(overrides.model)
            .or(non_empty(file.provider.model))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let prompt = non_empty(overrides.prompt)
            .or(non_empty(file.agent.prompt))
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string());

        let host = non_empty(overrides.host)
            .or(non_empty(file.provider.host))
            .map(|h| normalize_host(&h))
            .unwrap_or_else(|| ProviderConfig::default().host);

        for (name, cmd) in [
            ("storage", &file.probes.storage),
            ("memory", &file.probes.memory),
        ] {
            if matches!(cmd, Some(argv) if argv.first().is_none_or(|p| p.trim().is_empty())) {
                return Err(VitalsError::Config(format!(
                    "probes.{} must name a program",
                    name
                )));
            }
        }

        Ok(Self {
            provider: ProviderConfig {
                host,
                timeout_secs: overrides.timeout_secs.or(file.provider.timeout_secs),
            },
            agent: AgentConfig {
                model,
                prompt,
                keep_assistant_turn: overrides.keep_assistant_turn
                    || file.agent.keep_assistant_turn,
            },
            probes: file.probes,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
