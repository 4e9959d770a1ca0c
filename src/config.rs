//! Configuration management for the IP enrichment pipeline

use crate::error::{IpIntelError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the reputation service API key.
pub const GEO_API_KEY_VAR: &str = "IP_API_KEY";
/// Environment variable holding the language model API key.
pub const LLM_API_KEY_VAR: &str = "CLAUDE_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub directories: DirectoryConfig,
    pub geo: GeoConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directories: DirectoryConfig {
                input_dir: PathBuf::from("data/input"),
                output_dir: PathBuf::from("data/output"),
            },
            geo: GeoConfig {
                endpoint: "https://pro.ip-api.com/json".to_string(),
            },
            llm: LlmConfig {
                endpoint: "https://api.anthropic.com/v1/messages".to_string(),
                model: "claude-3-haiku-20240307".to_string(),
                max_tokens: 1024,
                temperature: 0.0,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path, writing the defaults there on first run.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                IpIntelError::Configuration(format!(
                    "Failed to parse config '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| IpIntelError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ip-intel")
            .join("config.toml")
    }
}

/// API keys for the two external services. Both are required; the pipeline
/// refuses to start without them.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub geo_api_key: String,
    pub llm_api_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials through `lookup`. Every missing variable is
    /// reported in one message so the operator can fix them all at once.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let geo_api_key = lookup(GEO_API_KEY_VAR).filter(|v| !v.trim().is_empty());
        let llm_api_key = lookup(LLM_API_KEY_VAR).filter(|v| !v.trim().is_empty());

        match (geo_api_key, llm_api_key) {
            (Some(geo_api_key), Some(llm_api_key)) => Ok(Self {
                geo_api_key,
                llm_api_key,
            }),
            (geo_api_key, llm_api_key) => {
                let mut missing = Vec::new();
                if geo_api_key.is_none() {
                    missing.push(GEO_API_KEY_VAR);
                }
                if llm_api_key.is_none() {
                    missing.push(LLM_API_KEY_VAR);
                }
                Err(IpIntelError::Configuration(format!(
                    "Missing required environment variables: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}
