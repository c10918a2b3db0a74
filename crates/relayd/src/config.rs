//! Configuration management for relayd.
//!
//! Loads settings from /etc/relay/config.toml, falling back to the user
//! config directory, then to defaults. API keys are never read from the
//! file - only from the environment.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// System-wide config file path
pub const CONFIG_PATH: &str = "/etc/relay/config.toml";

/// Env var holding the LLM API key (OPENAI_API_KEY accepted as fallback)
pub const LLM_API_KEY_ENV: &str = "RELAY_LLM_API_KEY";

/// Env var holding the enrichment service token
pub const ENRICHMENT_TOKEN_ENV: &str = "RELAY_ENRICHMENT_TOKEN";

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Service title reported by /v1/settings
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub debug: bool,
}

fn default_host() -> String {
    // Localhost only; put a reverse proxy in front for anything else
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7892
}

fn default_title() -> String {
    "Prompt Relay".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            title: default_title(),
            debug: false,
        }
    }
}

/// Hosted LLM API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model for chat completion flows (ICP, prospects, trip plans)
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model for image generation
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_llm_timeout() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            chat_model: default_chat_model(),
            image_model: default_image_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Enrichment service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default = "default_enrichment_base")]
    pub base_url: String,

    #[serde(default = "default_enrichment_timeout")]
    pub timeout_secs: u64,
}

fn default_enrichment_base() -> String {
    "https://icp-builder.lyzr.tools".to_string()
}

fn default_enrichment_timeout() -> u64 {
    30
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            base_url: default_enrichment_base(),
            timeout_secs: default_enrichment_timeout(),
        }
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

impl Config {
    /// Load config from file, or return defaults
    pub fn load() -> Self {
        let mut paths = vec![PathBuf::from(CONFIG_PATH)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("relay").join("config.toml"));
        }

        for path in &paths {
            match Self::load_from_path(path) {
                Ok(config) => return config,
                Err(_) => continue,
            }
        }

        warn!("Config not found, using defaults");
        Config::default()
    }

    /// Load config from specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// LLM API key from environment
    pub fn llm_api_key() -> Option<String> {
        std::env::var(LLM_API_KEY_ENV)
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
    }

    /// Enrichment service token from environment
    pub fn enrichment_token() -> Option<String> {
        std::env::var(ENRICHMENT_TOKEN_ENV).ok()
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.chat_model, "gpt-4o-mini");
        assert_eq!(config.llm.image_model, "dall-e-3");
        assert_eq!(config.server.port, 7892);
        assert_eq!(config.bind_addr(), "127.0.0.1:7892");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
[server]
port = 9000

[llm]
chat_model = "custom-chat"
timeout_secs = 30
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.llm.chat_model, "custom-chat");
        assert_eq!(config.llm.timeout_secs, 30);
        // Defaults for missing fields
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.image_model, "dall-e-3");
        assert_eq!(config.enrichment.base_url, "https://icp-builder.lyzr.tools");
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\ntitle = \"Test Relay\"").unwrap();
        let config = Config::load_from_path(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.server.title, "Test Relay");
        assert_eq!(config.server.port, 7892);
    }

    #[test]
    fn test_load_missing_path_errors() {
        let path = PathBuf::from("/nonexistent/relay/config.toml");
        assert!(Config::load_from_path(&path).is_err());
    }
}
