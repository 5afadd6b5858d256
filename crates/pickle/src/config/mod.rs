use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PickleError, Result};

/// Main configuration structure for Pickle
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where memories are kept on disk
    #[serde(default)]
    pub storage: StorageConfig,
    /// HTTP API configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Local answer engine configuration
    #[serde(default)]
    pub answer: AnswerConfig,
    /// Remote LLM answerer configuration
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Config {
    /// Load configuration from an explicit path, or from the first default
    /// location that exists, or fall back to defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            tracing::info!("Loading config from: {}", path.display());
            return Self::from_file(path);
        }

        let default_paths = [
            dirs::home_dir().map(|h| h.join(".pickle").join("config.toml")),
            dirs::config_dir().map(|c| c.join("pickle").join("config.toml")),
            Some(PathBuf::from("config.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PickleError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| PickleError::Config(format!("Failed to parse config: {e}")))?;
        config.storage.data_dir = expand_home(&config.storage.data_dir);
        Ok(config)
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `memories.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".pickle"))
        .unwrap_or_else(|| PathBuf::from(".pickle"))
}

/// Replace a leading `~` with the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:8501")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Request timeout in seconds
    #[serde(default = "default_server_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            timeout_secs: default_server_timeout_secs(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_server_timeout_secs() -> u64 {
    30
}

/// Local answer engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerConfig {
    /// Maximum memories listed for aggregate questions
    #[serde(default = "default_max_list_items")]
    pub max_list_items: usize,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            max_list_items: default_max_list_items(),
        }
    }
}

fn default_max_list_items() -> usize {
    crate::answer::DEFAULT_MAX_LIST_ITEMS
}

/// Remote answerer configuration (any OpenAI-compatible endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Try the remote model before answering locally
    #[serde(default = "default_remote_enabled")]
    pub enabled: bool,
    /// API base URL; `/chat/completions` is appended
    #[serde(default = "default_remote_api_url")]
    pub api_url: String,
    /// Environment variable name for API key
    #[serde(default = "default_remote_api_key_env")]
    pub api_key_env: String,
    /// Model identifier for remote API
    #[serde(default = "default_remote_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_remote_temperature")]
    pub temperature: f32,
    /// Upper bound on answer length
    #[serde(default = "default_remote_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: default_remote_enabled(),
            api_url: default_remote_api_url(),
            api_key_env: default_remote_api_key_env(),
            model: default_remote_model(),
            temperature: default_remote_temperature(),
            max_tokens: default_remote_max_tokens(),
            timeout_secs: default_remote_timeout_secs(),
        }
    }
}

fn default_remote_enabled() -> bool {
    true
}

fn default_remote_api_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_remote_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_remote_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_remote_temperature() -> f32 {
    0.2
}

fn default_remote_max_tokens() -> u32 {
    512
}

fn default_remote_timeout_secs() -> u64 {
    30
}
