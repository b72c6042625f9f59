//! Configuration loaded once at startup.
//!
//! A `config.toml` with `api_key` and `model` is required; everything else
//! has defaults. The config is constructed once and passed by reference into
//! the orchestrator — no ambient globals.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV_VAR: &str = "KAWARABAN_API_KEY";

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_news_path() -> PathBuf {
    PathBuf::from("data/news.tsv")
}

fn default_max_tool_turns() -> usize {
    crate::api::DEFAULT_MAX_TOOL_TURNS
}

fn default_language() -> String {
    "en-US".to_string()
}

/// Config from `~/.kawaraban/config.toml` (or a path given on the CLI).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_news_path")]
    pub news_path: PathBuf,
    #[serde(default = "default_max_tool_turns")]
    pub max_tool_turns: usize,
    /// Session language used for spoken replies, e.g. "en-US" or "es-MX".
    #[serde(default = "default_language")]
    pub language: String,
}

impl Config {
    /// Load from a toml file, then apply the API-key environment override.
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(io::Error::new(
                    ErrorKind::NotFound,
                    format!(
                        "Config file not found at {}. Please create config.toml with api_key and model",
                        path.display()
                    ),
                ));
            }
            Err(e) => return Err(e),
        };

        let mut config = Self::from_toml(&content)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, format!("Failed to parse {}: {}", path.display(), e)))?;
        config.override_api_key(std::env::var(API_KEY_ENV_VAR).ok());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn override_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key
            && !key.is_empty()
        {
            self.api_key = key;
        }
    }

    /// Default config location: `~/.kawaraban/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs_next::home_dir()
            .map(|home| home.join(".kawaraban").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
