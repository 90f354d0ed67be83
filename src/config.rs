//! Configuration file handling for photo-ascii-bot.
//!
//! Loads configuration from `<config_dir>/photo-ascii-bot/config.toml` or a
//! custom path, then resolves it (together with the environment) into the
//! [`BotSettings`] handed to the bot at startup.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::telegram::{DEFAULT_POLL_TIMEOUT, TELEGRAM_API_BASE_URL};

/// Configuration file structure for photo-ascii-bot.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
pub struct TelegramConfig {
    /// Bot token. `BOT_TOKEN` in the environment takes precedence.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: None,
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory for downloaded photos (default: system temp dir).
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

fn default_poll_timeout_secs() -> u64 {
    DEFAULT_POLL_TIMEOUT.as_secs()
}

/// Fully resolved settings for a bot run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    pub token: String,
    pub api_base_url: String,
    pub poll_timeout: Duration,
    pub temp_dir: PathBuf,
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config = Self::parse(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolve the settings for a bot run.
    ///
    /// `env_token` (normally `BOT_TOKEN`) wins over the file's token.
    /// Blank tokens count as missing.
    pub fn resolve(&self, env_token: Option<String>) -> Result<BotSettings, ConfigError> {
        let token = env_token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                self.telegram
                    .token
                    .clone()
                    .filter(|t| !t.trim().is_empty())
            })
            .ok_or(ConfigError::MissingToken)?;

        Ok(BotSettings {
            token,
            api_base_url: self
                .telegram
                .api_base_url
                .clone()
                .unwrap_or_else(|| TELEGRAM_API_BASE_URL.to_string()),
            poll_timeout: Duration::from_secs(self.telegram.poll_timeout_secs),
            temp_dir: self
                .storage
                .temp_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
        })
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    MissingToken,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::MissingToken => write!(
                f,
                "No bot token configured. Set BOT_TOKEN or [telegram].token in the config file"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::MissingToken => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("photo-ascii-bot").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/photo-ascii-bot/config.toml")
        })
}

/// Template written by `config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# photo-ascii-bot configuration

[telegram]
# Bot token from @BotFather. The BOT_TOKEN environment variable
# (or a .env file) overrides this value.
# token = "123456:ABC-DEF..."
# Bot API server (change for a self-hosted server)
api_base_url = "https://api.telegram.org"
# Long-poll timeout in seconds
poll_timeout_secs = 30

[storage]
# Directory for downloaded photos (default: system temp dir)
# temp_dir = "/tmp"
"#;
