//! Configuration loading and resolution
//!
//! Each setting resolves in priority order:
//! 1. Command-line argument (handled by the service binary)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! A missing config file is not an error: the service starts on defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable holding the remote model API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the remote model base URL
pub const BASE_URL_ENV: &str = "EMOVIZ_LLM_BASE_URL";

/// Compiled defaults used when no other tier provides a value
pub struct CompiledDefaults;

impl CompiledDefaults {
    pub const HOST: &'static str = "127.0.0.1";
    pub const PORT: u16 = 5000;
    pub const LLM_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const CLASSIFY_MODEL: &'static str = "gpt-4";
    pub const REPLY_MODEL: &'static str = "gpt-3.5-turbo";
    pub const TIMEOUT_SECS: u64 = 30;
    pub const LOG_LEVEL: &'static str = "info";
}

/// On-disk TOML configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Log filter level from `[logging]`, falling back to the compiled default.
    /// Read before tracing is initialized, ahead of [`ServiceConfig::resolve`].
    pub fn log_level(&self) -> &str {
        self.logging
            .level
            .as_deref()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or(CompiledDefaults::LOG_LEVEL)
    }
}

/// `[llm]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub classify_model: Option<String>,
    pub reply_model: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing filter directive, e.g. "info" or "emoviz_es=debug"
    pub level: Option<String>,
}

/// Values supplied on the command line (or through clap's env fallback)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Remote language-model connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteModelConfig {
    /// None disables the remote path entirely
    pub api_key: Option<String>,
    pub base_url: String,
    pub classify_model: String,
    pub reply_model: String,
    pub timeout: Duration,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub llm: RemoteModelConfig,
}

impl ServiceConfig {
    /// Merge command-line overrides, environment and TOML file into a config
    pub fn resolve(overrides: ConfigOverrides, file: TomlConfig) -> Self {
        let host = overrides
            .host
            .or(file.host)
            .unwrap_or_else(|| CompiledDefaults::HOST.to_string());
        let port = overrides.port.or(file.port).unwrap_or(CompiledDefaults::PORT);

        let api_key = resolve_api_key(file.llm.api_key.as_deref());
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or(file.llm.base_url)
            .unwrap_or_else(|| CompiledDefaults::LLM_BASE_URL.to_string());

        Self {
            host,
            port,
            llm: RemoteModelConfig {
                api_key,
                base_url: base_url.trim_end_matches('/').to_string(),
                classify_model: file
                    .llm
                    .classify_model
                    .unwrap_or_else(|| CompiledDefaults::CLASSIFY_MODEL.to_string()),
                reply_model: file
                    .llm
                    .reply_model
                    .unwrap_or_else(|| CompiledDefaults::REPLY_MODEL.to_string()),
                timeout: Duration::from_secs(
                    file.llm.timeout_secs.unwrap_or(CompiledDefaults::TIMEOUT_SECS),
                ),
            },
        }
    }

    /// "host:port" string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Resolve the remote model API key: ENV first, then TOML
///
/// Blank keys are treated as absent.
pub fn resolve_api_key(toml_key: Option<&str>) -> Option<String> {
    let env_key = std::env::var(API_KEY_ENV).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_key.filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "API key found in both {} and TOML config. Using environment variable.",
            API_KEY_ENV
        );
    }

    if let Some(key) = env_key {
        info!("Remote model API key loaded from environment variable");
        return Some(key.trim().to_string());
    }
    if let Some(key) = toml_key {
        info!("Remote model API key loaded from TOML config");
        return Some(key.trim().to_string());
    }

    warn!("No remote model API key configured. Emotion detection will use the inferential classifier.");
    None
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Platform config file location: `<config_dir>/emoviz/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("emoviz").join("config.toml"))
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load the config file
///
/// An explicitly requested file must exist and parse. Without one, the
/// platform default location is tried and silently skipped when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        info!("Loading config file: {}", path.display());
        return load_toml_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            info!("Loading config file: {}", path.display());
            load_toml_config(&path)
        }
        Some(path) => {
            warn!("Config file not found at {}, using defaults", path.display());
            Ok(TomlConfig::default())
        }
        None => {
            warn!("Could not determine config directory, using defaults");
            Ok(TomlConfig::default())
        }
    }
}
