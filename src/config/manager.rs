use anyhow::{Context, Result, bail};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{DEFAULT_BASE_URL, DEFAULT_SESSION};
use crate::paths;

/// Environment variable that overrides the configured API base URL.
pub const API_URL_ENV: &str = "QUIP_API_URL";

/// Settings in the `[api]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the chat API, e.g. `http://localhost:8081/api`.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

/// Settings in the `[chat]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Session name used for new conversations.
    pub session: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/quip/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Resolved configuration after merging CLI arguments, environment and
/// config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub session_name: String,
}

/// CLI overrides that take precedence over everything else.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub api_url: Option<String>,
    pub session: Option<String>,
}

/// Resolves configuration.
///
/// Priority, highest first: CLI option, `QUIP_API_URL`, config file,
/// built-in default.
///
/// # Errors
///
/// Returns an error if the base URL is not an http(s) URL, the session name
/// is blank, or the timeout is zero.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let env_url = std::env::var(API_URL_ENV).ok().filter(|v| !v.trim().is_empty());

    let base_url = options
        .api_url
        .clone()
        .or(env_url)
        .or_else(|| config_file.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    validate_base_url(&base_url)?;

    let session_name = options
        .session
        .as_ref()
        .or(config_file.chat.session.as_ref())
        .map_or_else(|| DEFAULT_SESSION.to_string(), |s| s.trim().to_string());

    if session_name.is_empty() {
        bail!(
            "Session name cannot be empty\n\n\
             Pass --session <name> or set [chat] session in ~/.config/quip/config.toml"
        );
    }

    let timeout = match config_file.api.timeout_secs {
        Some(0) => bail!("Invalid configuration: 'timeout_secs' must be greater than 0"),
        Some(secs) => Some(Duration::from_secs(secs)),
        None => None,
    };

    Ok(ResolvedConfig {
        base_url,
        timeout,
        session_name,
    })
}

/// Checks that `base_url` is an absolute http(s) URL.
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let url = Url::parse(base_url).with_context(|| {
        format!(
            "Invalid API URL: '{base_url}'\n\n\
             Expected something like {DEFAULT_BASE_URL}"
        )
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        bail!("Invalid API URL: '{base_url}' (scheme must be http or https)");
    }

    Ok(())
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/quip/config.toml`
    /// or `~/.config/quip/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self {
            config_path: paths::config_dir().join("config.toml"),
        }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        crate::fs::atomic_write(&self.config_path, &contents)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
