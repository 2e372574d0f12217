//! Configuration file management for cram.
//!
//! Provides a TOML-based config file at `~/.config/cram/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use cram_core::openai::{DEFAULT_MODEL, OpenAiClient};

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub openai: OpenAiSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAiSection {
    /// Bearer credential for the completion API.
    pub api_key: String,
    /// Model identifier; defaults to [`DEFAULT_MODEL`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// API root override; defaults to the production endpoint when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the cram config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/cram` or `~/.config/cram`.
/// We intentionally ignore the platform-specific `dirs::config_dir()`
/// (which returns `~/Library/Application Support` on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("cram");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("cram")
}

/// Return the path to the cram config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix since it holds the API key.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct CramConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

impl CramConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - API key: `cli_api_key` > `CRAM_OPENAI_API_KEY` env > `OPENAI_API_KEY` env
    ///   > `config_file.openai.api_key` > error
    /// - Model: `CRAM_OPENAI_MODEL` env > `config_file.openai.model` > [`DEFAULT_MODEL`]
    /// - Base URL: `CRAM_OPENAI_BASE_URL` env > `config_file.openai.base_url` > client default
    pub fn resolve(cli_api_key: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let api_key = if let Some(key) = cli_api_key {
            key.to_string()
        } else if let Ok(key) = std::env::var("CRAM_OPENAI_API_KEY") {
            key
        } else if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            key
        } else if let Some(ref cfg) = file_config {
            cfg.openai.api_key.clone()
        } else {
            bail!(
                "API key not found; set CRAM_OPENAI_API_KEY or run `cram init` to create a config file"
            );
        };

        let model = if let Ok(model) = std::env::var("CRAM_OPENAI_MODEL") {
            model
        } else if let Some(model) = file_config.as_ref().and_then(|c| c.openai.model.clone()) {
            model
        } else {
            DEFAULT_MODEL.to_string()
        };

        let base_url = std::env::var("CRAM_OPENAI_BASE_URL")
            .ok()
            .or_else(|| file_config.as_ref().and_then(|c| c.openai.base_url.clone()));

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }

    /// Build the upstream client from this configuration.
    pub fn build_client(&self) -> Result<OpenAiClient> {
        let client = OpenAiClient::new(&self.api_key, &self.model)
            .context("failed to build completion API client")?;
        Ok(match &self.base_url {
            Some(url) => client.with_base_url(url),
            None => client,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
