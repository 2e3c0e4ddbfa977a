//! TOML configuration parsing.
//!
//! The config file is optional: when the path passed via `--config` does not
//! exist, [`Config::default`] is used and the bundled datasets are served.
//! A file that exists must parse and validate.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub camera: CameraConfig,
}

/// Where the four topic datasets come from.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoaderKind {
    Embedded,
    Filesystem,
    Http,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_loader")]
    pub loader: LoaderKind,
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_fallback_embedded")]
    pub fallback_embedded: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            loader: default_loader(),
            dir: default_data_dir(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
            fallback_embedded: default_fallback_embedded(),
        }
    }
}

fn default_loader() -> LoaderKind {
    LoaderKind::Embedded
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_fallback_embedded() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct VoiceConfig {
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Speech-to-text argv. `{lang}` in any argument is substituted.
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            command: None,
        }
    }
}

fn default_lang() -> String {
    "en-IN".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CameraConfig {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.data.timeout_secs == 0 {
        anyhow::bail!("data.timeout_secs must be > 0");
    }

    if config.data.loader == LoaderKind::Http {
        match config.data.base_url.as_deref() {
            Some(url) if !url.trim().is_empty() => {}
            _ => anyhow::bail!("data.base_url must be set when loader is 'http'"),
        }
    }

    if let Some(cmd) = &config.voice.command {
        if cmd.is_empty() {
            anyhow::bail!("voice.command must not be empty; omit it to disable voice input");
        }
    }

    Ok(config)
}
