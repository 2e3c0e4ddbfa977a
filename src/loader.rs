//! Pluggable dataset loaders.
//!
//! A [`DatasetLoader`] turns a [`Topic`] into the raw JSON record for that
//! topic. Which loader is used is decided once at startup from the `[data]`
//! config section; the store never knows where its data came from.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │             FallbackLoader               │
//! │  ┌──────────────────┐  ┌──────────────┐  │
//! │  │ primary          │  │ secondary    │  │
//! │  │ Fs / Http        │─▶│ Embedded     │  │
//! │  └──────────────────┘  └──────────────┘  │
//! └──────────────┬───────────────────────────┘
//!                ▼
//!        KnowledgeStore::load()
//! ```
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use anyhow::Result;
//! use offline_advisor::loader::DatasetLoader;
//! use offline_advisor::models::Topic;
//! use serde_json::{json, Value};
//!
//! pub struct FixedLoader;
//!
//! #[async_trait]
//! impl DatasetLoader for FixedLoader {
//!     fn name(&self) -> &str { "fixed" }
//!
//!     async fn load(&self, topic: Topic) -> Result<Value> {
//!         match topic {
//!             Topic::Plants => Ok(json!({ "diseases": [] })),
//!             _ => Ok(json!({})),
//!         }
//!     }
//! }
//! ```

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{DataConfig, LoaderKind};
use crate::models::Topic;

const EMBEDDED_EMERGENCY: &str = include_str!("../data/emergency.json");
const EMBEDDED_HEALTH: &str = include_str!("../data/health.json");
const EMBEDDED_PLANTS: &str = include_str!("../data/plants.json");
const EMBEDDED_WOMEN: &str = include_str!("../data/women.json");

/// A source of topic datasets.
///
/// Implementations may perform I/O. Errors are reported to the caller, which
/// decides how to degrade; the store turns them into empty datasets.
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    /// Short identifier used in logs and `advisor sources` output.
    fn name(&self) -> &str;

    /// Load the JSON record for `topic`.
    async fn load(&self, topic: Topic) -> Result<Value>;
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in loaders
// ═══════════════════════════════════════════════════════════════════════

/// Serves the datasets compiled into the binary.
pub struct EmbeddedLoader;

impl EmbeddedLoader {
    pub fn text(topic: Topic) -> &'static str {
        match topic {
            Topic::Emergency => EMBEDDED_EMERGENCY,
            Topic::Health => EMBEDDED_HEALTH,
            Topic::Plants => EMBEDDED_PLANTS,
            Topic::Women => EMBEDDED_WOMEN,
        }
    }
}

#[async_trait]
impl DatasetLoader for EmbeddedLoader {
    fn name(&self) -> &str {
        "embedded"
    }

    async fn load(&self, topic: Topic) -> Result<Value> {
        serde_json::from_str(Self::text(topic))
            .with_context(|| format!("Bundled dataset '{}' is not valid JSON", topic))
    }
}

/// Reads `<dir>/<topic>.json` from disk.
pub struct FsLoader {
    dir: PathBuf,
}

impl FsLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DatasetLoader for FsLoader {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn load(&self, topic: Topic) -> Result<Value> {
        let path = self.dir.join(topic.file_name());
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dataset: {}", path.display()))
    }
}

/// Fetches `<base_url>/<topic>.json` over HTTP.
pub struct HttpLoader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLoader {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, topic: Topic) -> String {
        format!("{}/{}", self.base_url, topic.file_name())
    }
}

#[async_trait]
impl DatasetLoader for HttpLoader {
    fn name(&self) -> &str {
        "http"
    }

    async fn load(&self, topic: Topic) -> Result<Value> {
        let url = self.url_for(topic);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("Fetching {} returned HTTP {}", url, status);
        }

        resp.json::<Value>()
            .await
            .with_context(|| format!("Response from {} is not valid JSON", url))
    }
}

/// Tries `primary`, then `secondary` when the primary load fails.
pub struct FallbackLoader {
    primary: Box<dyn DatasetLoader>,
    secondary: Box<dyn DatasetLoader>,
    label: String,
}

impl FallbackLoader {
    pub fn new(primary: Box<dyn DatasetLoader>, secondary: Box<dyn DatasetLoader>) -> Self {
        let label = format!("{}+{}", primary.name(), secondary.name());
        Self {
            primary,
            secondary,
            label,
        }
    }
}

#[async_trait]
impl DatasetLoader for FallbackLoader {
    fn name(&self) -> &str {
        &self.label
    }

    async fn load(&self, topic: Topic) -> Result<Value> {
        match self.primary.load(topic).await {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(
                    topic = %topic,
                    loader = self.primary.name(),
                    error = %format!("{:#}", e),
                    "primary load failed, trying {}",
                    self.secondary.name()
                );
                self.secondary.load(topic).await
            }
        }
    }
}

/// Build the loader described by the `[data]` config section.
pub fn build_loader(config: &DataConfig) -> Result<Box<dyn DatasetLoader>> {
    let primary: Box<dyn DatasetLoader> = match config.loader {
        LoaderKind::Embedded => return Ok(Box::new(EmbeddedLoader)),
        LoaderKind::Filesystem => Box::new(FsLoader::new(&config.dir)),
        LoaderKind::Http => {
            let base_url = config
                .base_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("data.base_url must be set for the http loader"))?;
            Box::new(HttpLoader::new(
                base_url,
                Duration::from_secs(config.timeout_secs),
            )?)
        }
    };

    if config.fallback_embedded {
        Ok(Box::new(FallbackLoader::new(primary, Box::new(EmbeddedLoader))))
    } else {
        Ok(primary)
    }
}
