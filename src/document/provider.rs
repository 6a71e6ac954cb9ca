//! Document providers
//!
//! Each rebuild cycle calls [`DocumentProvider::fetch`] exactly once. A
//! failed fetch aborts that cycle only.

use super::types::FetchedDocument;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Source of the document a schema is inferred from
#[async_trait]
pub trait DocumentProvider: Send + Sync {
    /// Fetch and decode the current document
    async fn fetch(&self) -> Result<FetchedDocument>;

    /// Short description used in logs and errors
    fn describe(&self) -> String;
}

// ============================================================================
// File Provider
// ============================================================================

/// Re-reads a JSON file on every fetch
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentProvider for FileProvider {
    async fn fetch(&self) -> Result<FetchedDocument> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: self.path.display().to_string(),
                }
            } else {
                Error::fetch(self.describe(), e.to_string())
            }
        })?;

        debug!("Read {} bytes from {}", raw.len(), self.path.display());
        FetchedDocument::decode(raw)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

// ============================================================================
// HTTP Provider
// ============================================================================

/// Configuration for [`HttpProvider`]
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Document URL
    pub url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Extra request headers
    pub headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl HttpProviderConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            headers: HashMap::new(),
            user_agent: format!("driftschema/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a request header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Fetches the document with a GET request on every fetch
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: Client,
    config: HttpProviderConfig,
}

impl HttpProvider {
    pub fn new(config: HttpProviderConfig) -> Result<Self> {
        url::Url::parse(&config.url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }
}

#[async_trait]
impl DocumentProvider for HttpProvider {
    async fn fetch(&self) -> Result<FetchedDocument> {
        let mut req = self.client.get(&self.config.url);
        for (key, value) in &self.config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let raw = response.bytes().await?;
        debug!("Fetched {} bytes from {}", raw.len(), self.config.url);
        FetchedDocument::decode(raw)
    }

    fn describe(&self) -> String {
        format!("url {}", self.config.url)
    }
}

// ============================================================================
// Static Provider
// ============================================================================

/// Serves in-memory contents that can be replaced between cycles
#[derive(Debug)]
pub struct StaticProvider {
    contents: RwLock<std::result::Result<Bytes, String>>,
}

impl StaticProvider {
    pub fn new(raw: impl Into<Bytes>) -> Self {
        Self {
            contents: RwLock::new(Ok(raw.into())),
        }
    }

    /// Serve the serialized form of a JSON value
    pub fn from_value(value: &JsonValue) -> Self {
        Self::new(value.to_string())
    }

    /// Replace the served contents
    pub async fn set(&self, raw: impl Into<Bytes>) {
        *self.contents.write().await = Ok(raw.into());
    }

    /// Replace the served contents with a JSON value
    pub async fn set_value(&self, value: &JsonValue) {
        self.set(value.to_string()).await;
    }

    /// Make subsequent fetches fail until contents are set again
    pub async fn set_unavailable(&self, message: impl Into<String>) {
        *self.contents.write().await = Err(message.into());
    }
}

#[async_trait]
impl DocumentProvider for StaticProvider {
    async fn fetch(&self) -> Result<FetchedDocument> {
        let contents = self.contents.read().await;
        match &*contents {
            Ok(raw) => FetchedDocument::decode(raw.clone()),
            Err(message) => Err(Error::fetch(self.describe(), message.clone())),
        }
    }

    fn describe(&self) -> String {
        "static document".to_string()
    }
}
