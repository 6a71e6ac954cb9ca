//! Service configuration
//!
//! A `ServiceConfig` names the document source, the refresh interval and the
//! schema options. It is loaded from YAML (JSON is accepted too, being a YAML
//! subset).
//!
//! ```yaml
//! source:
//!   type: http
//!   url: https://config.internal/app.json
//!   timeout_secs: 10
//!   headers:
//!     Authorization: Bearer abc
//! refresh_interval_secs: 5
//! schema:
//!   max_depth: 10
//!   root_type_name: RootQuery
//! log_level: info
//! ```

use crate::document::{DocumentProvider, FileProvider, HttpProvider, HttpProviderConfig};
use crate::error::{Error, Result};
use crate::schema::{SchemaAssembler, SchemaOptions};
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Top-Level Service Config
// ============================================================================

/// Complete service configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Where the document comes from
    pub source: SourceConfig,

    /// Seconds between rebuild cycles
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Schema inference options
    #[serde(default)]
    pub schema: SchemaOptions,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_refresh_interval_secs() -> u64 {
    5
}

fn default_timeout_secs() -> u64 {
    30
}

impl ServiceConfig {
    /// Config with defaults for everything but the source
    pub fn new(source: SourceConfig) -> Self {
        Self {
            source,
            refresh_interval_secs: default_refresh_interval_secs(),
            schema: SchemaOptions::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a config from a YAML or JSON string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            return Err(Error::invalid_value(
                "refresh_interval_secs",
                "must be greater than 0",
            ));
        }

        if self.schema.root_type_name.is_empty() {
            return Err(Error::invalid_value(
                "schema.root_type_name",
                "cannot be empty",
            ));
        }
        if self.schema.fallback_field.is_empty() {
            return Err(Error::invalid_value(
                "schema.fallback_field",
                "cannot be empty",
            ));
        }

        match &self.source {
            SourceConfig::File { path } => {
                if path.as_os_str().is_empty() {
                    return Err(Error::invalid_value("source.path", "cannot be empty"));
                }
            }
            SourceConfig::Http {
                url, timeout_secs, ..
            } => {
                let parsed = url::Url::parse(url)
                    .map_err(|e| Error::invalid_value("source.url", e.to_string()))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(Error::invalid_value(
                        "source.url",
                        format!("unsupported scheme '{}'", parsed.scheme()),
                    ));
                }
                if *timeout_secs == 0 {
                    return Err(Error::invalid_value(
                        "source.timeout_secs",
                        "must be greater than 0",
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn source_description(&self) -> String {
        match &self.source {
            SourceConfig::File { path } => format!("file {}", path.display()),
            SourceConfig::Http { url, .. } => format!("url {url}"),
        }
    }

    /// Provider for the configured source
    pub fn build_provider(&self) -> Result<Arc<dyn DocumentProvider>> {
        self.source.build_provider()
    }

    /// Assembler for the configured schema options
    pub fn build_assembler(&self) -> SchemaAssembler {
        SchemaAssembler::new(self.schema.clone())
    }
}

// ============================================================================
// Document Source
// ============================================================================

/// Document source definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Local file, re-read every cycle
    File { path: PathBuf },

    /// HTTP GET, re-requested every cycle
    Http {
        url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
        #[serde(default)]
        headers: HashMap<String, String>,
    },
}

impl SourceConfig {
    pub fn build_provider(&self) -> Result<Arc<dyn DocumentProvider>> {
        match self {
            SourceConfig::File { path } => Ok(Arc::new(FileProvider::new(path))),
            SourceConfig::Http {
                url,
                timeout_secs,
                headers,
            } => {
                let mut config =
                    HttpProviderConfig::new(url).timeout(Duration::from_secs(*timeout_secs));
                for (key, value) in headers {
                    config = config.header(key, value);
                }
                Ok(Arc::new(HttpProvider::new(config)?))
            }
        }
    }
}
