//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, SchemaFormat, SourceArgs};
use crate::config::ServiceConfig;
use crate::document::{DocumentProvider, FieldPath, FileProvider, HttpProvider, HttpProviderConfig};
use crate::error::{Error, Result, ResultExt};
use crate::schema::{SchemaAssembler, SchemaOptions};
use crate::service::SchemaService;
use crate::types::LogLevel;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
    /// Service config for commands that take one, loaded once up front
    config: Option<ServiceConfig>,
}

impl Runner {
    /// Create a new runner, loading and validating the config file if the
    /// command names one
    pub fn new(cli: Cli) -> Result<Self> {
        let config = match &cli.command {
            Commands::Watch { config } | Commands::ValidateConfig { config } => {
                Some(ServiceConfig::from_file(config)?)
            }
            _ => None,
        };
        Ok(Self { cli, config })
    }

    /// Level to log at when `RUST_LOG` is unset: the `--log-level` flag,
    /// else the config file's `log_level` for commands that take one.
    pub fn log_level(&self) -> LogLevel {
        self.cli
            .log_level
            .or_else(|| self.config.as_ref().map(|c| c.log_level))
            .unwrap_or_default()
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Infer {
                source,
                schema_format,
                max_depth,
            } => self.infer(source, *schema_format, *max_depth).await,
            Commands::Resolve { path, source } => self.resolve(source, path).await,
            Commands::Watch { .. } => self.watch(self.loaded_config()?).await,
            Commands::ValidateConfig { .. } => self.validate_config(self.loaded_config()?),
        }
    }

    fn loaded_config(&self) -> Result<&ServiceConfig> {
        self.config
            .as_ref()
            .ok_or_else(|| Error::missing_field("--config"))
    }

    /// Build the provider named by the source arguments
    fn provider(source: &SourceArgs) -> Result<Arc<dyn DocumentProvider>> {
        match (&source.document, &source.url) {
            (Some(path), None) => Ok(Arc::new(FileProvider::new(path))),
            (None, Some(url)) => {
                let config = HttpProviderConfig::new(url)
                    .timeout(Duration::from_secs(source.timeout_secs));
                Ok(Arc::new(HttpProvider::new(config)?))
            }
            (None, None) => Err(Error::missing_field("--document or --url")),
            (Some(_), Some(_)) => Err(Error::config(
                "Specify exactly one document source (--document or --url)",
            )),
        }
    }

    /// Print the inferred schema
    async fn infer(
        &self,
        source: &SourceArgs,
        format: SchemaFormat,
        max_depth: Option<usize>,
    ) -> Result<()> {
        let mut options = SchemaOptions::default();
        if let Some(max_depth) = max_depth {
            options.max_depth = max_depth;
        }

        let service = SchemaService::new(Self::provider(source)?, SchemaAssembler::new(options));
        let generation = service.rebuild().await?;

        match format {
            SchemaFormat::Sdl => print!("{}", generation.schema.to_sdl()),
            SchemaFormat::Json => self.output_message(&serde_json::to_value(&generation.schema)?),
        }

        Ok(())
    }

    /// Resolve one path against the document through its schema
    async fn resolve(&self, source: &SourceArgs, path: &str) -> Result<()> {
        let path: FieldPath = path
            .parse()
            .with_context(|| format!("Invalid path '{path}'"))?;

        let service = SchemaService::new(Self::provider(source)?, SchemaAssembler::default());
        let generation = service.rebuild().await?;
        let located = generation.schema.locate(&path)?;
        let resolved = generation.resolve(&path)?;

        self.output_message(&json!({
            "path": path.to_string(),
            "type": located.ty.to_string(),
            "value": resolved.into_value()
        }));

        Ok(())
    }

    /// Run the refresh loop until Ctrl-C
    async fn watch(&self, config: &ServiceConfig) -> Result<()> {
        let service = Arc::new(SchemaService::new(
            config.build_provider()?,
            config.build_assembler(),
        ));
        let handle = service.handle();

        info!(
            "Watching {} every {}s",
            config.source_description(),
            config.refresh_interval_secs
        );
        let task = service.spawn(config.refresh_interval());

        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;
        task.stop().await;

        if let Some(generation) = handle.current().await {
            self.output_message(&serde_json::to_value(generation.summary())?);
        }

        Ok(())
    }

    /// Report a validated config
    fn validate_config(&self, config: &ServiceConfig) -> Result<()> {
        self.output_message(&json!({
            "valid": true,
            "source": config.source_description(),
            "refresh_interval_secs": config.refresh_interval_secs,
            "max_depth": config.schema.max_depth
        }));

        Ok(())
    }

    /// Output a message in the configured format
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
