//! CLI commands and argument parsing

use crate::types::LogLevel;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Infer a typed schema from a JSON document and keep it in sync
#[derive(Parser, Debug)]
#[command(name = "driftschema")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Output format for JSON results
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the schema inferred from a document
    Infer {
        #[command(flatten)]
        source: SourceArgs,

        /// Schema rendering
        #[arg(long, default_value = "sdl")]
        schema_format: SchemaFormat,

        /// Nesting depth beyond which values are typed as String
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Resolve a dotted path (e.g. `items.0.tier`) through the inferred schema
    Resolve {
        /// Path to resolve
        path: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Rebuild the schema on an interval until interrupted
    Watch {
        /// Service config file (YAML)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Validate a service config file
    ValidateConfig {
        /// Service config file (YAML)
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Document source for one-shot commands
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// JSON document file
    #[arg(short, long, conflicts_with = "url")]
    pub document: Option<PathBuf>,

    /// URL to GET the JSON document from
    #[arg(short, long)]
    pub url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON (one message per line)
    Json,
    /// Indented JSON
    Pretty,
}

/// Schema rendering for `infer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemaFormat {
    /// GraphQL-style type definitions
    Sdl,
    /// Schema structure as JSON
    Json,
}
