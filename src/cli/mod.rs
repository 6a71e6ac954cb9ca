//! CLI module
//!
//! Command-line interface for inferring schemas and running the refresh loop.
//!
//! # Commands
//!
//! - `infer` - Print the schema inferred from a document (SDL or JSON)
//! - `resolve` - Resolve a dotted path through the inferred schema
//! - `watch` - Rebuild on an interval from a config file until Ctrl-C
//! - `validate-config` - Check a config file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, SchemaFormat, SourceArgs};
pub use runner::Runner;
