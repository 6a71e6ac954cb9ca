// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # driftschema
//!
//! Infers a typed query schema from an arbitrary, schema-less JSON document
//! and keeps it in sync as the document drifts.
//!
//! ## Features
//!
//! - **Union-aware inference**: every sub-field ever seen under a key ends up
//!   in that key's type, across all occurrences in the document
//! - **Array merging**: heterogeneous object arrays are merged into one
//!   element type
//! - **Bounded depth**: nesting beyond the depth ceiling is typed as `String`
//! - **Tolerant resolution**: missing paths resolve to null (or an empty list)
//!   instead of failing the query
//! - **Atomic publication**: schema and document are swapped as one pair on
//!   every refresh
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use driftschema::{FileProvider, SchemaAssembler, SchemaService};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> driftschema::Result<()> {
//!     let provider = Arc::new(FileProvider::new("config.json"));
//!     let service = Arc::new(SchemaService::new(provider, SchemaAssembler::default()));
//!     let handle = service.handle();
//!
//!     let task = service.spawn(Duration::from_secs(5));
//!
//!     // Take one generation per query and resolve every field through it
//!     let generation = handle.require().await?;
//!     let tier = generation.resolve(&"items.0.tier".parse()?)?;
//!     println!("{}", generation.schema.to_sdl());
//!
//!     task.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     SchemaService (refresh loop)                 │
//! │   fetch → assemble → publish Generation { schema, document }     │
//! └──────────────────────────────────────────────────────────────────┘
//!          │                     │                        │
//! ┌────────┴────────┬────────────┴───────────┬────────────┴─────────┐
//! │    Document     │        Schema          │      Resolve         │
//! ├─────────────────┼────────────────────────┼──────────────────────┤
//! │ File provider   │ Union registry         │ Path resolver        │
//! │ HTTP provider   │ Sample merge           │ Scalar coercion      │
//! │ Static provider │ Type builder + cache   │ Null-tolerant lookup │
//! │ Field paths     │ Assembler + SDL        │                      │
//! └─────────────────┴────────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Documents, field paths and document providers
pub mod document;

/// Schema model and inference
pub mod schema;

/// Path resolution against a document
pub mod resolve;

/// Published generations and the refresh loop
pub mod service;

/// Service configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{ServiceConfig, SourceConfig};
pub use document::{
    DocumentProvider, FetchedDocument, FieldPath, FileProvider, HttpProvider, HttpProviderConfig,
    PathSegment, StaticProvider,
};
pub use resolve::{PathResolver, Resolved};
pub use schema::{Schema, SchemaAssembler, SchemaOptions};
pub use service::{Generation, RefreshTask, SchemaHandle, SchemaService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
