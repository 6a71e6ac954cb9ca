//! Document module
//!
//! The semi-structured input a schema is inferred from.
//!
//! # Overview
//!
//! - `FieldPath` / `PathSegment` - structural addresses into a document
//! - `FetchedDocument` - decoded tree plus the raw bytes it came from
//! - `DocumentProvider` - one fetch per rebuild cycle (file, HTTP, in-memory)

mod provider;
mod types;

pub use provider::{
    DocumentProvider, FileProvider, HttpProvider, HttpProviderConfig, StaticProvider,
};
pub use types::{kind_name, FetchedDocument, FieldPath, PathSegment};
