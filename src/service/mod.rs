//! Schema service module
//!
//! Owns the rebuild cycle and the published (schema, document) pair.
//!
//! # Overview
//!
//! - `Generation` - one schema plus the document it was built from
//! - `SchemaHandle` - swaps whole generations; readers never lock while resolving
//! - `SchemaService` - fetch, assemble and publish; optional timed refresh
//!
//! A query should take one generation from the handle and resolve every
//! field through it, so it observes either the old pair or the new pair.

mod handle;
mod refresh;
mod types;

pub use handle::SchemaHandle;
pub use refresh::{RefreshTask, SchemaService};
pub use types::{Generation, GenerationSummary};

#[cfg(test)]
mod tests;
