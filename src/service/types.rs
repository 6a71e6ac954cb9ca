//! Published generation types

use crate::document::FieldPath;
use crate::error::Result;
use crate::resolve::Resolved;
use crate::schema::Schema;
use crate::types::JsonValue;
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// A schema together with the document it was built from.
///
/// Generations are immutable once built and always published as a whole;
/// resolving through a generation can never mix one document with another
/// document's schema.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Monotonically increasing build number, starting at 1
    pub number: u64,
    pub schema: Schema,
    pub document: JsonValue,
    /// Bytes the document was decoded from
    pub raw: Bytes,
    pub built_at: DateTime<Utc>,
}

impl Generation {
    /// Resolve the value at `path` through the field the path addresses.
    ///
    /// Fails only when the path names a field this schema does not have; a
    /// path missing from the document resolves to null or an empty list.
    pub fn resolve(&self, path: &FieldPath) -> Result<Resolved> {
        let located = self.schema.locate(path)?;
        let resolution = located.resolution();
        Ok(crate::resolve::PathResolver::new(&self.document).resolve(resolution, path))
    }

    /// Summary used for logging and the CLI
    pub fn summary(&self) -> GenerationSummary {
        GenerationSummary {
            number: self.number,
            root_fields: self.schema.root.fields.len(),
            types: self.schema.type_count(),
            document_bytes: self.raw.len(),
            built_at: self.built_at,
        }
    }
}

/// Counts describing one generation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GenerationSummary {
    pub number: u64,
    pub root_fields: usize,
    pub types: usize,
    pub document_bytes: usize,
    pub built_at: DateTime<Utc>,
}
