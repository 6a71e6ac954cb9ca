//! Path resolver
//!
//! Fetches values from a document by structural path at evaluation time.
//! Nothing is cached: each call locates its path again. A path that does
//! not exist in the document is never an error.

use super::types::{coerce_scalar, Resolved};
use crate::document::{FieldPath, PathSegment};
use crate::schema::{Resolution, ScalarKind};
use crate::types::JsonValue;

/// Read-only view over one document snapshot
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    document: &'a JsonValue,
}

impl<'a> PathResolver<'a> {
    pub fn new(document: &'a JsonValue) -> Self {
        Self { document }
    }

    /// Value at `path`, if present
    pub fn locate(&self, path: &FieldPath) -> Option<&'a JsonValue> {
        path.segments()
            .iter()
            .try_fold(self.document, |node, segment| match (segment, node) {
                (PathSegment::Field(name), JsonValue::Object(map)) => map.get(name),
                (PathSegment::Index(index), JsonValue::Array(items)) => items.get(*index),
                // numeric-looking object keys, e.g. {"2024": {...}}
                (PathSegment::Index(index), JsonValue::Object(map)) => map.get(&index.to_string()),
                _ => None,
            })
    }

    /// Run a resolution strategy
    pub fn resolve(&self, resolution: Resolution, path: &FieldPath) -> Resolved {
        match resolution {
            Resolution::Scalar(kind) => self.scalar(path, kind),
            Resolution::Object => self.object(path),
            Resolution::Array => self.array(path),
            Resolution::Null => Resolved::Null,
        }
    }

    /// Leaf value at `path` coerced to `kind`, or null
    pub fn scalar(&self, path: &FieldPath, kind: ScalarKind) -> Resolved {
        self.locate(path)
            .and_then(|value| coerce_scalar(value, kind))
            .map_or(Resolved::Null, Resolved::Scalar)
    }

    /// Sub-object at `path`, or null when absent or not an object
    pub fn object(&self, path: &FieldPath) -> Resolved {
        match self.locate(path) {
            Some(JsonValue::Object(map)) => Resolved::Object(map.clone()),
            _ => Resolved::Null,
        }
    }

    /// List at `path`; empty when absent or not a list
    pub fn array(&self, path: &FieldPath) -> Resolved {
        match self.locate(path) {
            Some(JsonValue::Array(items)) => Resolved::List(items.clone()),
            _ => Resolved::List(Vec::new()),
        }
    }
}
