//! Document types
//!
//! Structural addressing of positions inside a document, and the
//! decoded document handed over by a provider.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of a structural path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object member by name
    Field(String),
    /// Array element by position
    Index(usize),
}

impl PathSegment {
    /// Field name, if this is a field segment
    pub fn as_field(&self) -> Option<&str> {
        match self {
            PathSegment::Field(name) => Some(name),
            PathSegment::Index(_) => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{name}"),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Ordered sequence of field names and array indices, from the document
/// root down to the position being evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// Create an empty (root) path
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a path from segments
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Return a new path extended with one segment
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Append a segment in place
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Parses dotted notation (`items.0.tier`). Purely numeric parts become
/// indices; everything else is a field name.
impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::root());
        }

        s.split('.')
            .map(|part| {
                if part.is_empty() {
                    return Err(Error::Other(format!("Empty segment in path '{s}'")));
                }
                Ok(match part.parse::<usize>() {
                    Ok(index) => PathSegment::Index(index),
                    Err(_) => PathSegment::Field(part.to_string()),
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

/// A document as returned by a provider for one rebuild cycle
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Decoded tree
    pub value: JsonValue,
    /// Bytes the tree was decoded from
    pub raw: Bytes,
}

impl FetchedDocument {
    /// Decode raw bytes into a document. The root must be a JSON object.
    pub fn decode(raw: impl Into<Bytes>) -> Result<Self> {
        let raw = raw.into();
        let value: JsonValue = serde_json::from_slice(&raw)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

        if !value.is_object() {
            return Err(Error::decode(format!(
                "Document root must be a JSON object, found {}",
                kind_name(&value)
            )));
        }

        Ok(Self { value, raw })
    }
}

/// Human-readable name of a value's variant
pub fn kind_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
