//! Union info collection
//!
//! A full-document scan recording, per bare field name, every subfield ever
//! observed under an object-valued occurrence of that name. The type builder
//! consults it so that every occurrence of a name gets the superset of
//! subfields, whichever occurrence happens to be built first.
//!
//! Given
//!
//! ```text
//! {
//!   "parents": [
//!     { "address": { "city": "NY", "phone": "123" } },
//!     { "address": { "city": "NY", "street": "Main St" } }
//!   ],
//!   "address": { "city": "NY", "geo": { "lat": 1.0 } }
//! }
//! ```
//!
//! the `address` bucket holds `city`, `geo` (object), `phone` and `street`.
//!
//! Keys are bare names, not paths: unrelated fields that share a name anywhere
//! in the document land in the same bucket.

use crate::types::{JsonObject, JsonValue};
use serde::Serialize;
use std::collections::BTreeMap;

/// Bare key -> subfield -> "ever seen as a nested object"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnionRegistry {
    entries: BTreeMap<String, BTreeMap<String, bool>>,
}

impl UnionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a whole document
    pub fn collect(document: &JsonValue) -> Self {
        let mut registry = Self::new();
        registry.visit(document);
        registry
    }

    /// Visit a node and everything below it
    pub fn visit(&mut self, node: &JsonValue) {
        match node {
            JsonValue::Object(map) => {
                for (key, value) in map {
                    if let JsonValue::Object(sub) = value {
                        self.record(key, sub);
                    }
                    self.visit(value);
                }
            }
            JsonValue::Array(items) => {
                for item in items {
                    self.visit(item);
                }
            }
            _ => {}
        }
    }

    fn record(&mut self, key: &str, sub: &JsonObject) {
        let bucket = self.entries.entry(key.to_string()).or_default();
        for (sub_key, sub_value) in sub {
            let is_object = bucket.entry(sub_key.clone()).or_insert(false);
            // never downgraded once set
            *is_object |= sub_value.is_object();
        }
    }

    /// Subfields recorded under a bare key
    pub fn subfields(&self, key: &str) -> Option<&BTreeMap<String, bool>> {
        self.entries.get(key)
    }

    /// Whether `sub_key` was ever seen as an object under `key`
    pub fn is_object(&self, key: &str, sub_key: &str) -> bool {
        self.entries
            .get(key)
            .and_then(|bucket| bucket.get(sub_key))
            .copied()
            .unwrap_or(false)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of bare keys with a bucket
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
