//! Merging sibling samples
//!
//! Collapses the object elements of one array into a single representative
//! object whose keys are the union of all elements' keys. The result is only
//! used to derive a type, never returned as data.

use crate::types::{JsonObject, JsonValue};
use std::collections::BTreeMap;

/// Deep-merge `samples` in order.
///
/// For each key: a key present in one sample is kept as-is; a key whose
/// values are objects in every sample containing it is merged recursively;
/// otherwise the value from the last sample containing it wins.
pub fn merge_samples<'a, I>(samples: I) -> JsonObject
where
    I: IntoIterator<Item = &'a JsonObject>,
{
    let mut occurrences: BTreeMap<&'a str, Vec<&'a JsonValue>> = BTreeMap::new();
    for sample in samples {
        for (key, value) in sample {
            occurrences.entry(key.as_str()).or_default().push(value);
        }
    }

    occurrences
        .into_iter()
        .filter_map(|(key, values)| merge_values(&values).map(|v| (key.to_string(), v)))
        .collect()
}

fn merge_values(values: &[&JsonValue]) -> Option<JsonValue> {
    let last = values.last()?;
    if values.len() == 1 {
        return Some((*last).clone());
    }

    let nested: Option<Vec<&JsonObject>> = values.iter().map(|v| v.as_object()).collect();
    match nested {
        Some(objects) => Some(JsonValue::Object(merge_samples(objects))),
        None => Some((*last).clone()),
    }
}
