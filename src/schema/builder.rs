//! Type construction
//!
//! Turns `(key, sample value)` pairs into field descriptors, recursing into
//! objects and lists up to the depth ceiling.

use super::merge::merge_samples;
use super::types::{
    FieldDescriptor, ObjectType, ScalarKind, SchemaOptions, TypeNamer, TypeRef,
};
use super::union::UnionRegistry;
use crate::types::{JsonObject, JsonValue};
use std::collections::{BTreeMap, BTreeSet};

/// Composite types built during one pass, by name
#[derive(Debug, Default)]
pub struct TypeCache {
    types: BTreeMap<String, ObjectType>,
    /// Names whose type is still being built further up the call stack
    pending: BTreeSet<String>,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a type of this name is built or being built
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name) || self.pending.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&ObjectType> {
        self.types.get(name)
    }

    fn reserve(&mut self, name: &str) {
        self.pending.insert(name.to_string());
    }

    fn insert(&mut self, object: ObjectType) {
        self.pending.remove(&object.name);
        self.types.insert(object.name.clone(), object);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn into_types(self) -> BTreeMap<String, ObjectType> {
        self.types
    }
}

/// Depth-bounded builder for one schema pass
pub struct TypeBuilder<'a> {
    options: &'a SchemaOptions,
    namer: &'a TypeNamer,
    unions: &'a UnionRegistry,
    cache: TypeCache,
}

impl<'a> TypeBuilder<'a> {
    pub fn new(options: &'a SchemaOptions, namer: &'a TypeNamer, unions: &'a UnionRegistry) -> Self {
        Self {
            options,
            namer,
            unions,
            cache: TypeCache::new(),
        }
    }

    /// Build the descriptor for `key` from its sample value
    pub fn build_field(&mut self, key: &str, sample: &JsonValue, depth: usize) -> FieldDescriptor {
        if depth > self.options.max_depth {
            return FieldDescriptor::scalar(key, ScalarKind::String);
        }

        match sample {
            JsonValue::Object(map) => self.build_object_field(key, map, depth),
            JsonValue::Array(items) => self.build_list_field(key, items, depth),
            scalar => FieldDescriptor::scalar(key, ScalarKind::of(scalar)),
        }
    }

    /// Build an object field. The type name depends on `key` alone, so the
    /// first object built for a name is reused for every later occurrence.
    pub fn build_object_field(
        &mut self,
        key: &str,
        sample: &JsonObject,
        depth: usize,
    ) -> FieldDescriptor {
        let type_name = self.namer.name(key);
        if !self.cache.contains(&type_name) {
            let object = self.build_object_type(type_name.clone(), key, sample, depth);
            self.cache.insert(object);
        }
        FieldDescriptor::object(key, type_name)
    }

    fn build_object_type(
        &mut self,
        type_name: String,
        key: &str,
        sample: &JsonObject,
        depth: usize,
    ) -> ObjectType {
        // A nested occurrence of the same key refers back to this type.
        self.cache.reserve(&type_name);

        let unions = self.unions;
        let mut keys: BTreeSet<&str> = sample.keys().map(String::as_str).collect();
        if let Some(bucket) = unions.subfields(key) {
            keys.extend(bucket.keys().map(String::as_str));
        }

        let mut object = ObjectType::new(type_name);
        for sub_key in keys {
            let field = match sample.get(sub_key) {
                Some(value) => self.build_field(sub_key, value, depth + 1),
                None if unions.is_object(key, sub_key) => {
                    self.build_field(sub_key, &JsonValue::Object(JsonObject::new()), depth + 1)
                }
                None => self.build_field(sub_key, &JsonValue::Null, depth + 1),
            };
            object.add_field(field);
        }

        if object.fields.is_empty() {
            object.add_field(FieldDescriptor::fallback(&self.options.fallback_field));
        }

        object
    }

    /// Build a list field. Object elements are merged into one superset
    /// sample; otherwise the first element stands for all of them.
    pub fn build_list_field(&mut self, key: &str, items: &[JsonValue], depth: usize) -> FieldDescriptor {
        let Some(first) = items.first() else {
            return FieldDescriptor::list(key, TypeRef::Scalar(ScalarKind::String));
        };

        let objects: Option<Vec<&JsonObject>> = items.iter().map(JsonValue::as_object).collect();
        let element = match objects {
            Some(objects) => {
                let merged = JsonValue::Object(merge_samples(objects));
                self.build_field(key, &merged, depth + 1)
            }
            None => self.build_field(key, first, depth + 1),
        };

        FieldDescriptor::list(key, element.ty)
    }

    pub fn cache(&self) -> &TypeCache {
        &self.cache
    }

    /// Finish the pass, handing over every composite type built
    pub fn into_types(self) -> BTreeMap<String, ObjectType> {
        self.cache.into_types()
    }
}
