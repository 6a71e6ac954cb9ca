//! Schema assembly
//!
//! One full rebuild: scan union info, build a field per top-level key,
//! assemble the root type and validate the result. Every call starts from a
//! fresh union registry and type cache.

use super::builder::TypeBuilder;
use super::types::{
    FieldDescriptor, ObjectType, ScalarKind, Schema, SchemaOptions, TypeNamer, TypeRef,
};
use super::union::UnionRegistry;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// Valid type and field names
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").expect("name pattern is valid")
});

/// Builds complete schemas from documents
#[derive(Debug, Clone, Default)]
pub struct SchemaAssembler {
    options: SchemaOptions,
    namer: TypeNamer,
}

impl SchemaAssembler {
    /// Create an assembler; types are named `key + options.type_name_suffix`
    pub fn new(options: SchemaOptions) -> Self {
        let namer = TypeNamer::suffix(options.type_name_suffix.clone());
        Self { options, namer }
    }

    /// Replace the type naming function
    #[must_use]
    pub fn with_type_namer(mut self, namer: TypeNamer) -> Self {
        self.namer = namer;
        self
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// Infer a schema for `document`. A root that is not an object has no
    /// top-level keys and yields only the fallback field.
    pub fn assemble(&self, document: &JsonValue) -> Result<Schema> {
        let unions = UnionRegistry::collect(document);
        let mut builder = TypeBuilder::new(&self.options, &self.namer, &unions);

        let mut root = ObjectType::new(self.options.root_type_name.clone());
        if let Some(map) = document.as_object() {
            for (key, value) in map {
                root.add_field(builder.build_field(key, value, 0));
            }
        }

        if root.fields.is_empty() {
            root.add_field(FieldDescriptor::fallback(&self.options.fallback_field));
        }

        let schema = Schema {
            root,
            types: builder.into_types(),
        };
        self.validate(&schema)?;

        debug!(
            "Assembled schema: {} root fields, {} types, {} union buckets",
            schema.root.fields.len(),
            schema.type_count(),
            unions.len()
        );

        Ok(schema)
    }

    fn validate(&self, schema: &Schema) -> Result<()> {
        let reserved = ScalarKind::builtin_names();

        self.check_name("type", &schema.root.name)?;
        if reserved.contains(&schema.root.name.as_str()) {
            return Err(Error::DuplicateType {
                type_name: schema.root.name.clone(),
            });
        }

        for object in schema.types.values() {
            self.check_name("type", &object.name)?;
            if object.name == schema.root.name || reserved.contains(&object.name.as_str()) {
                return Err(Error::DuplicateType {
                    type_name: object.name.clone(),
                });
            }
        }

        for object in std::iter::once(&schema.root).chain(schema.types.values()) {
            self.check_fields(object, &schema.types)?;
        }

        Ok(())
    }

    fn check_fields(&self, object: &ObjectType, types: &BTreeMap<String, ObjectType>) -> Result<()> {
        for field in object.fields.values() {
            self.check_name("field", &field.name)?;

            if let TypeRef::Object(_) | TypeRef::List(_) = field.ty {
                let named = field.ty.named_type();
                let is_scalar = ScalarKind::builtin_names().contains(&named);
                if !is_scalar && !types.contains_key(named) {
                    return Err(Error::assembly(format!(
                        "Field '{}.{}' refers to undefined type '{named}'",
                        object.name, field.name
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_name(&self, kind: &'static str, name: &str) -> Result<()> {
        if self.options.strict_names && !NAME_PATTERN.is_match(name) {
            return Err(Error::InvalidName {
                kind,
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
