//! Schema inference module
//!
//! Infers a typed, queryable schema from a single semi-structured document
//! whose same-named fields may drift in shape between occurrences.
//!
//! # Features
//!
//! - **Union Info**: Collects every subfield seen under each bare field name
//! - **Sample Merging**: Collapses arrays of objects into one superset sample
//! - **Type Building**: Depth-bounded, cached construction of composite types
//! - **Assembly**: Root type, fallback field and name validation
//!
//! Fields carry a resolution strategy instead of data; values are fetched
//! from the document only when a field is resolved.

mod assembler;
mod builder;
mod merge;
mod sdl;
mod types;
mod union;

pub use assembler::SchemaAssembler;
pub use builder::{TypeBuilder, TypeCache};
pub use merge::merge_samples;
pub use types::{
    FieldDescriptor, Located, ObjectType, Resolution, ScalarKind, Schema, SchemaOptions,
    TypeNamer, TypeRef, DEFAULT_FALLBACK_FIELD, DEFAULT_MAX_DEPTH, DEFAULT_ROOT_TYPE_NAME,
    DEFAULT_TYPE_NAME_SUFFIX,
};
pub use union::UnionRegistry;
