//! Schema types

use crate::document::{FieldPath, PathSegment};
use crate::error::{Error, Result};
use crate::resolve::{PathResolver, Resolved};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Recursion depth past which nested structure collapses to a string field
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Name of the root query type
pub const DEFAULT_ROOT_TYPE_NAME: &str = "RootQuery";

/// Field inserted when a composite type would otherwise have no fields
pub const DEFAULT_FALLBACK_FIELD: &str = "anyField";

/// Suffix appended to a bare key to name its composite type
pub const DEFAULT_TYPE_NAME_SUFFIX: &str = "Object";

// ============================================================================
// Scalars and type references
// ============================================================================

/// Scalar kinds a leaf field can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Float,
    Boolean,
}

impl ScalarKind {
    /// Scalar kind for a sample value. Null and anything composite map to
    /// `String`.
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Number(_) => ScalarKind::Float,
            JsonValue::Bool(_) => ScalarKind::Boolean,
            _ => ScalarKind::String,
        }
    }

    /// Type name as it appears in SDL
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::String => "String",
            ScalarKind::Float => "Float",
            ScalarKind::Boolean => "Boolean",
        }
    }

    /// All built-in scalar type names
    pub fn builtin_names() -> [&'static str; 3] {
        ["String", "Float", "Boolean"]
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference to the type of a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeRef {
    Scalar(ScalarKind),
    /// Composite type, by name
    Object(String),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn list_of(element: TypeRef) -> Self {
        TypeRef::List(Box::new(element))
    }

    /// Name of the composite type this reference points at, if any
    pub fn object_name(&self) -> Option<&str> {
        match self {
            TypeRef::Object(name) => Some(name),
            _ => None,
        }
    }

    /// Innermost named type, unwrapping lists
    pub fn named_type(&self) -> &str {
        match self {
            TypeRef::Scalar(kind) => kind.name(),
            TypeRef::Object(name) => name,
            TypeRef::List(inner) => inner.named_type(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Scalar(kind) => write!(f, "{kind}"),
            TypeRef::Object(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

// ============================================================================
// Fields
// ============================================================================

/// How a field's value is fetched when a query evaluates it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Leaf value at the path, coerced to the kind
    Scalar(ScalarKind),
    /// Sub-object at the path
    Object,
    /// List at the path
    Array,
    /// Always null
    Null,
}

impl Resolution {
    /// Strategy matching a type reference
    pub fn for_type(ty: &TypeRef) -> Self {
        match ty {
            TypeRef::Scalar(kind) => Resolution::Scalar(*kind),
            TypeRef::Object(_) => Resolution::Object,
            TypeRef::List(_) => Resolution::Array,
        }
    }
}

/// Inferred type of one key plus the strategy that resolves it later
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub resolution: Resolution,
}

impl FieldDescriptor {
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            ty: TypeRef::Scalar(kind),
            resolution: Resolution::Scalar(kind),
        }
    }

    pub fn object(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: TypeRef::Object(type_name.into()),
            resolution: Resolution::Object,
        }
    }

    pub fn list(name: impl Into<String>, element: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty: TypeRef::list_of(element),
            resolution: Resolution::Array,
        }
    }

    /// Nullable string field that always resolves to null
    pub fn fallback(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: TypeRef::Scalar(ScalarKind::String),
            resolution: Resolution::Null,
        }
    }

    /// Run this field's resolution hook for `path` against `document`.
    ///
    /// `path` is the path-so-far ending at this field, optionally followed by
    /// list indices; each trailing index steps one list level into the
    /// field's type. Indices deeper than the type's list nesting resolve to
    /// null.
    pub fn resolve(&self, document: &JsonValue, path: &FieldPath) -> Resolved {
        PathResolver::new(document).resolve(self.resolution_at(path), path)
    }

    /// Strategy for the value `path` addresses within this field
    pub fn resolution_at(&self, path: &FieldPath) -> Resolution {
        let segments = path.segments();
        let own = segments
            .iter()
            .rposition(|segment| segment.to_string() == self.name);
        let trailing = match own {
            Some(position) => segments.len() - position - 1,
            None => 0,
        };
        if trailing == 0 {
            return self.resolution;
        }

        let mut ty = &self.ty;
        for _ in 0..trailing {
            match ty {
                TypeRef::List(inner) => ty = inner,
                _ => return Resolution::Null,
            }
        }
        Resolution::for_type(ty)
    }
}

// ============================================================================
// Composite types and schema
// ============================================================================

/// Named composite type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,
    pub fields: BTreeMap<String, FieldDescriptor>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn add_field(&mut self, field: FieldDescriptor) {
        self.fields.insert(field.name.clone(), field);
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

/// A complete inferred schema: the root type plus every composite type
/// reachable from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub root: ObjectType,
    pub types: BTreeMap<String, ObjectType>,
}

/// A field found by walking a path through the schema
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    /// Last field named on the path
    pub field: &'a FieldDescriptor,
    /// Type at the end of the path
    pub ty: &'a TypeRef,
    /// The path ends with list indices after the field
    pub indexed: bool,
}

impl Located<'_> {
    /// Strategy for the value at the end of the path
    pub fn resolution(&self) -> Resolution {
        if self.indexed {
            Resolution::for_type(self.ty)
        } else {
            self.field.resolution
        }
    }
}

impl Schema {
    /// Composite type by name; the root type is included
    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        if name == self.root.name {
            Some(&self.root)
        } else {
            self.types.get(name)
        }
    }

    /// Number of composite types, not counting the root
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Walk `path` from the root type. Field segments select fields of the
    /// current composite type; index segments step into list types. An index
    /// segment on a composite type names a numeric field such as `2024`.
    pub fn locate(&self, path: &FieldPath) -> Result<Located<'_>> {
        let unknown = || Error::unknown_field(path.to_string());

        let mut container = &self.root;
        let mut located: Option<Located<'_>> = None;

        for segment in path.segments() {
            if let (PathSegment::Index(_), Some(current)) = (segment, located) {
                if let TypeRef::List(inner) = current.ty {
                    located = Some(Located {
                        field: current.field,
                        ty: inner,
                        indexed: true,
                    });
                    continue;
                }
            }

            let name: Cow<'_, str> = match segment {
                PathSegment::Field(name) => Cow::Borrowed(name.as_str()),
                PathSegment::Index(index) => Cow::Owned(index.to_string()),
            };
            if let Some(current) = located {
                let type_name = current.ty.object_name().ok_or_else(unknown)?;
                container = self.object_type(type_name).ok_or_else(unknown)?;
            }
            let field = container.field(&name).ok_or_else(unknown)?;
            located = Some(Located {
                field,
                ty: &field.ty,
                indexed: false,
            });
        }

        located.ok_or_else(unknown)
    }

    /// Convert to pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

// ============================================================================
// Options
// ============================================================================

/// Options controlling one schema build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    /// Depth ceiling for the type builder
    pub max_depth: usize,
    /// Name of the root type
    pub root_type_name: String,
    /// Field inserted into types that would otherwise be empty
    pub fallback_field: String,
    /// Suffix used by the default type naming
    pub type_name_suffix: String,
    /// Reject field and type names that are not valid identifiers
    pub strict_names: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            root_type_name: DEFAULT_ROOT_TYPE_NAME.to_string(),
            fallback_field: DEFAULT_FALLBACK_FIELD.to_string(),
            type_name_suffix: DEFAULT_TYPE_NAME_SUFFIX.to_string(),
            strict_names: true,
        }
    }
}

/// Derives a composite type name from a bare key
#[derive(Clone)]
pub struct TypeNamer(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl TypeNamer {
    /// `key` followed by `suffix`
    pub fn suffix(suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        Self(Arc::new(move |key| format!("{key}{suffix}")))
    }

    pub fn custom(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn name(&self, key: &str) -> String {
        (self.0)(key)
    }
}

impl Default for TypeNamer {
    fn default() -> Self {
        Self::suffix(DEFAULT_TYPE_NAME_SUFFIX)
    }
}

impl fmt::Debug for TypeNamer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeNamer").finish_non_exhaustive()
    }
}
