//! SDL rendering

use super::types::{ObjectType, Schema};
use std::fmt::Write;

impl Schema {
    /// Render as GraphQL-style SDL: the schema block, the root type, then
    /// every composite type in name order.
    pub fn to_sdl(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "schema {{\n  query: {}\n}}", self.root.name);

        for object in std::iter::once(&self.root).chain(self.types.values()) {
            out.push('\n');
            render_type(&mut out, object);
        }

        out
    }
}

fn render_type(out: &mut String, object: &ObjectType) {
    let _ = writeln!(out, "type {} {{", object.name);
    for field in object.fields.values() {
        let _ = writeln!(out, "  {}: {}", field.name, field.ty);
    }
    out.push_str("}\n");
}
