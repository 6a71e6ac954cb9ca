//! Lazy field resolution
//!
//! Schema fields hold a [`Resolution`](crate::schema::Resolution) strategy;
//! this module executes it against a document when a query asks for the
//! field.
//!
//! - scalar paths yield the leaf coerced to the field's kind, or null
//! - object paths yield the sub-object as fetched, or null
//! - array paths yield the list, or an empty list

mod resolver;
mod types;

pub use resolver::PathResolver;
pub use types::{coerce_scalar, Resolved};

#[cfg(test)]
mod tests;
