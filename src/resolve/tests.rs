//! Resolution tests

use super::*;
use crate::document::FieldPath;
use crate::schema::{Resolution, ScalarKind};
use serde_json::{json, Value};
use test_case::test_case;

fn path(dotted: &str) -> FieldPath {
    dotted.parse().unwrap()
}

fn document() -> Value {
    json!({
        "user": {
            "name": "John",
            "age": 41,
            "address": {"city": "New York", "zip": 10001}
        },
        "items": [
            {"tier": "A", "x": 1},
            {"tier": "B", "y": 2}
        ],
        "years": {"2024": {"total": 7}},
        "tags": ["a", "b"],
        "empty": []
    })
}

// ============================================================================
// Locate Tests
// ============================================================================

#[test]
fn test_locate_nested_field() {
    let doc = document();
    let resolver = PathResolver::new(&doc);

    assert_eq!(resolver.locate(&path("user.address.city")), Some(&json!("New York")));
    assert_eq!(resolver.locate(&path("items.1.tier")), Some(&json!("B")));
    assert_eq!(resolver.locate(&path("years.2024.total")), Some(&json!(7)));
}

#[test]
fn test_locate_root_is_document() {
    let doc = document();
    assert_eq!(PathResolver::new(&doc).locate(&FieldPath::root()), Some(&doc));
}

#[test]
fn test_locate_missing() {
    let doc = document();
    let resolver = PathResolver::new(&doc);

    assert_eq!(resolver.locate(&path("user.phone")), None);
    assert_eq!(resolver.locate(&path("items.5.tier")), None);
    assert_eq!(resolver.locate(&path("user.name.first")), None);
    assert_eq!(resolver.locate(&path("tags.x")), None);
}

// ============================================================================
// Strategy Tests
// ============================================================================

#[test]
fn test_scalar_resolution() {
    let doc = document();
    let resolver = PathResolver::new(&doc);

    assert_eq!(
        resolver.scalar(&path("user.name"), ScalarKind::String),
        Resolved::Scalar(json!("John"))
    );
    assert_eq!(
        resolver.scalar(&path("user.age"), ScalarKind::Float),
        Resolved::Scalar(json!(41))
    );
    assert_eq!(
        resolver
            .scalar(&path("user.address.zip"), ScalarKind::String)
            .as_scalar(),
        Some(&json!("10001"))
    );
    assert!(resolver
        .scalar(&path("user.nickname"), ScalarKind::String)
        .as_scalar()
        .is_none());
}

#[test]
fn test_heterogeneous_elements_resolve_null() {
    let doc = document();
    let resolver = PathResolver::new(&doc);

    assert!(resolver.scalar(&path("items.0.y"), ScalarKind::Float).is_null());
    assert!(resolver.scalar(&path("items.1.x"), ScalarKind::Float).is_null());
    assert_eq!(
        resolver.scalar(&path("items.1.y"), ScalarKind::Float),
        Resolved::Scalar(json!(2))
    );
}

#[test]
fn test_object_resolution_fetches_fresh_copy() {
    let doc = document();
    let resolved = PathResolver::new(&doc).object(&path("user.address"));

    let map = resolved.as_object().unwrap();
    assert_eq!(map.get("city"), Some(&json!("New York")));
    assert_eq!(map.len(), 2);
}

#[test]
fn test_object_resolution_missing_or_wrong_shape() {
    let doc = document();
    let resolver = PathResolver::new(&doc);

    assert_eq!(resolver.object(&path("user.employer")), Resolved::Null);
    assert_eq!(resolver.object(&path("user.name")), Resolved::Null);
}

#[test]
fn test_array_resolution() {
    let doc = document();
    let resolver = PathResolver::new(&doc);

    assert_eq!(resolver.array(&path("tags")).as_list().unwrap().len(), 2);
    assert_eq!(resolver.array(&path("empty")), Resolved::List(vec![]));
    assert_eq!(resolver.array(&path("missing")), Resolved::List(vec![]));
    assert_eq!(resolver.array(&path("user")), Resolved::List(vec![]));
}

#[test]
fn test_resolve_dispatches_on_strategy() {
    let doc = document();
    let resolver = PathResolver::new(&doc);

    assert!(matches!(
        resolver.resolve(Resolution::Object, &path("user")),
        Resolved::Object(_)
    ));
    assert!(matches!(
        resolver.resolve(Resolution::Array, &path("items")),
        Resolved::List(_)
    ));
    assert_eq!(resolver.resolve(Resolution::Null, &path("user.name")), Resolved::Null);
}

#[test]
fn test_repeated_resolution_sees_same_value() {
    let doc = document();
    let resolver = PathResolver::new(&doc);
    let first = resolver.scalar(&path("items.0.tier"), ScalarKind::String);
    let second = resolver.scalar(&path("items.0.tier"), ScalarKind::String);
    assert_eq!(first, second);
}

// ============================================================================
// Coercion Tests
// ============================================================================

#[test_case(json!("text"), ScalarKind::String, Some(json!("text")) ; "string stays string")]
#[test_case(json!(10001), ScalarKind::String, Some(json!("10001")) ; "number as string")]
#[test_case(json!(true), ScalarKind::String, Some(json!("true")) ; "bool as string")]
#[test_case(json!({"a": 1}), ScalarKind::String, Some(json!("{\"a\":1}")) ; "object as json text")]
#[test_case(json!(1.5), ScalarKind::Float, Some(json!(1.5)) ; "float stays float")]
#[test_case(json!(" 2.5 "), ScalarKind::Float, Some(json!(2.5)) ; "numeric string as float")]
#[test_case(json!("abc"), ScalarKind::Float, None ; "non numeric string")]
#[test_case(json!(true), ScalarKind::Float, Some(json!(1.0)) ; "bool as float")]
#[test_case(json!([1]), ScalarKind::Float, None ; "list as float")]
#[test_case(json!(false), ScalarKind::Boolean, Some(json!(false)) ; "bool stays bool")]
#[test_case(json!(0), ScalarKind::Boolean, Some(json!(false)) ; "zero as bool")]
#[test_case(json!("true"), ScalarKind::Boolean, Some(json!(true)) ; "string true")]
#[test_case(json!("yes"), ScalarKind::Boolean, None ; "other string as bool")]
#[test_case(Value::Null, ScalarKind::String, None ; "null is absent")]
fn test_coerce_scalar(value: Value, kind: ScalarKind, expected: Option<Value>) {
    assert_eq!(coerce_scalar(&value, kind), expected);
}

#[test]
fn test_resolved_into_value() {
    assert_eq!(Resolved::Null.into_value(), Value::Null);
    assert_eq!(Resolved::List(vec![json!(1)]).into_value(), json!([1]));
    assert_eq!(
        serde_json::to_value(Resolved::Scalar(json!("a"))).unwrap(),
        json!("a")
    );
    assert_eq!(serde_json::to_value(Resolved::Null).unwrap(), Value::Null);
}
