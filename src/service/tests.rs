//! Tests for the schema service

use super::*;
use crate::document::{FieldPath, StaticProvider};
use crate::error::Error;
use crate::resolve::Resolved;
use crate::schema::{SchemaAssembler, SchemaOptions};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn service_for(provider: &Arc<StaticProvider>) -> SchemaService {
    SchemaService::new(provider.clone(), SchemaAssembler::default())
}

fn path(s: &str) -> FieldPath {
    s.parse().unwrap()
}

// ============================================================================
// Handle Tests
// ============================================================================

#[tokio::test]
async fn test_handle_empty_until_published() {
    let handle = SchemaHandle::new();
    assert!(handle.current().await.is_none());
    assert_eq!(handle.generation_number().await, 0);
    assert!(matches!(handle.require().await, Err(Error::NotPublished)));
}

#[tokio::test]
async fn test_held_generation_does_not_block_publish() {
    let provider = Arc::new(StaticProvider::from_value(&json!({"a": 1})));
    let service = service_for(&provider);
    service.rebuild().await.unwrap();

    let held = service.handle().require().await.unwrap();

    provider.set_value(&json!({"b": 2})).await;
    let published = tokio::time::timeout(Duration::from_secs(1), service.rebuild())
        .await
        .expect("publish should not wait on readers")
        .unwrap();

    assert_eq!(published.number, 2);
    assert_eq!(held.number, 1);
    assert_eq!(held.resolve(&path("a")).unwrap(), Resolved::Scalar(json!(1)));
}

// ============================================================================
// Rebuild Tests
// ============================================================================

#[tokio::test]
async fn test_rebuild_publishes_generation() {
    let provider = Arc::new(StaticProvider::from_value(&json!({"name": "svc", "port": 8080})));
    let service = service_for(&provider);

    let generation = service.rebuild().await.unwrap();
    assert_eq!(generation.number, 1);
    assert!(generation.schema.root.field("name").is_some());
    assert!(generation.schema.root.field("port").is_some());

    let handle = service.handle();
    let current = handle.require().await.unwrap();
    assert!(Arc::ptr_eq(&current, &generation));
}

#[tokio::test]
async fn test_rebuild_numbers_increase() {
    let provider = Arc::new(StaticProvider::from_value(&json!({"a": 1})));
    let service = service_for(&provider);

    assert_eq!(service.rebuild().await.unwrap().number, 1);
    assert_eq!(service.rebuild().await.unwrap().number, 2);
    assert_eq!(service.handle().generation_number().await, 2);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_generation() {
    let provider = Arc::new(StaticProvider::from_value(&json!({"a": 1})));
    let service = service_for(&provider);
    service.rebuild().await.unwrap();

    provider.set_unavailable("connection refused").await;
    let err = service.rebuild().await.unwrap_err();
    assert!(err.is_retryable());

    let current = service.handle().require().await.unwrap();
    assert_eq!(current.number, 1);
    assert_eq!(
        current.resolve(&path("a")).unwrap(),
        Resolved::Scalar(json!(1))
    );
}

#[tokio::test]
async fn test_failed_decode_keeps_previous_generation() {
    let provider = Arc::new(StaticProvider::from_value(&json!({"a": 1})));
    let service = service_for(&provider);
    service.rebuild().await.unwrap();

    provider.set("{not json").await;
    assert!(matches!(service.rebuild().await, Err(Error::Decode { .. })));
    assert_eq!(service.handle().generation_number().await, 1);
}

#[tokio::test]
async fn test_failed_assembly_keeps_previous_generation() {
    let provider = Arc::new(StaticProvider::from_value(&json!({"ok": true})));
    let service = service_for(&provider);
    service.rebuild().await.unwrap();

    provider.set_value(&json!({"bad-key": 1})).await;
    assert!(matches!(
        service.rebuild().await,
        Err(Error::InvalidName { .. })
    ));

    // The failed cycle does not consume a generation number
    provider.set_value(&json!({"ok": false})).await;
    assert_eq!(service.rebuild().await.unwrap().number, 2);
}

#[tokio::test]
async fn test_held_generation_is_never_mixed() {
    let provider = Arc::new(StaticProvider::from_value(&json!({"user": {"name": "ada"}})));
    let service = service_for(&provider);
    service.rebuild().await.unwrap();

    let held = service.handle().require().await.unwrap();

    provider.set_value(&json!({"count": 3})).await;
    service.rebuild().await.unwrap();

    // Old snapshot still resolves against its own document and schema
    assert_eq!(
        held.resolve(&path("user.name")).unwrap(),
        Resolved::Scalar(json!("ada"))
    );
    assert!(matches!(
        held.resolve(&path("count")),
        Err(Error::UnknownField { .. })
    ));

    let fresh = service.handle().require().await.unwrap();
    assert_eq!(
        fresh.resolve(&path("count")).unwrap(),
        Resolved::Scalar(json!(3))
    );
    assert!(fresh.schema.root.field("user").is_none());
}

#[tokio::test]
async fn test_rebuild_same_document_same_schema() {
    let document = json!({"items": [{"id": 1}, {"id": 2, "tag": "x"}], "meta": {"v": true}});
    let provider = Arc::new(StaticProvider::from_value(&document));
    let service = service_for(&provider);

    let first = service.rebuild().await.unwrap();
    let second = service.rebuild().await.unwrap();
    assert_eq!(first.schema, second.schema);
    assert_eq!(first.schema.to_sdl(), second.schema.to_sdl());
}

#[tokio::test]
async fn test_rebuild_respects_options() {
    let provider = Arc::new(StaticProvider::from_value(&json!({"a": {"b": {"c": 1}}})));
    let options = SchemaOptions {
        max_depth: 0,
        ..SchemaOptions::default()
    };
    let service = SchemaService::new(provider.clone(), SchemaAssembler::new(options));

    let generation = service.rebuild().await.unwrap();
    assert_eq!(generation.schema.type_count(), 1);
    assert_eq!(
        generation.resolve(&path("a.b")).unwrap(),
        Resolved::Scalar(json!("{\"c\":1}"))
    );
}

#[tokio::test]
async fn test_generation_summary() {
    let provider = Arc::new(StaticProvider::new(r#"{"a": {"b": 1}, "c": "x"}"#));
    let service = service_for(&provider);

    let summary = service.rebuild().await.unwrap().summary();
    assert_eq!(summary.number, 1);
    assert_eq!(summary.root_fields, 2);
    assert_eq!(summary.types, 1);
    assert_eq!(summary.document_bytes, 25);
}

// ============================================================================
// Refresh Loop Tests
// ============================================================================

#[tokio::test]
async fn test_spawn_builds_immediately_and_picks_up_changes() {
    let provider = Arc::new(StaticProvider::from_value(&json!({"a": 1})));
    let service = Arc::new(service_for(&provider));
    let handle = service.handle();

    let task = service.clone().spawn(Duration::from_millis(20));

    let mut published = false;
    for _ in 0..100 {
        if handle.generation_number().await >= 1 {
            published = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(published);

    provider.set_value(&json!({"b": "two"})).await;

    let mut refreshed = false;
    for _ in 0..200 {
        let current = handle.require().await.unwrap();
        if current.schema.root.field("b").is_some() {
            refreshed = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(refreshed);

    task.stop().await;
}

#[tokio::test]
async fn test_spawn_survives_failing_source() {
    let provider = Arc::new(StaticProvider::from_value(&json!({"a": 1})));
    provider.set_unavailable("down").await;
    let service = Arc::new(service_for(&provider));
    let handle = service.handle();

    let task = service.clone().spawn(Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(handle.current().await.is_none());
    assert!(!task.is_finished());

    provider.set_value(&json!({"a": 2})).await;

    let mut recovered = false;
    for _ in 0..200 {
        if handle.current().await.is_some() {
            recovered = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(recovered);

    task.stop().await;
}

#[tokio::test]
async fn test_stop_ends_refresh() {
    let provider = Arc::new(StaticProvider::from_value(&json!({"a": 1})));
    let service = Arc::new(service_for(&provider));
    let handle = service.handle();

    let task = service.clone().spawn(Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(30)).await;
    task.stop().await;

    let stopped_at = handle.generation_number().await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(handle.generation_number().await, stopped_at);
}
