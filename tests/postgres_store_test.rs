//! PostgreSQL document store tests
//!
//! These need Docker (or `TEST_DATABASE_URL`) and are ignored by default:
//! `cargo test -- --ignored`.

mod helpers;

use std::sync::Arc;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use serial_test::serial;

use DriveDesk::database::{DocumentStore, RecordGateway};
use DriveDesk::models::{Course, CourseStatus};
use DriveDesk::utils::errors::StoreError;

fn fields(value: serde_json::Value) -> DriveDesk::database::Fields {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_document_lifecycle() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");
    let store = db.store();
    store.health_check().await.expect("healthy");

    let first = store
        .create("students", fields(json!({"full_name": "A", "course_code": "B1"})))
        .await
        .unwrap();
    let second = store
        .create("students", fields(json!({"full_name": "B", "course_code": "A1"})))
        .await
        .unwrap();
    assert_ne!(first, second);

    let listed = store.list("students").await.unwrap();
    let listed_ids: Vec<&str> = listed.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(listed_ids, vec![first.as_str(), second.as_str()]);
    assert!(store.list("courses").await.unwrap().is_empty());

    store
        .update("students", &first, fields(json!({"course_code": "A1"})))
        .await
        .unwrap();
    let updated = store.get("students", &first).await.unwrap().expect("exists");
    assert_eq!(updated.data["full_name"], "A");
    assert_eq!(updated.data["course_code"], "A1");
    assert!(updated.updated_at >= updated.created_at);

    let in_a1 = store.find_by_field("students", "course_code", &json!("A1")).await.unwrap();
    assert_eq!(in_a1.len(), 2);

    let missing = store.update("students", "nope", fields(json!({}))).await;
    assert_matches!(missing, Err(StoreError::DocumentNotFound { .. }));

    store.delete("students", &first).await.unwrap();
    store.delete("students", &first).await.unwrap();
    assert!(store.get("students", &first).await.unwrap().is_none());
    assert_eq!(store.count("students").await.unwrap(), 1);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_typed_gateway_round_trip() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");
    let gateway: RecordGateway<Course> = RecordGateway::new(Arc::new(db.store()));

    let course = valid_course();
    let id = gateway.create(&course).await.unwrap();

    let mut changed = course.clone();
    changed.status = CourseStatus::Ongoing;
    gateway.update(&id, &changed).await.unwrap();

    let stored = gateway.get_by_id(&id).await.unwrap().expect("stored");
    assert_eq!(stored.fields, changed);
    assert!(stored.created_at.is_some());

    let upcoming = gateway.find_by_field("status", "ongoing").await.unwrap();
    assert_eq!(upcoming.len(), 1);
}
