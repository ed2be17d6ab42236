//! In-memory document store
//!
//! Keeps collections in insertion order behind a `tokio` read/write lock.
//! Used for the `memory` store backend and throughout the test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::gateway::{Document, DocumentStore, Fields};
use crate::utils::errors::{StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id).cloned()))
    }

    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        let now = Utc::now();
        let id = Uuid::new_v4().simple().to_string();
        let document = Document {
            id: id.clone(),
            created_at: now,
            updated_at: now,
            data: fields,
        };

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| StoreError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        document.data.extend(fields);
        document.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        if let Some(docs) = self.collections.write().await.get_mut(collection) {
            docs.retain(|doc| doc.id != id);
        }
        Ok(())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| doc.data.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let store = MemoryDocumentStore::new();
        let id = store.create("students", fields(json!({"full_name": "A"}))).await.unwrap();
        assert!(!id.is_empty());

        let doc = store.get("students", &id).await.unwrap().unwrap();
        assert_eq!(doc.id, id);
        assert_eq!(doc.created_at, doc.updated_at);
        assert_eq!(doc.data["full_name"], "A");
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = MemoryDocumentStore::new();
        assert!(store.get("students", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_and_touches_timestamp() {
        let store = MemoryDocumentStore::new();
        let id = store
            .create("courses", fields(json!({"name": "B1", "fee": 10})))
            .await
            .unwrap();
        store.update("courses", &id, fields(json!({"fee": 20}))).await.unwrap();

        let doc = store.get("courses", &id).await.unwrap().unwrap();
        assert_eq!(doc.data["name"], "B1");
        assert_eq!(doc.data["fee"], 20);
        assert!(doc.updated_at >= doc.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_fails() {
        let store = MemoryDocumentStore::new();
        let err = store.update("courses", "ghost", Fields::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::DocumentNotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_and_delete() {
        let store = MemoryDocumentStore::new();
        let a = store.create("exams", fields(json!({"title": "a"}))).await.unwrap();
        let b = store.create("exams", fields(json!({"title": "b"}))).await.unwrap();
        let c = store.create("exams", fields(json!({"title": "c"}))).await.unwrap();

        let ids: Vec<String> = store
            .list("exams")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![a.clone(), b.clone(), c.clone()]);

        store.delete("exams", &b).await.unwrap();
        store.delete("exams", "missing").await.unwrap();
        assert_eq!(store.count("exams").await, 2);
    }

    #[tokio::test]
    async fn test_find_by_field() {
        let store = MemoryDocumentStore::new();
        store.create("students", fields(json!({"course_code": "B1"}))).await.unwrap();
        store.create("students", fields(json!({"course_code": "A1"}))).await.unwrap();
        store.create("students", fields(json!({"course_code": "B1"}))).await.unwrap();

        let found = store
            .find_by_field("students", "course_code", &json!("B1"))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }
}
