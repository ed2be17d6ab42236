//! Record store gateway
//!
//! The boundary to the external document database. [`DocumentStore`] is the
//! untyped, object-safe collection API every backend implements;
//! [`RecordGateway`] shapes requests for one entity kind on top of it.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::models::{Entity, Record};
use crate::utils::errors::{StoreError, StoreResult};
use crate::utils::logging::log_store_operation;

/// Field map of a document, without identifier or timestamps
pub type Fields = Map<String, Value>;

/// A stored document as returned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub data: Fields,
}

/// Generic CRUD over named collections.
///
/// Identifiers are generated by the store on `create`; `create` and
/// `update` stamp server timestamps. `get` reports a missing document as
/// `None`. Updating a missing document fails; deleting one does not.
/// Failures are returned unchanged: no retries, batching or caching.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String>;

    /// Merge `fields` into the existing document
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Documents whose top-level `field` equals `value`
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>>;

    async fn health_check(&self) -> StoreResult<()>;
}

/// Typed CRUD for one entity kind
pub struct RecordGateway<E> {
    store: Arc<dyn DocumentStore>,
    _kind: PhantomData<fn() -> E>,
}

impl<E> Clone for RecordGateway<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _kind: PhantomData,
        }
    }
}

impl<E: Entity> RecordGateway<E> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    fn collection(&self) -> &'static str {
        E::KIND.collection()
    }

    /// Fetch every record of this kind
    pub async fn list(&self) -> StoreResult<Vec<Record<E>>> {
        let started = Instant::now();
        let result = self.store.list(self.collection()).await;
        self.timed("list", started, result.is_ok());
        result?
            .into_iter()
            .map(|doc| self.decode(doc))
            .collect()
    }

    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Record<E>>> {
        let started = Instant::now();
        let result = self.store.get(self.collection(), id).await;
        self.timed("get", started, result.is_ok());
        result?.map(|doc| self.decode(doc)).transpose()
    }

    /// Persist a new record, returning the identifier the store assigned
    pub async fn create(&self, fields: &E) -> StoreResult<String> {
        let started = Instant::now();
        let result = self.store.create(self.collection(), encode(fields)?).await;
        self.timed("create", started, result.is_ok());
        result
    }

    pub async fn update(&self, id: &str, fields: &E) -> StoreResult<()> {
        let started = Instant::now();
        let result = self.store.update(self.collection(), id, encode(fields)?).await;
        self.timed("update", started, result.is_ok());
        result
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let started = Instant::now();
        let result = self.store.delete(self.collection(), id).await;
        self.timed("delete", started, result.is_ok());
        result
    }

    /// Records whose `field` equals `value`, e.g. students of one course
    pub async fn find_by_field(
        &self,
        field: &str,
        value: impl Into<Value>,
    ) -> StoreResult<Vec<Record<E>>> {
        let value = value.into();
        let started = Instant::now();
        let result = self.store.find_by_field(self.collection(), field, &value).await;
        self.timed("find_by_field", started, result.is_ok());
        result?
            .into_iter()
            .map(|doc| self.decode(doc))
            .collect()
    }

    fn timed(&self, operation: &str, started: Instant, success: bool) {
        let elapsed = started.elapsed().as_millis() as u64;
        log_store_operation(operation, self.collection(), elapsed, success);
    }

    fn decode(&self, doc: Document) -> StoreResult<Record<E>> {
        let fields: E = serde_json::from_value(Value::Object(doc.data)).map_err(|e| {
            StoreError::MalformedDocument {
                collection: self.collection().to_string(),
                id: doc.id.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Record {
            id: doc.id,
            created_at: Some(doc.created_at),
            updated_at: Some(doc.updated_at),
            fields,
        })
    }
}

/// Serialize entity fields into a document field map
fn encode<E: Entity>(fields: &E) -> StoreResult<Fields> {
    match serde_json::to_value(fields)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::MalformedDocument {
            collection: E::KIND.collection().to_string(),
            id: String::new(),
            reason: format!("expected an object, got {}", other),
        }),
    }
}
