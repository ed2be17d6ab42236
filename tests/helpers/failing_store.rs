//! A document store whose reads and writes can be switched off
//!
//! Wraps the in-memory store; while a switch is on, the matching calls
//! return [`StoreError::Unavailable`] without touching the inner store.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use DriveDesk::database::{Document, DocumentStore, Fields, MemoryDocumentStore};
use DriveDesk::utils::errors::{StoreError, StoreResult};

#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryDocumentStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes_attempted: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Create, update and delete calls received, failed or not
    pub fn writes_attempted(&self) -> usize {
        self.writes_attempted.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> StoreResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read switched off".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> StoreResult<()> {
        self.writes_attempted.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write switched off".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.check_read()?;
        self.inner.list(collection).await
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.check_read()?;
        self.inner.get(collection, id).await
    }

    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        self.check_write()?;
        self.inner.create(collection, fields).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        self.check_write()?;
        self.inner.update(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.check_write()?;
        self.inner.delete(collection, id).await
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        self.check_read()?;
        self.inner.find_by_field(collection, field, value).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.check_read()?;
        self.inner.health_check().await
    }
}
