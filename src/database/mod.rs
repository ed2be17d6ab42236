//! Database module
//!
//! This module holds the record store gateway and its backends

pub mod connection;
pub mod gateway;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::utils::errors::Result;

// Re-export commonly used database components
pub use connection::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use gateway::{Document, DocumentStore, Fields, RecordGateway};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Open the configured store backend
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory record store");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        StoreBackend::Postgres => {
            info!("Connecting to PostgreSQL record store...");
            let pool = create_pool(&DatabaseConfig::from(config)).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
    }
}
