//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the DriveDesk application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::models::EntityKind;
use crate::utils::errors::{DriveDeskError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| DriveDeskError::Config(format!("Invalid log filter: {}", e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| DriveDeskError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log record mutations with structured data
pub fn log_record_action(kind: EntityKind, action: &str, record_id: &str) {
    info!(
        kind = %kind,
        action = action,
        record_id = record_id,
        "Record action performed"
    );
}

/// Log a listing that fell back to built-in records
pub fn log_load_fallback(kind: EntityKind, error: &str, seed_count: usize) {
    warn!(
        kind = %kind,
        error = error,
        seed_count = seed_count,
        "Could not load records, showing built-in data"
    );
}

/// Log a failed store write
pub fn log_mutation_failure(kind: EntityKind, action: &str, record_id: Option<&str>, error: &str) {
    error!(
        kind = %kind,
        action = action,
        record_id = record_id,
        error = error,
        "Record store rejected mutation"
    );
}

/// Log record store operations
pub fn log_store_operation(operation: &str, collection: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            collection = collection,
            duration_ms = duration_ms,
            "Store operation completed"
        );
    } else {
        error!(
            operation = operation,
            collection = collection,
            duration_ms = duration_ms,
            "Store operation failed"
        );
    }
}
