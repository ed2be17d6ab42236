//! Error handling for DriveDesk
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;
use crate::models::EntityKind;
use crate::validation::Violations;

/// Main error type for DriveDesk application
#[derive(Error, Debug)]
pub enum DriveDeskError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    Validation(Violations),

    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: EntityKind, id: String },

    #[error("Could not {action} {kind}, please try again")]
    MutationFailed {
        kind: EntityKind,
        action: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised at the record store boundary
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Document {collection}/{id} does not exist")]
    DocumentNotFound { collection: String, id: String },

    #[error("Malformed document {collection}/{id}: {reason}")]
    MalformedDocument { collection: String, id: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for DriveDesk operations
pub type Result<T> = std::result::Result<T, DriveDeskError>;

/// Result type alias for record store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl DriveDeskError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            DriveDeskError::Database(_) => false,
            DriveDeskError::Migration(_) => false,
            DriveDeskError::Store(e) => e.is_transient(),
            DriveDeskError::Config(_) => false,
            DriveDeskError::ConfigLoad(_) => false,
            DriveDeskError::Validation(_) => true,
            DriveDeskError::RecordNotFound { .. } => true,
            DriveDeskError::MutationFailed { .. } => true,
            DriveDeskError::Serialization(_) => false,
            DriveDeskError::Io(_) => true,
            DriveDeskError::Authentication(_) => true,
            DriveDeskError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DriveDeskError::Database(_) => ErrorSeverity::Critical,
            DriveDeskError::Migration(_) => ErrorSeverity::Critical,
            DriveDeskError::Config(_) => ErrorSeverity::Critical,
            DriveDeskError::ConfigLoad(_) => ErrorSeverity::Critical,
            DriveDeskError::Validation(_) => ErrorSeverity::Info,
            DriveDeskError::InvalidInput(_) => ErrorSeverity::Info,
            DriveDeskError::RecordNotFound { .. } => ErrorSeverity::Warning,
            DriveDeskError::Authentication(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

impl StoreError {
    /// Connectivity-style failures that may succeed when the user retries
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Database(_))
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
