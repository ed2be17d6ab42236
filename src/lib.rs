//! DriveDesk
//!
//! Back-office records console for a driving school. This library provides
//! the record models and their validation rules, a generic list controller
//! that mediates create/edit/view/delete and search for each record kind,
//! and the gateway to the document store that persists them.

#![allow(non_snake_case)]

pub mod config;
pub mod controller;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{DriveDeskError, Result};

// Re-export main components for easy access
pub use controller::{Draft, EntityListController, FormMode};
pub use database::{DocumentStore, MemoryDocumentStore, RecordGateway};
pub use models::{Entity, EntityKind, Record};
pub use services::AdminConsole;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
