//! Test helpers module
//!
//! Shared setup for the integration tests: record builders, a store that
//! can be switched off, a Postgres test database and a console context.

#![allow(dead_code)]

pub mod database_helper;
pub mod failing_store;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use failing_store::*;
pub use test_context::*;
pub use test_data::*;
