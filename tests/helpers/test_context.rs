//! Test context for unified test setup
//!
//! Builds an [`AdminConsole`] over a [`FailingStore`] with the clock pinned
//! to [`test_today`], so tests can toggle store failures mid-scenario.

use std::sync::{Arc, Once};

use DriveDesk::config::ConsoleConfig;
use DriveDesk::controller::FixedClock;
use DriveDesk::database::{DocumentStore, RecordGateway};
use DriveDesk::models::Entity;
use DriveDesk::{AdminConsole, EntityListController};

use super::failing_store::FailingStore;
use super::test_data::test_today;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

pub struct TestContext {
    pub store: Arc<FailingStore>,
    pub console: AdminConsole,
}

impl TestContext {
    /// Console over an empty, healthy store
    pub fn new() -> Self {
        Self::with_config(ConsoleConfig::default())
    }

    pub fn with_config(config: ConsoleConfig) -> Self {
        init_test_logging();
        let store = Arc::new(FailingStore::new());
        let console = AdminConsole::new(
            store.clone() as Arc<dyn DocumentStore>,
            Arc::new(FixedClock(test_today())),
            &config,
        );
        Self { store, console }
    }
}

/// A single controller over `store`, with the test clock
pub fn controller_over<E: Entity>(store: Arc<FailingStore>) -> EntityListController<E> {
    init_test_logging();
    EntityListController::new(
        RecordGateway::new(store as Arc<dyn DocumentStore>),
        Arc::new(FixedClock(test_today())),
    )
}
