//! Services module
//!
//! The admin console wiring: one list controller per record kind over a
//! shared store, cross-kind lookups, dashboard statistics and login.

pub mod auth;
pub mod dashboard;

// Re-export commonly used services
pub use auth::{AuthService, Session};
pub use dashboard::{CourseCapacity, DashboardSummary, KindSummary};

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ConsoleConfig;
use crate::controller::{Clock, EntityListController, LoadOutcome};
use crate::database::{DocumentStore, RecordGateway};
use crate::models::{Course, Entity, EntityKind, Exam, Instructor, License, Record, Student};
use crate::utils::errors::Result;

/// Every record screen of the console over one injected store
pub struct AdminConsole {
    store: Arc<dyn DocumentStore>,
    pub students: EntityListController<Student>,
    pub courses: EntityListController<Course>,
    pub instructors: EntityListController<Instructor>,
    pub exams: EntityListController<Exam>,
    pub licenses: EntityListController<License>,
}

impl AdminConsole {
    /// Create the console's controllers, all sharing `store` and `clock`
    pub fn new(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        config: &ConsoleConfig,
    ) -> Self {
        let seed = config.seed_on_load_failure;
        Self {
            students: controller(&store, &clock, seed),
            courses: controller(&store, &clock, seed),
            instructors: controller(&store, &clock, seed),
            exams: controller(&store, &clock, seed),
            licenses: controller(&store, &clock, seed),
            store,
        }
    }

    /// Load every listing, one after another
    pub async fn load_all(&mut self) -> Vec<(EntityKind, LoadOutcome)> {
        let outcomes = vec![
            (EntityKind::Student, self.students.load().await),
            (EntityKind::Course, self.courses.load().await),
            (EntityKind::Instructor, self.instructors.load().await),
            (EntityKind::Exam, self.exams.load().await),
            (EntityKind::License, self.licenses.load().await),
        ];

        let warnings = outcomes.iter().filter(|(_, o)| o.warning().is_some()).count();
        if warnings > 0 {
            warn!(warnings = warnings, "Some listings could not be loaded from the store");
        } else {
            info!("All listings loaded");
        }
        outcomes
    }

    /// Students enrolled in the course with `course_code`, read from the store
    pub async fn students_in_course(&self, course_code: &str) -> Result<Vec<Record<Student>>> {
        Ok(self
            .students
            .gateway()
            .find_by_field("course_code", course_code.trim())
            .await?)
    }

    /// Licenses held by the person with `national_id`, read from the store
    pub async fn licenses_for_holder(&self, national_id: &str) -> Result<Vec<Record<License>>> {
        Ok(self
            .licenses
            .gateway()
            .find_by_field("holder_national_id", national_id.trim())
            .await?)
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::from_console(self)
    }

    /// Whether the store answers
    pub async fn health_check(&self) -> bool {
        match self.store.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Record store health check failed");
                false
            }
        }
    }
}

fn controller<E: Entity>(
    store: &Arc<dyn DocumentStore>,
    clock: &Arc<dyn Clock>,
    seed_on_load_failure: bool,
) -> EntityListController<E> {
    EntityListController::new(RecordGateway::new(Arc::clone(store)), Arc::clone(clock))
        .with_seed_fallback(seed_on_load_failure)
}
