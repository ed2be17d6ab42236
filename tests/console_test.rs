//! Admin console integration tests
//!
//! Loading every listing, the dashboard and the cross-kind lookups.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;

use DriveDesk::config::ConsoleConfig;
use DriveDesk::controller::{LoadOutcome, SubmitOutcome};
use DriveDesk::models::{Entity, EntityKind, Student};
use DriveDesk::DriveDeskError;

#[tokio::test]
async fn test_load_all_from_empty_store() {
    let mut ctx = TestContext::new();
    assert!(ctx.console.health_check().await);

    let outcomes = ctx.console.load_all().await;
    assert_eq!(outcomes.len(), EntityKind::ALL.len());
    for (_, outcome) in &outcomes {
        assert_eq!(outcome, &LoadOutcome::Loaded { count: 0 });
    }
    let summary = ctx.console.dashboard();
    assert!(summary.kinds.iter().all(|kind| kind.total == 0));
}

#[tokio::test]
async fn test_dashboard_over_seed_data() {
    let mut ctx = TestContext::new();
    ctx.store.set_fail_reads(true);
    assert!(!ctx.console.health_check().await);

    let outcomes = ctx.console.load_all().await;
    assert!(outcomes.iter().all(|(_, o)| matches!(o, LoadOutcome::Fallback { .. })));

    let summary = ctx.console.dashboard();
    let students = summary.kind(EntityKind::Student).expect("student summary");
    assert_eq!(students.total, 5);
    assert_eq!(students.by_status, vec![("not-started", 1), ("in-progress", 3), ("graduated", 1)]);

    let licenses = summary.kind(EntityKind::License).unwrap();
    assert_eq!(licenses.by_status, vec![("pending", 2), ("issued", 3)]);

    assert_eq!(summary.course_capacity.total, 150);
    assert_eq!(summary.course_capacity.ongoing, 75);
    assert_eq!(summary.course_capacity.upcoming, 25);
    assert_eq!(summary.course_capacity.finished, 50);
    assert_eq!(summary.pending_exam_candidates, 60);
}

#[tokio::test]
async fn test_seed_fallback_can_be_disabled() {
    let mut ctx = TestContext::with_config(ConsoleConfig {
        seed_on_load_failure: false,
    });
    ctx.store.set_fail_reads(true);

    for (_, outcome) in ctx.console.load_all().await {
        assert_matches!(outcome, LoadOutcome::Unavailable { .. });
    }
    assert!(ctx.console.students.is_empty());
}

#[tokio::test]
async fn test_students_in_course() {
    let mut ctx = TestContext::new();
    ctx.console.load_all().await;

    for code in ["B1-2024", "B1-2024", "A1-2024"] {
        let mut draft = ctx.console.students.begin_create();
        draft.set_fields(Student {
            course_code: code.to_string(),
            ..valid_student()
        });
        assert_matches!(
            ctx.console.students.submit(draft).await,
            Ok(SubmitOutcome::Created { .. })
        );
    }

    let enrolled = ctx.console.students_in_course(" B1-2024 ").await.unwrap();
    assert_eq!(enrolled.len(), 2);
    assert!(enrolled.iter().all(|r| r.fields.course_code == "B1-2024"));
    assert!(ctx.console.students_in_course("C-2030").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_licenses_for_holder() {
    let mut ctx = TestContext::new();
    ctx.console.load_all().await;

    let license = issued_license();
    let mut draft = ctx.console.licenses.begin_create();
    draft.set_fields(license.clone());
    ctx.console.licenses.submit(draft).await.unwrap();

    let held = ctx.console.licenses_for_holder("001200012345").await.unwrap();
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].fields.display_name(), license.display_name());

    ctx.store.set_fail_reads(true);
    let err = ctx.console.licenses_for_holder("001200012345").await.unwrap_err();
    assert_matches!(err, DriveDeskError::Store(_));
}
