//! Dashboard statistics
//!
//! Counts computed from the controllers' current listings; nothing here
//! touches the store.

use serde::Serialize;

use crate::models::{CourseStatus, EntityKind, ExamStatus};
use super::AdminConsole;

/// Totals for one record kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindSummary {
    pub kind: EntityKind,
    pub total: usize,
    pub by_status: Vec<(&'static str, usize)>,
}

/// Seats offered by courses, split by course status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseCapacity {
    pub total: i64,
    pub ongoing: i64,
    pub upcoming: i64,
    pub finished: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub kinds: Vec<KindSummary>,
    pub course_capacity: CourseCapacity,
    /// Candidates registered for exams not yet finished or cancelled
    pub pending_exam_candidates: i64,
}

impl DashboardSummary {
    pub fn from_console(console: &AdminConsole) -> Self {
        let kinds = vec![
            KindSummary {
                kind: EntityKind::Student,
                total: console.students.len(),
                by_status: console.students.status_counts(),
            },
            KindSummary {
                kind: EntityKind::Course,
                total: console.courses.len(),
                by_status: console.courses.status_counts(),
            },
            KindSummary {
                kind: EntityKind::Instructor,
                total: console.instructors.len(),
                by_status: console.instructors.status_counts(),
            },
            KindSummary {
                kind: EntityKind::Exam,
                total: console.exams.len(),
                by_status: console.exams.status_counts(),
            },
            KindSummary {
                kind: EntityKind::License,
                total: console.licenses.len(),
                by_status: console.licenses.status_counts(),
            },
        ];

        let mut course_capacity = CourseCapacity::default();
        for course in console.courses.records().iter().map(|r| &r.fields) {
            course_capacity.total += course.max_students;
            match course.status {
                CourseStatus::Ongoing => course_capacity.ongoing += course.max_students,
                CourseStatus::Upcoming => course_capacity.upcoming += course.max_students,
                CourseStatus::Finished => course_capacity.finished += course.max_students,
            }
        }

        let pending_exam_candidates = console
            .exams
            .records()
            .iter()
            .filter(|r| matches!(r.fields.status, ExamStatus::Upcoming | ExamStatus::Ongoing))
            .map(|r| r.fields.registered_participants)
            .sum();

        Self {
            kinds,
            course_capacity,
            pending_exam_candidates,
        }
    }

    pub fn kind(&self, kind: EntityKind) -> Option<&KindSummary> {
        self.kinds.iter().find(|summary| summary.kind == kind)
    }
}
