//! Course model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record};
use crate::validation::{Validator, Violations};

/// Shortest allowed course, in days from start to end
pub const MIN_COURSE_DAYS: i64 = 7;

status_enum! {
    CourseStatus {
        #[default]
        Upcoming => "upcoming",
        Ongoing => "ongoing",
        Finished => "finished",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub license_class: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_students: i64,
    pub instructors: i64,
    /// Whole currency units
    pub fee: i64,
    pub status: CourseStatus,
    pub description: Option<String>,
}

impl Entity for Course {
    const KIND: EntityKind = EntityKind::Course;

    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.license_class]
    }

    fn status_label(&self) -> &'static str {
        self.status.label()
    }

    fn status_domain() -> Vec<&'static str> {
        CourseStatus::ALL.iter().map(|s| s.label()).collect()
    }

    fn validate(&self, _today: NaiveDate) -> Violations {
        let mut v = Validator::new();

        v.require_text("name", &self.name);
        v.require_text("license class", &self.license_class);
        let start = v.require_date("start date", self.start_date);
        let end = v.require_date("end date", self.end_date);

        v.positive("max students", self.max_students);
        v.positive("instructors", self.instructors);
        v.positive("fee", self.fee);

        if let (Some(start), Some(end)) = (start, end) {
            v.date_span("start date", start, "end date", end, MIN_COURSE_DAYS);
        }

        v.finish()
    }

    fn seed() -> Vec<Record<Self>> {
        fn course(
            id: &str,
            name: &str,
            class: &str,
            start: (i32, u32, u32),
            end: (i32, u32, u32),
            max_students: i64,
            instructors: i64,
            fee: i64,
            status: CourseStatus,
        ) -> Record<Course> {
            Record::local(id, Course {
                name: name.to_string(),
                license_class: class.to_string(),
                start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2),
                end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2),
                max_students,
                instructors,
                fee,
                status,
                description: None,
            })
        }

        vec![
            course(
                "101",
                "Khóa đào tạo lái xe hạng B1",
                "B1",
                (2023, 6, 1),
                (2023, 7, 30),
                35,
                2,
                15_000_000,
                CourseStatus::Ongoing,
            ),
            course(
                "102",
                "Khóa đào tạo lái xe hạng A1",
                "A1",
                (2023, 6, 15),
                (2023, 7, 15),
                40,
                2,
                2_500_000,
                CourseStatus::Ongoing,
            ),
            course(
                "103",
                "Khóa đào tạo lái xe hạng B2",
                "B2",
                (2023, 8, 1),
                (2023, 9, 15),
                25,
                3,
                18_000_000,
                CourseStatus::Upcoming,
            ),
            course(
                "104",
                "Khóa đào tạo lái xe hạng A2",
                "A2",
                (2023, 4, 1),
                (2023, 5, 15),
                30,
                1,
                4_000_000,
                CourseStatus::Finished,
            ),
            course(
                "105",
                "Khóa đào tạo lái xe hạng C",
                "C",
                (2023, 4, 15),
                (2023, 6, 30),
                20,
                2,
                22_000_000,
                CourseStatus::Finished,
            ),
        ]
    }
}
