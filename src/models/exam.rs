//! Exam model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record};
use crate::validation::{Validator, Violations};

status_enum! {
    ExamStatus {
        #[default]
        Upcoming => "upcoming",
        Ongoing => "ongoing",
        Finished => "finished",
        Cancelled => "cancelled",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub title: String,
    pub exam_date: Option<NaiveDate>,
    pub location: String,
    pub license_class: String,
    pub max_participants: i64,
    pub registered_participants: i64,
    pub status: ExamStatus,
    pub description: Option<String>,
}

impl Entity for Exam {
    const KIND: EntityKind = EntityKind::Exam;

    fn display_name(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.location, &self.license_class]
    }

    fn status_label(&self) -> &'static str {
        self.status.label()
    }

    fn status_domain() -> Vec<&'static str> {
        ExamStatus::ALL.iter().map(|s| s.label()).collect()
    }

    fn validate(&self, _today: NaiveDate) -> Violations {
        let mut v = Validator::new();

        v.require_text("title", &self.title);
        v.require_date("exam date", self.exam_date);
        v.require_text("location", &self.location);
        v.require_text("license class", &self.license_class);

        v.positive("max participants", self.max_participants);
        v.non_negative("registered participants", self.registered_participants);
        if self.max_participants > 0 {
            v.at_most(
                "registered participants",
                self.registered_participants,
                "max participants",
                self.max_participants,
            );
        }

        v.finish()
    }

    fn seed() -> Vec<Record<Self>> {
        const CENTER: &str = "Trung tâm sát hạch lái xe Hà Nội";
        fn exam(
            id: &str,
            title: &str,
            day: (i32, u32, u32),
            class: &str,
            max_participants: i64,
            registered: i64,
            status: ExamStatus,
        ) -> Record<Exam> {
            Record::local(id, Exam {
                title: title.to_string(),
                exam_date: NaiveDate::from_ymd_opt(day.0, day.1, day.2),
                location: CENTER.to_string(),
                license_class: class.to_string(),
                max_participants,
                registered_participants: registered,
                status,
                description: None,
            })
        }

        vec![
            exam(
                "1001",
                "Kỳ thi sát hạch B1 tháng 6/2023",
                (2023, 6, 15),
                "B1",
                30,
                30,
                ExamStatus::Finished,
            ),
            exam(
                "1002",
                "Kỳ thi sát hạch A1 tháng 6/2023",
                (2023, 6, 20),
                "A1",
                45,
                45,
                ExamStatus::Finished,
            ),
            exam(
                "1003",
                "Kỳ thi sát hạch B2 tháng 7/2023",
                (2023, 7, 10),
                "B2",
                30,
                25,
                ExamStatus::Ongoing,
            ),
            exam(
                "1004",
                "Kỳ thi sát hạch A2 tháng 7/2023",
                (2023, 7, 15),
                "A2",
                40,
                35,
                ExamStatus::Upcoming,
            ),
            exam(
                "1005",
                "Kỳ thi sát hạch B1 tháng 8/2023",
                (2023, 8, 5),
                "B1",
                30,
                0,
                ExamStatus::Upcoming,
            ),
        ]
    }
}
