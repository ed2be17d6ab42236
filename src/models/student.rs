//! Student model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record};
use crate::validation::{Validator, Violations};

/// Minimum age to enrol, in whole years
pub const MIN_STUDENT_AGE: i32 = 18;

/// Minimum length of a national identity number
pub const MIN_NATIONAL_ID_LEN: usize = 9;

status_enum! {
    /// Training progress of a student
    StudentStatus {
        #[default]
        NotStarted => "not-started",
        InProgress => "in-progress",
        Graduated => "graduated",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: String,
    pub address: String,
    pub national_id: String,
    pub course_code: String,
    pub status: StudentStatus,
}

impl Entity for Student {
    const KIND: EntityKind = EntityKind::Student;

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.full_name, &self.phone, &self.national_id]
    }

    fn status_label(&self) -> &'static str {
        self.status.label()
    }

    fn status_domain() -> Vec<&'static str> {
        StudentStatus::ALL.iter().map(|s| s.label()).collect()
    }

    fn validate(&self, today: NaiveDate) -> Violations {
        let mut v = Validator::new();

        v.require_text("full name", &self.full_name);
        let date_of_birth = v.require_date("date of birth", self.date_of_birth);
        let phone = v.require_text("phone", &self.phone);
        v.require_text("address", &self.address);
        let national_id = v.require_text("national id", &self.national_id);
        v.require_text("course", &self.course_code);

        if let Some(dob) = date_of_birth {
            v.minimum_age("date of birth", dob, today, MIN_STUDENT_AGE);
        }
        if let Some(phone) = phone {
            v.phone("phone", phone);
        }
        if let Some(national_id) = national_id {
            v.min_chars("national id", national_id, MIN_NATIONAL_ID_LEN);
        }

        v.finish()
    }

    fn seed() -> Vec<Record<Self>> {
        fn student(
            id: &str,
            name: &str,
            dob: (i32, u32, u32),
            phone: &str,
            address: &str,
            national_id: &str,
            course: &str,
            status: StudentStatus,
        ) -> Record<Student> {
            Record::local(id, Student {
                full_name: name.to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2),
                phone: phone.to_string(),
                address: address.to_string(),
                national_id: national_id.to_string(),
                course_code: course.to_string(),
                status,
            })
        }

        vec![
            student(
                "1",
                "Nguyễn Văn A",
                (1990, 1, 1),
                "0901234567",
                "Hà Nội",
                "001090000001",
                "B1",
                StudentStatus::InProgress,
            ),
            student(
                "2",
                "Trần Thị B",
                (1992, 3, 2),
                "0912345678",
                "TP.HCM",
                "079192000002",
                "A1",
                StudentStatus::InProgress,
            ),
            student(
                "3",
                "Lê Văn C",
                (1985, 5, 10),
                "0923456789",
                "Đà Nẵng",
                "048085000003",
                "B2",
                StudentStatus::Graduated,
            ),
            student(
                "4",
                "Phạm Thị D",
                (1995, 8, 15),
                "0934567890",
                "Cần Thơ",
                "092195000004",
                "A2",
                StudentStatus::InProgress,
            ),
            student(
                "5",
                "Hoàng Văn E",
                (1988, 12, 20),
                "0945678901",
                "Hải Phòng",
                "031088000005",
                "C",
                StudentStatus::NotStarted,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ViolationKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_student() -> Student {
        Student {
            full_name: "Nguyễn Văn A".to_string(),
            date_of_birth: Some(date(1990, 1, 1)),
            phone: "0901234567".to_string(),
            address: "Hà Nội".to_string(),
            national_id: "001090000001".to_string(),
            course_code: "B1".to_string(),
            status: StudentStatus::InProgress,
        }
    }

    #[test]
    fn test_valid_student_passes() {
        assert!(valid_student().validate(date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_blank_draft_reports_every_required_field() {
        let violations = Student::default().validate(date(2024, 1, 1));
        let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec!["full name", "date of birth", "phone", "address", "national id", "course"]
        );
        assert!(violations.iter().all(|v| v.kind == ViolationKind::Missing));
    }

    #[test]
    fn test_age_boundary_at_eighteen() {
        let today = date(2024, 6, 15);
        let mut student = valid_student();

        student.date_of_birth = Some(date(2006, 6, 16));
        assert!(student
            .validate(today)
            .has("date of birth", ViolationKind::Underage { min_years: 18 }));

        student.date_of_birth = Some(date(2006, 6, 15));
        assert!(student.validate(today).is_empty());
    }

    #[test]
    fn test_format_rules() {
        let mut student = valid_student();
        student.phone = "1234567890".to_string();
        student.national_id = "12345678".to_string();
        let violations = student.validate(date(2024, 1, 1));
        assert_eq!(violations.len(), 2);
        assert!(violations.has("phone", ViolationKind::InvalidPhone));
        assert!(violations.has("national id", ViolationKind::TooShort { min: 9 }));
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(serde_json::to_value(StudentStatus::InProgress).unwrap(), "in-progress");
        assert_eq!("graduated".parse::<StudentStatus>(), Ok(StudentStatus::Graduated));
        assert_eq!(Student::status_domain(), vec!["not-started", "in-progress", "graduated"]);
    }

    #[test]
    fn test_seed_records_are_valid() {
        let seed = Student::seed();
        assert_eq!(seed.len(), 5);
        for record in seed {
            assert!(record.fields.validate(date(2024, 1, 1)).is_empty(), "{:?}", record);
        }
    }
}
