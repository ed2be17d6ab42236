//! Instructor model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record};
use crate::validation::{Validator, Violations};

/// Minimum age to teach, in whole years
pub const MIN_INSTRUCTOR_AGE: i32 = 22;

status_enum! {
    Specialization {
        #[default]
        Theory => "theory",
        Practice => "practice",
        TheoryAndPractice => "theory-and-practice",
    }
}

status_enum! {
    InstructorStatus {
        #[default]
        Teaching => "teaching",
        OnLeave => "on-leave",
        Departed => "departed",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub specialization: Specialization,
    pub status: InstructorStatus,
}

impl Entity for Instructor {
    const KIND: EntityKind = EntityKind::Instructor;

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.full_name, &self.phone, &self.email]
    }

    fn status_label(&self) -> &'static str {
        self.status.label()
    }

    fn status_domain() -> Vec<&'static str> {
        InstructorStatus::ALL.iter().map(|s| s.label()).collect()
    }

    fn validate(&self, today: NaiveDate) -> Violations {
        let mut v = Validator::new();

        v.require_text("full name", &self.full_name);
        let date_of_birth = v.require_date("date of birth", self.date_of_birth);
        let phone = v.require_text("phone", &self.phone);
        let email = v.require_text("email", &self.email);
        v.require_text("address", &self.address);

        if let Some(dob) = date_of_birth {
            v.minimum_age("date of birth", dob, today, MIN_INSTRUCTOR_AGE);
        }
        if let Some(phone) = phone {
            v.phone("phone", phone);
        }
        if let Some(email) = email {
            v.email("email", email);
        }

        v.finish()
    }

    fn seed() -> Vec<Record<Self>> {
        fn instructor(
            id: &str,
            name: &str,
            dob: (i32, u32, u32),
            phone: &str,
            email: &str,
            address: &str,
            specialization: Specialization,
            status: InstructorStatus,
        ) -> Record<Instructor> {
            Record::local(id, Instructor {
                full_name: name.to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2),
                phone: phone.to_string(),
                email: email.to_string(),
                address: address.to_string(),
                specialization,
                status,
            })
        }

        vec![
            instructor(
                "1",
                "Nguyễn Văn An",
                (1980, 5, 10),
                "0901234567",
                "an.nguyen@gmail.com",
                "Hà Nội",
                Specialization::Theory,
                InstructorStatus::Teaching,
            ),
            instructor(
                "2",
                "Trần Thị Bình",
                (1985, 8, 15),
                "0912345678",
                "binh.tran@gmail.com",
                "TP.HCM",
                Specialization::Practice,
                InstructorStatus::Teaching,
            ),
            instructor(
                "3",
                "Phạm Văn Cường",
                (1978, 3, 20),
                "0923456789",
                "cuong.pham@gmail.com",
                "Đà Nẵng",
                Specialization::TheoryAndPractice,
                InstructorStatus::Teaching,
            ),
            instructor(
                "4",
                "Lê Thị Dung",
                (1982, 11, 5),
                "0934567890",
                "dung.le@gmail.com",
                "Hải Phòng",
                Specialization::Practice,
                InstructorStatus::OnLeave,
            ),
            instructor(
                "5",
                "Hoàng Văn Em",
                (1975, 7, 25),
                "0945678901",
                "em.hoang@gmail.com",
                "Cần Thơ",
                Specialization::Theory,
                InstructorStatus::Departed,
            ),
        ]
    }
}
