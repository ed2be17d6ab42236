//! Test data helpers for creating valid records
//!
//! Every builder returns a record that passes validation as of
//! [`test_today`]; tests break one field at a time from there.

use chrono::NaiveDate;
use fake::faker::address::en::StreetName;
use fake::faker::name::en::Name;
use fake::Fake;

use DriveDesk::models::{
    Course, CourseStatus, Exam, ExamStatus, Instructor, InstructorStatus, License, LicenseStatus,
    Specialization, Student, StudentStatus,
};

/// The date every test clock is pinned to
pub fn test_today() -> NaiveDate {
    date(2024, 1, 10)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// A ten-digit phone number starting with 0
pub fn test_phone() -> String {
    let rest: u32 = (100_000_000..999_999_999).fake();
    format!("0{}", rest)
}

pub fn valid_student() -> Student {
    Student {
        full_name: Name().fake(),
        date_of_birth: Some(date(2000, 5, 15)),
        phone: test_phone(),
        address: StreetName().fake(),
        national_id: "001200012345".to_string(),
        course_code: "B1-2024".to_string(),
        status: StudentStatus::NotStarted,
    }
}

pub fn valid_course() -> Course {
    Course {
        name: "Class B1 evening course".to_string(),
        license_class: "B1".to_string(),
        start_date: Some(date(2024, 2, 1)),
        end_date: Some(date(2024, 3, 30)),
        max_students: 30,
        instructors: 2,
        fee: 15_000_000,
        status: CourseStatus::Upcoming,
        description: None,
    }
}

pub fn valid_instructor() -> Instructor {
    Instructor {
        full_name: Name().fake(),
        date_of_birth: Some(date(1985, 3, 20)),
        phone: test_phone(),
        email: "instructor@drivedesk.test".to_string(),
        address: StreetName().fake(),
        specialization: Specialization::Practice,
        status: InstructorStatus::Teaching,
    }
}

pub fn valid_exam() -> Exam {
    Exam {
        title: "B1 practical exam".to_string(),
        exam_date: Some(date(2024, 4, 12)),
        location: "North test track".to_string(),
        license_class: "B1".to_string(),
        max_participants: 40,
        registered_participants: 12,
        status: ExamStatus::Upcoming,
        description: None,
    }
}

pub fn issued_license() -> License {
    License {
        holder_national_id: "001200012345".to_string(),
        holder_name: Name().fake(),
        license_class: "B1".to_string(),
        issue_date: Some(date(2023, 6, 1)),
        expiry_date: Some(date(2033, 6, 1)),
        status: LicenseStatus::Issued,
    }
}

pub fn pending_license() -> License {
    License {
        issue_date: None,
        expiry_date: None,
        status: LicenseStatus::Pending,
        ..issued_license()
    }
}
