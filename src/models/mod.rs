//! Data models module
//!
//! This module contains the five record kinds managed by the console, the
//! stored-record envelope and the `Entity` descriptor trait that the generic
//! list controller is parameterised by.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::validation::Violations;

/// Declares a fixed status-like enumeration serialized as kebab-case.
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
        )]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every permitted value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| format!("unknown {} value: {}", stringify!($name), wanted))
            }
        }
    };
}

pub mod student;
pub mod course;
pub mod instructor;
pub mod exam;
pub mod license;

// Re-export commonly used models
pub use student::{Student, StudentStatus};
pub use course::{Course, CourseStatus};
pub use instructor::{Instructor, InstructorStatus, Specialization};
pub use exam::{Exam, ExamStatus};
pub use license::{License, LicenseStatus};

/// The five record kinds, one store collection each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Student,
    Course,
    Instructor,
    Exam,
    License,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Student,
        EntityKind::Course,
        EntityKind::Instructor,
        EntityKind::Exam,
        EntityKind::License,
    ];

    /// Name of the store collection holding this kind
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Student => "students",
            EntityKind::Course => "courses",
            EntityKind::Instructor => "instructors",
            EntityKind::Exam => "exams",
            EntityKind::License => "licenses",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Student => "student",
            EntityKind::Course => "course",
            EntityKind::Instructor => "instructor",
            EntityKind::Exam => "exam",
            EntityKind::License => "license",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted || kind.collection() == wanted)
            .ok_or_else(|| format!("unknown record kind: {}", s))
    }
}

/// A persisted record: store-assigned identifier and timestamps around the
/// entity's own fields.
///
/// Timestamps are `None` for built-in seed records and for local copies
/// updated optimistically after a write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<E> {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub fields: E,
}

impl<E> Record<E> {
    /// A record known only locally, without store timestamps
    pub fn local(id: impl Into<String>, fields: E) -> Self {
        Self {
            id: id.into(),
            created_at: None,
            updated_at: None,
            fields,
        }
    }
}

/// Descriptor of one record kind.
///
/// Each concrete entity supplies its collection, searchable fields, rule set
/// and seed list; the list controller and gateway are written once against
/// this trait.
pub trait Entity:
    Clone + fmt::Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: EntityKind;

    /// Name shown in listings and delete confirmations
    fn display_name(&self) -> &str;

    /// Secondary fields matched by substring search, besides the identifier
    fn search_fields(&self) -> Vec<&str>;

    /// Current status, as its serialized label
    fn status_label(&self) -> &'static str;

    /// Every status value this kind permits, in declaration order
    fn status_domain() -> Vec<&'static str>;

    /// Run this kind's rule set against a candidate record
    fn validate(&self, today: NaiveDate) -> Violations;

    /// Built-in records shown when the store cannot be reached
    fn seed() -> Vec<Record<Self>>;
}
