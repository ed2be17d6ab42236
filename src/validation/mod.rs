//! Validation rules
//!
//! Pure predicate checks shared by every record kind. Each entity builds its
//! rule set with a [`Validator`]: required fields first, in field order, then
//! format, numeric and cross-field rules on the fields that are present.
//! The result is an ordered [`Violations`] list; empty means valid.

use std::fmt;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::helpers::{days_between, elapsed_years};

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^0[0-9]{9}$").expect("phone pattern compiles");
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles");
}

/// What is wrong with a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    InvalidPhone,
    InvalidEmail,
    TooShort { min: usize },
    NotPositive,
    Negative,
    Underage { min_years: i32 },
    EndBeforeStart { start: &'static str },
    DurationTooShort { min_days: i64 },
    RequiredWhenIssued,
    ExceedsLimit { limit: &'static str },
}

/// A single human-readable validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: &'static str, kind: ViolationKind) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field;
        match self.kind {
            ViolationKind::Missing => write!(f, "{} is required", field),
            ViolationKind::InvalidPhone => {
                write!(f, "{} must be 10 digits starting with 0", field)
            }
            ViolationKind::InvalidEmail => write!(f, "{} is not a valid email address", field),
            ViolationKind::TooShort { min } => {
                write!(f, "{} must be at least {} characters", field, min)
            }
            ViolationKind::NotPositive => write!(f, "{} must be greater than 0", field),
            ViolationKind::Negative => write!(f, "{} cannot be negative", field),
            ViolationKind::Underage { min_years } => {
                write!(f, "must be at least {} years old ({})", min_years, field)
            }
            ViolationKind::EndBeforeStart { start } => {
                write!(f, "{} cannot be before {} (end before start)", field, start)
            }
            ViolationKind::DurationTooShort { min_days } => {
                write!(
                    f,
                    "{} must be at least {} days after start (minimum {}-day duration)",
                    field, min_days, min_days
                )
            }
            ViolationKind::RequiredWhenIssued => {
                write!(f, "{} is required for an issued license", field)
            }
            ViolationKind::ExceedsLimit { limit } => {
                write!(f, "{} cannot exceed {}", field, limit)
            }
        }
    }
}

/// Ordered list of violations produced by one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Messages in the order the rules fired
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn has(&self, field: &str, kind: ViolationKind) -> bool {
        self.0.iter().any(|v| v.field == field && v.kind == kind)
    }

    pub fn for_field(&self, field: &str) -> Vec<&Violation> {
        self.0.iter().filter(|v| v.field == field).collect()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Accumulates violations for one candidate record
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, kind: ViolationKind) {
        self.violations.push(Violation::new(field, kind));
    }

    /// Text that must be non-blank; returns the trimmed value when present
    pub fn require_text<'a>(&mut self, field: &'static str, value: &'a str) -> Option<&'a str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, ViolationKind::Missing);
            None
        } else {
            Some(trimmed)
        }
    }

    pub fn require_date(
        &mut self,
        field: &'static str,
        value: Option<NaiveDate>,
    ) -> Option<NaiveDate> {
        if value.is_none() {
            self.push(field, ViolationKind::Missing);
        }
        value
    }

    pub fn phone(&mut self, field: &'static str, value: &str) {
        if !PHONE_RE.is_match(value) {
            self.push(field, ViolationKind::InvalidPhone);
        }
    }

    pub fn email(&mut self, field: &'static str, value: &str) {
        if !EMAIL_RE.is_match(value) {
            self.push(field, ViolationKind::InvalidEmail);
        }
    }

    pub fn min_chars(&mut self, field: &'static str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.push(field, ViolationKind::TooShort { min });
        }
    }

    pub fn positive(&mut self, field: &'static str, value: i64) {
        if value <= 0 {
            self.push(field, ViolationKind::NotPositive);
        }
    }

    pub fn non_negative(&mut self, field: &'static str, value: i64) {
        if value < 0 {
            self.push(field, ViolationKind::Negative);
        }
    }

    /// `value` must not exceed `limit_value`, named `limit` in the message
    pub fn at_most(
        &mut self,
        field: &'static str,
        value: i64,
        limit: &'static str,
        limit_value: i64,
    ) {
        if value > limit_value {
            self.push(field, ViolationKind::ExceedsLimit { limit });
        }
    }

    pub fn minimum_age(
        &mut self,
        field: &'static str,
        date_of_birth: NaiveDate,
        today: NaiveDate,
        min_years: i32,
    ) {
        if elapsed_years(date_of_birth, today) < min_years {
            self.push(field, ViolationKind::Underage { min_years });
        }
    }

    /// End must not precede start; when ordered, the span must cover
    /// `min_days` days. Only one of the two fires.
    pub fn date_span(
        &mut self,
        start_field: &'static str,
        start: NaiveDate,
        end_field: &'static str,
        end: NaiveDate,
        min_days: i64,
    ) {
        let days = days_between(start, end);
        if days < 0 {
            self.push(end_field, ViolationKind::EndBeforeStart { start: start_field });
        } else if days < min_days {
            self.push(end_field, ViolationKind::DurationTooShort { min_days });
        }
    }

    pub fn finish(self) -> Violations {
        Violations(self.violations)
    }
}
