//! Helper functions and utilities
//!
//! Date arithmetic used by the validation rules, date parsing for operator
//! input, and small text helpers for listings and search.

use chrono::{Datelike, NaiveDate};

/// Whole years elapsed from `born` to `today`.
///
/// Calendar-year difference, minus one when today's month/day falls before
/// the birth month/day.
pub fn elapsed_years(born: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    years
}

/// Signed number of days from `start` to `end`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// Parse a date typed by an operator: ISO `YYYY-MM-DD` or `DD/MM/YYYY`.
/// Blank input is an absent date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .ok()
}

/// Case-insensitive substring match; the empty needle matches everything
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Truncate text to specified length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
