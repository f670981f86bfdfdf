//! Work item request rules.
//!
//! Each function returns every violated rule, in field order, so callers can
//! report them together. `today` is passed in to keep the date rule
//! deterministic under test.

use crate::service::dto::{CreateWorkItemInput, UpdateWorkItemInput};
use chrono::NaiveDate;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const TITLE_TOO_LONG: &str = "Title cannot exceed 100 characters";
pub const DESCRIPTION_TOO_LONG: &str = "Description cannot exceed 500 characters";
pub const DUE_DATE_IN_PAST: &str = "Due date cannot be in the past";

/// Checks a creation request.
///
/// Priority needs no runtime rule here: `Priority` cannot hold an unknown
/// value, and raw codes are rejected by `Priority::try_from`.
pub fn validate_create(input: &CreateWorkItemInput, today: NaiveDate) -> Vec<&'static str> {
    let mut violations = Vec::new();
    check_title(&input.title, &mut violations);
    check_description(&input.description, &mut violations);
    check_due_date(input.due_date, today, &mut violations);
    violations
}

/// Checks only the fields present in a partial update.
pub fn validate_update(input: &UpdateWorkItemInput, today: NaiveDate) -> Vec<&'static str> {
    let mut violations = Vec::new();
    if let Some(title) = input.title.as_deref() {
        check_title(title, &mut violations);
    }
    if let Some(description) = input.description.as_deref() {
        check_description(description, &mut violations);
    }
    if let Some(due_date) = input.due_date {
        check_due_date(due_date, today, &mut violations);
    }
    violations
}

/// Formats violations the way callers receive them.
pub fn violation_message(violations: &[&str]) -> String {
    format!("Invalid work item data: {}", violations.join(", "))
}

fn check_title(title: &str, violations: &mut Vec<&'static str>) {
    if title.trim().is_empty() {
        violations.push(TITLE_REQUIRED);
    } else if title.chars().count() > TITLE_MAX_CHARS {
        violations.push(TITLE_TOO_LONG);
    }
}

fn check_description(description: &str, violations: &mut Vec<&'static str>) {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        violations.push(DESCRIPTION_TOO_LONG);
    }
}

fn check_due_date(due_date: NaiveDate, today: NaiveDate, violations: &mut Vec<&'static str>) {
    if due_date < today {
        violations.push(DUE_DATE_IN_PAST);
    }
}
