//! Field and cross-field rules applied to task input before it reaches the
//! store.
//!
//! Three profiles exist:
//!
//! - [`validate_new_task`]: creation. Every rule, including "start date is
//!   not in the past".
//! - [`validate_replacement`]: full update. Same as creation without the
//!   past-date rule, since the task already exists.
//! - [`validate_update`]: partial update. Only supplied fields are checked,
//!   and pairwise rules apply only when both sides are in the payload
//!   (clearing `unit` must also clear `unit_value`).
//!
//! All violations are collected and returned together.

use crate::models::{NewTaskData, UpdateTaskData};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fmt;

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const NOTES_MAX_CHARS: usize = 2000;
pub const UNIT_VALUE_MIN: i64 = 1;
pub const UNIT_VALUE_MAX: i64 = 10_000;

/// The rule a field broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    Required,
    Length { min: usize, max: usize },
    Range { min: i64, max: i64 },
    Minimum { min: i64 },
    /// The field is only meaningful together with `field`.
    RequiresField { field: &'static str },
    /// The field must be strictly later than `field`.
    After { field: &'static str },
    NotInPast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub rule: Rule,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl std::error::Error for ValidationErrors {}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation failed: ")?;
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Fields that failed, in the order they were checked.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub fn has(&self, field: &str, rule: &Rule) -> bool {
        self.0.iter().any(|e| e.field == field && &e.rule == rule)
    }
}

#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: &'static str, rule: Rule, message: String) {
        self.errors.push(FieldError { field, rule, message });
    }

    fn length(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        let chars = value.chars().count();
        if chars < min || chars > max {
            let message = if min > 0 {
                format!("must be between {} and {} characters (got {})", min, max, chars)
            } else {
                format!("must be at most {} characters (got {})", max, chars)
            };
            self.fail(field, Rule::Length { min, max }, message);
        }
    }

    fn unit_value(&mut self, value: i64) {
        if !(UNIT_VALUE_MIN..=UNIT_VALUE_MAX).contains(&value) {
            self.fail(
                "unit_value",
                Rule::Range {
                    min: UNIT_VALUE_MIN,
                    max: UNIT_VALUE_MAX,
                },
                format!(
                    "must be between {} and {} (got {})",
                    UNIT_VALUE_MIN, UNIT_VALUE_MAX, value
                ),
            );
        }
    }

    fn category_id(&mut self, value: i64) {
        if value < 1 {
            self.fail(
                "category_id",
                Rule::Minimum { min: 1 },
                format!("must be a positive id (got {})", value),
            );
        }
    }

    fn time_order(&mut self, start: NaiveTime, end: NaiveTime) {
        if end <= start {
            self.fail(
                "end_time",
                Rule::After { field: "start_time" },
                format!("must be after start_time ({} is not after {})", end, start),
            );
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

fn check_full(data: &NewTaskData) -> Checker {
    let mut check = Checker::default();

    check.length("title", &data.title, 1, TITLE_MAX_CHARS);
    if let Some(description) = &data.description {
        check.length("description", description, 0, DESCRIPTION_MAX_CHARS);
    }
    if let Some(notes) = &data.notes {
        check.length("notes", notes, 0, NOTES_MAX_CHARS);
    }
    if let Some(value) = data.unit_value {
        check.unit_value(value);
    }
    if let Some(id) = data.category_id {
        check.category_id(id);
    }

    match (data.unit, data.unit_value) {
        (Some(_), None) => check.fail(
            "unit_value",
            Rule::Required,
            "is required when unit is set".to_string(),
        ),
        (None, Some(_)) => check.fail(
            "unit_value",
            Rule::RequiresField { field: "unit" },
            "cannot be set without unit".to_string(),
        ),
        _ => {}
    }

    if let (Some(start), Some(end)) = (data.start_time, data.end_time) {
        check.time_order(start, end);
    }

    check
}

/// Creation profile.
pub fn validate_new_task(data: &NewTaskData, today: NaiveDate) -> Result<(), ValidationErrors> {
    let mut check = check_full(data);
    if let Some(start_date) = data.start_date {
        if start_date < today {
            check.fail(
                "start_date",
                Rule::NotInPast,
                format!("cannot be in the past ({} is before {})", start_date, today),
            );
        }
    }
    check.finish()
}

/// Full-replacement profile.
pub fn validate_replacement(data: &NewTaskData) -> Result<(), ValidationErrors> {
    check_full(data).finish()
}

/// Builds the complete field set for a full update. `title` must be supplied;
/// every other missing field falls back to its default.
pub fn replacement_from_update(data: UpdateTaskData) -> Result<NewTaskData, ValidationErrors> {
    let Some(title) = data.title else {
        return Err(ValidationErrors(vec![FieldError {
            field: "title",
            rule: Rule::Required,
            message: "is required for a full update".to_string(),
        }]));
    };

    let replacement = NewTaskData {
        title,
        description: data.description.flatten(),
        completed: data.completed.unwrap_or(false),
        schedule_type: data.schedule_type.flatten(),
        unit: data.unit.flatten(),
        unit_value: data.unit_value.flatten(),
        start_date: data.start_date.flatten(),
        start_time: data.start_time.flatten(),
        end_time: data.end_time.flatten(),
        all_day: data.all_day.unwrap_or(false),
        habit_type: data.habit_type.flatten(),
        notes: data.notes.flatten(),
        category_id: data.category_id.flatten(),
    };
    validate_replacement(&replacement)?;
    Ok(replacement)
}

/// Partial-update profile. Stored values are never consulted.
pub fn validate_update(data: &UpdateTaskData) -> Result<(), ValidationErrors> {
    let mut check = Checker::default();

    if let Some(title) = &data.title {
        check.length("title", title, 1, TITLE_MAX_CHARS);
    }
    if let Some(Some(description)) = &data.description {
        check.length("description", description, 0, DESCRIPTION_MAX_CHARS);
    }
    if let Some(Some(notes)) = &data.notes {
        check.length("notes", notes, 0, NOTES_MAX_CHARS);
    }
    if let Some(Some(value)) = data.unit_value {
        check.unit_value(value);
    }
    if let Some(Some(id)) = data.category_id {
        check.category_id(id);
    }

    // Pairwise rules only fire when both sides travel in this payload,
    // except that clearing unit must also clear unit_value.
    match (data.unit, data.unit_value) {
        (Some(Some(_)), Some(None)) => check.fail(
            "unit_value",
            Rule::Required,
            "is required when unit is set".to_string(),
        ),
        (Some(None), Some(Some(_))) => check.fail(
            "unit_value",
            Rule::RequiresField { field: "unit" },
            "cannot be set without unit".to_string(),
        ),
        (Some(None), None) => check.fail(
            "unit_value",
            Rule::RequiresField { field: "unit" },
            "must be cleared together with unit".to_string(),
        ),
        _ => {}
    }
    if let (Some(Some(start)), Some(Some(end))) = (data.start_time, data.end_time) {
        check.time_order(start, end);
    }

    check.finish()
}

pub fn validate_category_name(name: &str) -> Result<(), ValidationErrors> {
    let mut check = Checker::default();
    if name.trim().is_empty() {
        check.fail("name", Rule::Required, "must not be empty".to_string());
    }
    check.finish()
}
