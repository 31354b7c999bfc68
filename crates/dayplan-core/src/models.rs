use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// How often a habit-like task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum ScheduleType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom,
}

impl ScheduleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleType::Daily => "daily",
            ScheduleType::Weekly => "weekly",
            ScheduleType::Monthly => "monthly",
            ScheduleType::Yearly => "yearly",
            ScheduleType::Custom => "custom",
        }
    }
}

impl FromStr for ScheduleType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(ScheduleType::Daily),
            "weekly" => Ok(ScheduleType::Weekly),
            "monthly" => Ok(ScheduleType::Monthly),
            "yearly" => Ok(ScheduleType::Yearly),
            "custom" => Ok(ScheduleType::Custom),
            _ => Err(ParseEnumError {
                kind: "schedule type",
                value: s.to_string(),
            }),
        }
    }
}

/// Unit paired with `unit_value` to express a duration such as "30 minutes".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Months => "months",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minutes" => Ok(TimeUnit::Minutes),
            "hours" => Ok(TimeUnit::Hours),
            "days" => Ok(TimeUnit::Days),
            "weeks" => Ok(TimeUnit::Weeks),
            "months" => Ok(TimeUnit::Months),
            _ => Err(ParseEnumError {
                kind: "unit",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum HabitType {
    Health,
    Productivity,
    Learning,
    Social,
    Personal,
}

impl HabitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitType::Health => "health",
            HabitType::Productivity => "productivity",
            HabitType::Learning => "learning",
            HabitType::Social => "social",
            HabitType::Personal => "personal",
        }
    }
}

impl FromStr for HabitType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "health" => Ok(HabitType::Health),
            "productivity" => Ok(HabitType::Productivity),
            "learning" => Ok(HabitType::Learning),
            "social" => Ok(HabitType::Social),
            "personal" => Ok(HabitType::Personal),
            _ => Err(ParseEnumError {
                kind: "habit type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HabitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub schedule_type: Option<ScheduleType>,
    pub unit: Option<TimeUnit>,
    pub unit_value: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub all_day: bool,
    pub habit_type: Option<HabitType>,
    pub notes: Option<String>,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// A task is overdue when it started before `today` and is still open.
    /// Tasks without a start date are never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.start_date.is_some_and(|date| date < today)
    }
}

/// A task with its category expanded inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetails {
    #[serde(flatten)]
    pub task: Task,
    pub category: Option<Category>,
}

/// Input for creating a task, and the complete field set of a full update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTaskData {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub schedule_type: Option<ScheduleType>,
    #[serde(default)]
    pub unit: Option<TimeUnit>,
    #[serde(default)]
    pub unit_value: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub habit_type: Option<HabitType>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Changes to apply to an existing task.
///
/// Nullable columns use `Option<Option<T>>`: the outer `None` leaves the
/// stored value untouched, `Some(None)` clears it and `Some(Some(v))` sets it.
/// Over JSON this maps to an absent key, `null`, and a value respectively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTaskData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub schedule_type: Option<Option<ScheduleType>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub unit: Option<Option<TimeUnit>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub unit_value: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub start_time: Option<Option<NaiveTime>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub end_time: Option<Option<NaiveTime>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub habit_type: Option<Option<HabitType>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub category_id: Option<Option<i64>>,
}

impl UpdateTaskData {
    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self == &UpdateTaskData::default()
    }
}

impl From<NewTaskData> for UpdateTaskData {
    fn from(data: NewTaskData) -> Self {
        Self {
            title: Some(data.title),
            description: Some(data.description),
            completed: Some(data.completed),
            schedule_type: Some(data.schedule_type),
            unit: Some(data.unit),
            unit_value: Some(data.unit_value),
            start_date: Some(data.start_date),
            start_time: Some(data.start_time),
            end_time: Some(data.end_time),
            all_day: Some(data.all_day),
            habit_type: Some(data.habit_type),
            notes: Some(data.notes),
            category_id: Some(data.category_id),
        }
    }
}

/// How `update_task` treats fields missing from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Only supplied fields change.
    #[default]
    Partial,
    /// Every column is rewritten; missing fields take their defaults.
    Full,
}
