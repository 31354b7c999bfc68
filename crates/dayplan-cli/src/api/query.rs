//! Query parameter structs for filtering and pagination

use dayplan_core::models::{HabitType, ScheduleType};
use dayplan_core::query::{Pagination, TaskFilter};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Query strings carry everything as text; empty values count as absent.
fn deserialize_option_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    use serde::de::Error;
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.is_empty() => s.parse().map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// `limit` and `offset`; a missing limit falls back to the configured page size.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.limit.is_some_and(|limit| limit < 1) {
            return Err("limit must be at least 1".to_string());
        }
        if self.offset.is_some_and(|offset| offset < 0) {
            return Err("offset cannot be negative".to_string());
        }
        Ok(())
    }

    pub fn to_pagination(&self, default_limit: i64) -> Pagination {
        Pagination::new(self.offset.unwrap_or(0), self.limit.unwrap_or(default_limit))
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct TaskListQuery {
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub category_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub schedule_type: Option<ScheduleType>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub habit_type: Option<HabitType>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub overdue_only: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub offset: Option<i64>,
}

impl TaskListQuery {
    pub fn filter(&self) -> TaskFilter {
        TaskFilter {
            completed: self.completed,
            category_id: self.category_id,
            schedule_type: self.schedule_type,
            habit_type: self.habit_type,
            overdue_only: self.overdue_only.unwrap_or(false),
        }
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct CategoryTasksQuery {
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub offset: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub offset: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct LimitQuery {
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct UpcomingQuery {
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub days: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct GetTaskQuery {
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub include_category: Option<bool>,
}
