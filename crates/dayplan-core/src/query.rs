use crate::models::{HabitType, ScheduleType};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 100;
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// Conjunctive filters for task listings. Every `None` field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    pub category_id: Option<i64>,
    pub schedule_type: Option<ScheduleType>,
    pub habit_type: Option<HabitType>,
    /// Only tasks whose start date is before today and that are not completed.
    #[serde(default)]
    pub overdue_only: bool,
}

impl TaskFilter {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn category(category_id: i64) -> Self {
        Self {
            category_id: Some(category_id),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: offset.max(0),
            limit: limit.max(1),
        }
    }

    pub fn limit(limit: i64) -> Self {
        Self::new(0, limit)
    }
}

/// One page of results plus the metadata paginated consumers need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    /// 1-based page number derived from offset and limit.
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: Pagination) -> Self {
        let page_size = pagination.limit.max(1);
        Self {
            items,
            total,
            page: pagination.offset / page_size + 1,
            page_size,
            total_pages: (total + page_size - 1) / page_size,
        }
    }
}
