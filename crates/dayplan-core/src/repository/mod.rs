use crate::clock::{Clock, SystemClock};
use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{Category, NewTaskData, Task, TaskDetails, UpdateMode, UpdateTaskData};
use crate::query::{Pagination, TaskFilter};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

pub mod categories;
pub mod queries;
pub mod query_builder;
pub mod tasks;

/// Column list shared by every statement that materialises a `Task`.
pub(crate) const TASK_COLUMNS: &str = "id, title, description, completed, schedule_type, unit, unit_value, \
     start_date, start_time, end_time, all_day, habit_type, notes, category_id, created_at, updated_at";

/// Task lifecycle: create, read, update, delete and completion toggles.
///
/// Missing records are reported through `Option`/`bool` rather than
/// `CoreError::NotFound`.
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn find_task_details(&self, id: i64) -> Result<Option<TaskDetails>, CoreError>;
    async fn update_task(
        &self,
        id: i64,
        data: UpdateTaskData,
        mode: UpdateMode,
    ) -> Result<Option<Task>, CoreError>;
    async fn delete_task(&self, id: i64) -> Result<bool, CoreError>;
    async fn mark_completed(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn mark_incomplete(&self, id: i64) -> Result<Option<Task>, CoreError>;
}

/// Filtered, ordered views over the task table.
#[async_trait]
pub trait TaskQueryRepository {
    /// Ascending by start date.
    async fn find_tasks(&self, filter: &TaskFilter, page: Pagination) -> Result<Vec<Task>, CoreError>;
    /// Matches for `filter`, ignoring pagination.
    async fn count_tasks(&self, filter: &TaskFilter) -> Result<i64, CoreError>;
    async fn find_overdue_tasks(&self, limit: i64) -> Result<Vec<Task>, CoreError>;
    async fn find_today_tasks(&self) -> Result<Vec<Task>, CoreError>;
    async fn find_upcoming_tasks(&self, days: u32, limit: i64) -> Result<Vec<Task>, CoreError>;
    /// Newest first.
    async fn find_tasks_by_category(
        &self,
        category_id: i64,
        completed: Option<bool>,
        page: Pagination,
    ) -> Result<Vec<Task>, CoreError>;
    /// Case-insensitive substring match over title, description and notes.
    async fn search_tasks(&self, term: &str, page: Pagination) -> Result<Vec<Task>, CoreError>;
    async fn count_search_results(&self, term: &str) -> Result<i64, CoreError>;
}

#[async_trait]
pub trait CategoryRepository {
    async fn add_category(&self, name: String) -> Result<Category, CoreError>;
    async fn find_category_by_id(&self, id: i64) -> Result<Option<Category>, CoreError>;
    async fn find_categories(&self) -> Result<Vec<Category>, CoreError>;
}

/// Everything the adapters need from the store.
pub trait Repository: TaskRepository + TaskQueryRepository + CategoryRepository + Send + Sync {}

/// SQLite implementation of the repository traits.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self::with_clock(pool, SystemClock)
    }

    pub fn with_clock(pool: DbPool, clock: impl Clock + 'static) -> Self {
        Self {
            pool,
            clock: Arc::new(clock),
        }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// The date date-relative views and creation validation treat as today.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

impl Repository for SqliteRepository {}
