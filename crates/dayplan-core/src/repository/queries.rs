use crate::error::CoreError;
use crate::models::Task;
use crate::query::{Pagination, TaskFilter};
use crate::repository::query_builder::{SqlQueryBuilder, WhereClause};
use crate::repository::{SqliteRepository, TaskQueryRepository, TASK_COLUMNS};
use async_trait::async_trait;
use chrono::Days;
use sqlx::{QueryBuilder, Sqlite};

fn select_tasks<'a>() -> QueryBuilder<'a, Sqlite> {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(TASK_COLUMNS).push(" FROM tasks");
    qb
}

#[async_trait]
impl TaskQueryRepository for SqliteRepository {
    async fn find_tasks(&self, filter: &TaskFilter, page: Pagination) -> Result<Vec<Task>, CoreError> {
        let mut qb = select_tasks();
        SqlQueryBuilder::push_task_filter(filter, self.today(), &mut WhereClause::new(), &mut qb);
        qb.push(" ORDER BY start_date ASC");
        SqlQueryBuilder::push_pagination(page.offset, page.limit, &mut qb);

        let tasks = qb.build_query_as().fetch_all(self.pool()).await?;
        Ok(tasks)
    }

    async fn count_tasks(&self, filter: &TaskFilter) -> Result<i64, CoreError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM tasks");
        SqlQueryBuilder::push_task_filter(filter, self.today(), &mut WhereClause::new(), &mut qb);

        let count = qb.build_query_scalar().fetch_one(self.pool()).await?;
        Ok(count)
    }

    async fn find_overdue_tasks(&self, limit: i64) -> Result<Vec<Task>, CoreError> {
        let mut qb = select_tasks();
        SqlQueryBuilder::push_overdue(self.today(), &mut WhereClause::new(), &mut qb);
        qb.push(" ORDER BY start_date ASC LIMIT ").push_bind(limit);

        let tasks = qb.build_query_as().fetch_all(self.pool()).await?;
        Ok(tasks)
    }

    async fn find_today_tasks(&self) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(&format!(
            "SELECT {} FROM tasks WHERE start_date = $1 ORDER BY start_time ASC",
            TASK_COLUMNS
        ))
        .bind(self.today())
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn find_upcoming_tasks(&self, days: u32, limit: i64) -> Result<Vec<Task>, CoreError> {
        let today = self.today();
        let until = today
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or_else(|| CoreError::InvalidInput(format!("{} days ahead is out of range", days)))?;

        let tasks = sqlx::query_as(&format!(
            r#"SELECT {} FROM tasks
            WHERE start_date >= $1 AND start_date <= $2 AND completed = $3
            ORDER BY start_date ASC, start_time ASC
            LIMIT $4"#,
            TASK_COLUMNS
        ))
        .bind(today)
        .bind(until)
        .bind(false)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn find_tasks_by_category(
        &self,
        category_id: i64,
        completed: Option<bool>,
        page: Pagination,
    ) -> Result<Vec<Task>, CoreError> {
        let filter = TaskFilter {
            completed,
            ..TaskFilter::category(category_id)
        };
        let mut qb = select_tasks();
        SqlQueryBuilder::push_task_filter(&filter, self.today(), &mut WhereClause::new(), &mut qb);
        qb.push(" ORDER BY created_at DESC, id DESC");
        SqlQueryBuilder::push_pagination(page.offset, page.limit, &mut qb);

        let tasks = qb.build_query_as().fetch_all(self.pool()).await?;
        Ok(tasks)
    }

    async fn search_tasks(&self, term: &str, page: Pagination) -> Result<Vec<Task>, CoreError> {
        let mut qb = select_tasks();
        SqlQueryBuilder::push_search(term, &mut WhereClause::new(), &mut qb);
        qb.push(" ORDER BY start_date ASC");
        SqlQueryBuilder::push_pagination(page.offset, page.limit, &mut qb);

        let tasks = qb.build_query_as().fetch_all(self.pool()).await?;
        Ok(tasks)
    }

    async fn count_search_results(&self, term: &str) -> Result<i64, CoreError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM tasks");
        SqlQueryBuilder::push_search(term, &mut WhereClause::new(), &mut qb);

        let count = qb.build_query_scalar().fetch_one(self.pool()).await?;
        Ok(count)
    }
}
