use crate::error::CoreError;
use crate::models::{NewTaskData, Task, TaskDetails, UpdateMode, UpdateTaskData};
use crate::repository::{CategoryRepository, SqliteRepository, TaskRepository, TASK_COLUMNS};
use crate::validation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, Transaction};

#[async_trait]
impl TaskRepository for SqliteRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        validation::validate_new_task(&data, self.today())?;

        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        let task: Task = sqlx::query_as(&format!(
            r#"INSERT INTO tasks (title, description, completed, schedule_type, unit, unit_value,
                start_date, start_time, end_time, all_day, habit_type, notes, category_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
            RETURNING {}"#,
            TASK_COLUMNS
        ))
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.completed)
        .bind(data.schedule_type)
        .bind(data.unit)
        .bind(data.unit_value)
        .bind(data.start_date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.all_day)
        .bind(data.habit_type)
        .bind(&data.notes)
        .bind(data.category_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(CoreError::from_write)?;

        tx.commit().await?;
        tracing::debug!(task_id = task.id, title = %task.title, "created task");
        Ok(task)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as(&format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn find_task_details(&self, id: i64) -> Result<Option<TaskDetails>, CoreError> {
        let Some(task) = self.find_task_by_id(id).await? else {
            return Ok(None);
        };
        let category = match task.category_id {
            Some(category_id) => self.find_category_by_id(category_id).await?,
            None => None,
        };
        Ok(Some(TaskDetails { task, category }))
    }

    async fn update_task(
        &self,
        id: i64,
        data: UpdateTaskData,
        mode: UpdateMode,
    ) -> Result<Option<Task>, CoreError> {
        // Full mode rewrites every column, so it is handled as a partial
        // update that supplies every field.
        let data = match mode {
            UpdateMode::Partial => {
                validation::validate_update(&data)?;
                data
            }
            UpdateMode::Full => UpdateTaskData::from(validation::replacement_from_update(data)?),
        };

        let mut tx = self.pool().begin().await?;

        if Self::find_task_by_id_in_transaction(&mut tx, id).await?.is_none() {
            return Ok(None);
        }

        if !data.is_empty() {
            Self::update_task_fields(&mut tx, id, &data, self.clock().now()).await?;
        }

        let updated = Self::find_task_by_id_in_transaction(&mut tx, id).await?;
        tx.commit().await?;
        tracing::debug!(task_id = id, ?mode, "updated task");
        Ok(updated)
    }

    async fn delete_task(&self, id: i64) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        let deleted = result.rows_affected() > 0;
        tracing::debug!(task_id = id, deleted, "delete task");
        Ok(deleted)
    }

    async fn mark_completed(&self, id: i64) -> Result<Option<Task>, CoreError> {
        self.set_completed(id, true).await
    }

    async fn mark_incomplete(&self, id: i64) -> Result<Option<Task>, CoreError> {
        self.set_completed(id, false).await
    }
}

impl SqliteRepository {
    /// Sets the completion flag. `updated_at` only moves when the flag
    /// actually changes.
    async fn set_completed(&self, id: i64, completed: bool) -> Result<Option<Task>, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task: Option<Task> = sqlx::query_as(&format!(
            r#"UPDATE tasks
            SET completed = $1,
                updated_at = CASE WHEN completed = $1 THEN updated_at ELSE $2 END
            WHERE id = $3
            RETURNING {}"#,
            TASK_COLUMNS
        ))
        .bind(completed)
        .bind(self.clock().now())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(task_id = id, completed, found = task.is_some(), "set completion");
        Ok(task)
    }

    /// Find a task by ID within an existing transaction
    pub(crate) async fn find_task_by_id_in_transaction<'a>(
        tx: &mut Transaction<'a, Sqlite>,
        id: i64,
    ) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as(&format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS))
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(task)
    }

    /// Writes every supplied field of `data` within an existing transaction
    pub(crate) async fn update_task_fields<'a>(
        tx: &mut Transaction<'a, Sqlite>,
        id: i64,
        data: &UpdateTaskData,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE tasks SET ");
        {
            let mut set = qb.separated(", ");

            if let Some(title) = &data.title {
                set.push("title = ").push_bind_unseparated(title.clone());
            }
            if let Some(description) = &data.description {
                set.push("description = ").push_bind_unseparated(description.clone());
            }
            if let Some(completed) = data.completed {
                set.push("completed = ").push_bind_unseparated(completed);
            }
            if let Some(schedule_type) = data.schedule_type {
                set.push("schedule_type = ").push_bind_unseparated(schedule_type);
            }
            if let Some(unit) = data.unit {
                set.push("unit = ").push_bind_unseparated(unit);
            }
            if let Some(unit_value) = data.unit_value {
                set.push("unit_value = ").push_bind_unseparated(unit_value);
            }
            if let Some(start_date) = data.start_date {
                set.push("start_date = ").push_bind_unseparated(start_date);
            }
            if let Some(start_time) = data.start_time {
                set.push("start_time = ").push_bind_unseparated(start_time);
            }
            if let Some(end_time) = data.end_time {
                set.push("end_time = ").push_bind_unseparated(end_time);
            }
            if let Some(all_day) = data.all_day {
                set.push("all_day = ").push_bind_unseparated(all_day);
            }
            if let Some(habit_type) = data.habit_type {
                set.push("habit_type = ").push_bind_unseparated(habit_type);
            }
            if let Some(notes) = &data.notes {
                set.push("notes = ").push_bind_unseparated(notes.clone());
            }
            if let Some(category_id) = data.category_id {
                set.push("category_id = ").push_bind_unseparated(category_id);
            }

            set.push("updated_at = ").push_bind_unseparated(now);
        }
        qb.push(" WHERE id = ").push_bind(id);

        qb.build()
            .execute(&mut **tx)
            .await
            .map_err(CoreError::from_write)?;
        Ok(())
    }
}
