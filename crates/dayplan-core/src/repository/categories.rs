use crate::error::CoreError;
use crate::models::Category;
use crate::repository::{CategoryRepository, SqliteRepository};
use crate::validation;
use async_trait::async_trait;

#[async_trait]
impl CategoryRepository for SqliteRepository {
    async fn add_category(&self, name: String) -> Result<Category, CoreError> {
        validation::validate_category_name(&name)?;

        let category: Category = sqlx::query_as(
            r#"INSERT INTO categories (name, created_at)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name.trim())
        .bind(self.clock().now())
        .fetch_one(self.pool())
        .await
        .map_err(|e| match CoreError::from_write(e) {
            CoreError::Constraint(_) => {
                CoreError::Constraint(format!("category '{}' already exists", name.trim()))
            }
            other => other,
        })?;

        tracing::debug!(category_id = category.id, name = %category.name, "created category");
        Ok(category)
    }

    async fn find_category_by_id(&self, id: i64) -> Result<Option<Category>, CoreError> {
        let category = sqlx::query_as("SELECT id, name, created_at FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(category)
    }

    async fn find_categories(&self) -> Result<Vec<Category>, CoreError> {
        let categories = sqlx::query_as("SELECT id, name, created_at FROM categories")
            .fetch_all(self.pool())
            .await?;
        Ok(categories)
    }
}
