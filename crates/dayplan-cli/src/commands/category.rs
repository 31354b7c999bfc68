use anyhow::Result;
use chrono::NaiveDate;
use dayplan_core::error::CoreError;
use dayplan_core::query::{Page, TaskFilter};
use dayplan_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::cli::CategoryAction;
use crate::commands::{pagination, print_page_footer};
use crate::config::Config;
use crate::views::table::{display_categories, display_tasks, ViewTask};

pub async fn category_command(
    repo: &impl Repository,
    action: CategoryAction,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    match action {
        CategoryAction::Add { name } => {
            let category = repo.add_category(name).await?;
            println!(
                "{} Created category: {} (ID {})",
                "✓".green().bold(),
                category.name.bright_white().bold(),
                category.id.to_string().yellow()
            );
        }
        CategoryAction::List => {
            let categories = repo.find_categories().await?;
            display_categories(&categories);
        }
        CategoryAction::Tasks { id, completed, page } => {
            let category = repo
                .find_category_by_id(id)
                .await?
                .ok_or_else(|| CoreError::NotFound(format!("category {}", id)))?;

            let pagination = pagination(&page, config);
            let tasks = repo.find_tasks_by_category(id, completed, pagination).await?;
            let filter = TaskFilter {
                completed,
                ..TaskFilter::category(id)
            };
            let total = repo.count_tasks(&filter).await?;

            println!("Tasks in {}:", category.name.bold());
            let page = Page::new(
                ViewTask::from_tasks(tasks, std::slice::from_ref(&category)),
                total,
                pagination,
            );
            display_tasks(&page.items, today);
            print_page_footer(&page);
        }
    }
    Ok(())
}
