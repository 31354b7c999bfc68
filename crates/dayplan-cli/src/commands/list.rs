use anyhow::Result;
use dayplan_core::query::{Page, TaskFilter};
use dayplan_core::repository::Repository;

use crate::cli::ListCommand;
use crate::commands::{pagination, print_page_footer};
use crate::config::Config;
use crate::views::table::{display_tasks, ViewTask};
use chrono::NaiveDate;

pub async fn list_tasks(
    repo: &impl Repository,
    command: ListCommand,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    let filter = TaskFilter {
        completed: command.completed,
        category_id: command.category,
        schedule_type: command.schedule,
        habit_type: command.habit,
        overdue_only: command.overdue,
    };
    let pagination = pagination(&command.page, config);

    let tasks = repo.find_tasks(&filter, pagination).await?;
    let total = repo.count_tasks(&filter).await?;
    let categories = repo.find_categories().await?;

    let page = Page::new(ViewTask::from_tasks(tasks, &categories), total, pagination);
    display_tasks(&page.items, today);
    print_page_footer(&page);

    Ok(())
}
