use anyhow::Result;
use chrono::NaiveDate;
use dayplan_core::query::Page;
use dayplan_core::repository::Repository;

use crate::cli::SearchCommand;
use crate::commands::{pagination, print_page_footer};
use crate::config::Config;
use crate::views::table::{display_tasks, ViewTask};

pub async fn search_tasks(
    repo: &impl Repository,
    command: SearchCommand,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    let pagination = pagination(&command.page, config);
    let tasks = repo.search_tasks(&command.term, pagination).await?;
    let total = repo.count_search_results(&command.term).await?;
    let categories = repo.find_categories().await?;

    let page = Page::new(ViewTask::from_tasks(tasks, &categories), total, pagination);
    display_tasks(&page.items, today);
    print_page_footer(&page);

    Ok(())
}
