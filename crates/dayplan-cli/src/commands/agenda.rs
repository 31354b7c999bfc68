use anyhow::Result;
use chrono::NaiveDate;
use dayplan_core::models::Task;
use dayplan_core::repository::Repository;

use crate::views::table::{display_tasks, ViewTask};

pub async fn overdue_tasks(repo: &impl Repository, limit: i64, today: NaiveDate) -> Result<()> {
    let tasks = repo.find_overdue_tasks(limit).await?;
    show(repo, tasks, today).await
}

pub async fn today_tasks(repo: &impl Repository, today: NaiveDate) -> Result<()> {
    let tasks = repo.find_today_tasks().await?;
    show(repo, tasks, today).await
}

pub async fn upcoming_tasks(
    repo: &impl Repository,
    days: u32,
    limit: i64,
    today: NaiveDate,
) -> Result<()> {
    let tasks = repo.find_upcoming_tasks(days, limit).await?;
    show(repo, tasks, today).await
}

async fn show(repo: &impl Repository, tasks: Vec<Task>, today: NaiveDate) -> Result<()> {
    let categories = repo.find_categories().await?;
    display_tasks(&ViewTask::from_tasks(tasks, &categories), today);
    Ok(())
}
