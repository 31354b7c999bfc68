use anyhow::Result;
use dayplan_core::error::CoreError;
use dayplan_core::repository::Repository;
use owo_colors::OwoColorize;

pub async fn complete_task(repo: &impl Repository, id: i64) -> Result<()> {
    let task = repo
        .mark_completed(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("task {}", id)))?;
    println!("{} Completed task: '{}'", "✓".green().bold(), task.title);
    Ok(())
}

pub async fn reopen_task(repo: &impl Repository, id: i64) -> Result<()> {
    let task = repo
        .mark_incomplete(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("task {}", id)))?;
    println!("{} Reopened task: '{}'", "↺".yellow().bold(), task.title);
    Ok(())
}
