use anyhow::Result;
use chrono::NaiveDate;
use dayplan_core::error::CoreError;
use dayplan_core::repository::Repository;

use crate::cli::ShowCommand;
use crate::views::table::display_task_details;

pub async fn show_task(repo: &impl Repository, command: ShowCommand, today: NaiveDate) -> Result<()> {
    let details = repo
        .find_task_details(command.id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("task {}", command.id)))?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        display_task_details(&details, today);
    }
    Ok(())
}
