use anyhow::Result;
use dayplan_core::error::CoreError;
use dayplan_core::repository::Repository;
use dialoguer::Confirm;

use crate::cli::DeleteCommand;

pub async fn delete_task(repo: &impl Repository, command: DeleteCommand) -> Result<()> {
    let task = repo
        .find_task_by_id(command.id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("task {}", command.id)))?;

    if !command.force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete task '{}'?", task.title))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmed {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    // Someone else may have removed it since the lookup.
    if !repo.delete_task(task.id).await? {
        return Err(CoreError::NotFound(format!("task {}", task.id)).into());
    }
    println!("Deleted task: '{}'", task.title);
    Ok(())
}
