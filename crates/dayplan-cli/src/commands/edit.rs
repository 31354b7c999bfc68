use anyhow::Result;
use chrono::Local;
use dayplan_core::error::CoreError;
use dayplan_core::models::{UpdateMode, UpdateTaskData};
use dayplan_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::cli::EditCommand;
use crate::parser::{parse_date, parse_time};

/// `Some(None)` when the matching `--*-clear` flag was given, otherwise the
/// supplied value (if any).
fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

pub fn build_update(command: &EditCommand) -> Result<UpdateTaskData> {
    let fields = command.fields.clone();
    let now = Local::now();

    let start_date = fields.date.as_deref().map(|d| parse_date(d, now)).transpose()?;
    let start_time = fields.start.as_deref().map(parse_time).transpose()?;
    let end_time = fields.end.as_deref().map(parse_time).transpose()?;

    let all_day = match (command.all_day, command.all_day_off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    Ok(UpdateTaskData {
        title: command.title.clone(),
        description: clearable(fields.description, command.description_clear),
        completed: None,
        schedule_type: clearable(fields.schedule, command.schedule_clear),
        unit: clearable(fields.unit, command.unit_clear),
        unit_value: clearable(fields.unit_value, command.unit_value_clear),
        start_date: clearable(start_date, command.date_clear),
        start_time: clearable(start_time, command.start_clear),
        end_time: clearable(end_time, command.end_clear),
        all_day,
        habit_type: clearable(fields.habit, command.habit_clear),
        notes: clearable(fields.notes, command.notes_clear),
        category_id: clearable(fields.category, command.category_clear),
    })
}

pub async fn edit_task(repo: &impl Repository, command: EditCommand) -> Result<()> {
    let mode = if command.full {
        UpdateMode::Full
    } else {
        UpdateMode::Partial
    };
    let update_data = build_update(&command)?;

    if mode == UpdateMode::Partial && update_data.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }

    let updated = repo
        .update_task(command.id, update_data, mode)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("task {}", command.id)))?;

    println!(
        "{} Updated task {}: {}",
        "✓".green().bold(),
        updated.id.to_string().yellow(),
        updated.title
    );
    Ok(())
}
