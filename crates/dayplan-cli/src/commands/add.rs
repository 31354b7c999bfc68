use anyhow::Result;
use chrono::Local;
use dayplan_core::models::NewTaskData;
use dayplan_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;
use crate::parser::{parse_date, parse_time};

pub async fn add_task(repo: &impl Repository, command: AddCommand) -> Result<()> {
    let fields = command.fields;
    let now = Local::now();

    let data = NewTaskData {
        title: command.title,
        description: fields.description,
        completed: false,
        schedule_type: fields.schedule,
        unit: fields.unit,
        unit_value: fields.unit_value,
        start_date: fields.date.as_deref().map(|d| parse_date(d, now)).transpose()?,
        start_time: fields.start.as_deref().map(parse_time).transpose()?,
        end_time: fields.end.as_deref().map(parse_time).transpose()?,
        all_day: command.all_day,
        habit_type: fields.habit,
        notes: fields.notes,
        category_id: fields.category,
    };

    let task = repo.add_task(data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        task.title.bright_white().bold()
    );
    println!("  {} Task ID: {}", "→".style(info_style), task.id.to_string().yellow());
    if let Some(date) = task.start_date {
        println!("  {} Starts: {}", "→".style(info_style), date.to_string().cyan());
    }

    Ok(())
}
