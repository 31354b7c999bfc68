use chrono::{Duration, NaiveDate};
use chrono_humanize::{Accuracy, HumanTime, Tense};
use comfy_table::{Attribute, Cell, Color, Row, Table};
use dayplan_core::models::{Category, HabitType, ScheduleType, Task, TaskDetails};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ViewTask {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub start_date: Option<NaiveDate>,
    pub time: Option<String>,
    pub schedule_type: Option<ScheduleType>,
    pub habit_type: Option<HabitType>,
    pub category_name: Option<String>,
}

impl ViewTask {
    /// Builds display rows, resolving category names from `categories`.
    pub fn from_tasks(tasks: Vec<Task>, categories: &[Category]) -> Vec<ViewTask> {
        let names: HashMap<i64, &str> = categories.iter().map(|c| (c.id, c.name.as_str())).collect();
        tasks
            .into_iter()
            .map(|task| {
                let category_name = task
                    .category_id
                    .and_then(|id| names.get(&id).map(|name| name.to_string()));
                ViewTask {
                    time: time_range(&task),
                    id: task.id,
                    title: task.title,
                    completed: task.completed,
                    start_date: task.start_date,
                    schedule_type: task.schedule_type,
                    habit_type: task.habit_type,
                    category_name,
                }
            })
            .collect()
    }
}

fn time_range(task: &Task) -> Option<String> {
    if task.all_day {
        return Some("all day".to_string());
    }
    match (task.start_time, task.end_time) {
        (Some(start), Some(end)) => Some(format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))),
        (Some(start), None) => Some(start.format("%H:%M").to_string()),
        (None, Some(end)) => Some(format!("until {}", end.format("%H:%M"))),
        (None, None) => None,
    }
}

/// "today", "tomorrow", "in 3 days", "2 weeks ago" and so on.
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        days => {
            let tense = if days > 0 { Tense::Future } else { Tense::Past };
            HumanTime::from(Duration::days(days.abs())).to_text_en(Accuracy::Rough, tense)
        }
    }
}

pub fn display_tasks(tasks: &[ViewTask], today: NaiveDate) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Start", "Time", "Schedule", "Habit", "Category", "Done"]);

    for task in tasks {
        let overdue = !task.completed && task.start_date.is_some_and(|date| date < today);

        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));

        let mut title_cell = Cell::new(&task.title);
        if task.completed {
            title_cell = title_cell.add_attribute(Attribute::CrossedOut).fg(Color::DarkGrey);
        } else if overdue {
            title_cell = title_cell.fg(Color::Red).add_attribute(Attribute::Bold);
        }
        row.add_cell(title_cell);

        let start_cell = match task.start_date {
            Some(date) => {
                let text = format!("{} ({})", date.format("%Y-%m-%d"), relative_day(date, today));
                if overdue {
                    Cell::new(text).fg(Color::Red)
                } else if date == today && !task.completed {
                    Cell::new(text).fg(Color::Yellow)
                } else {
                    Cell::new(text)
                }
            }
            None => Cell::new("-"),
        };
        row.add_cell(start_cell);

        row.add_cell(Cell::new(task.time.as_deref().unwrap_or("-")));
        row.add_cell(Cell::new(task.schedule_type.map_or("-", |s| s.as_str())));
        row.add_cell(Cell::new(task.habit_type.map_or("-", |h| h.as_str())));
        row.add_cell(Cell::new(task.category_name.as_deref().unwrap_or("-")));
        row.add_cell(if task.completed {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no")
        });
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Created At"]);

    for category in categories {
        let mut row = Row::new();
        row.add_cell(Cell::new(category.id));
        row.add_cell(Cell::new(&category.name));
        row.add_cell(Cell::new(category.created_at.format("%Y-%m-%d %H:%M").to_string()));
        table.add_row(row);
    }

    println!("{table}");
}

/// Two-column key/value view of one task.
pub fn display_task_details(details: &TaskDetails, today: NaiveDate) {
    let task = &details.task;
    let mut table = Table::new();

    let mut add = |label: &str, value: String| {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    };
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    add("ID", task.id.to_string());
    add("Title", task.title.clone());
    add("Description", or_dash(task.description.clone()));
    add("Completed", if task.completed { "yes" } else { "no" }.to_string());
    add(
        "Start date",
        or_dash(task.start_date.map(|d| format!("{} ({})", d, relative_day(d, today)))),
    );
    add("Time", or_dash(time_range(task)));
    add("Schedule", or_dash(task.schedule_type.map(|s| s.to_string())));
    add(
        "Duration",
        or_dash(match (task.unit_value, task.unit) {
            (Some(value), Some(unit)) => Some(format!("{} {}", value, unit)),
            (Some(value), None) => Some(value.to_string()),
            (None, Some(unit)) => Some(unit.to_string()),
            (None, None) => None,
        }),
    );
    add("Habit", or_dash(task.habit_type.map(|h| h.to_string())));
    add(
        "Category",
        or_dash(details.category.as_ref().map(|c| format!("{} (#{})", c.name, c.id))),
    );
    add("Notes", or_dash(task.notes.clone()));
    add("Created", task.created_at.format("%Y-%m-%d %H:%M").to_string());
    add("Updated", task.updated_at.format("%Y-%m-%d %H:%M").to_string());

    if task.is_overdue(today) {
        add("Status", "overdue".to_string());
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn task(id: i64) -> Task {
        Task {
            id,
            title: format!("Task {}", id),
            description: None,
            completed: false,
            schedule_type: None,
            unit: None,
            unit_value: None,
            start_date: None,
            start_time: None,
            end_time: None,
            all_day: false,
            habit_type: None,
            notes: None,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(0, "today")]
    #[case(1, "tomorrow")]
    #[case(-1, "yesterday")]
    #[case(3, "in 3 days")]
    #[case(-3, "3 days ago")]
    fn relative_day_labels(#[case] offset: i64, #[case] expected: &str) {
        let date = today() + Duration::days(offset);
        assert_eq!(relative_day(date, today()), expected);
    }

    #[test]
    fn category_names_are_resolved() {
        let categories = vec![Category {
            id: 4,
            name: "Fitness".to_string(),
            created_at: Utc::now(),
        }];
        let mut with_category = task(1);
        with_category.category_id = Some(4);
        let mut dangling = task(2);
        dangling.category_id = Some(99);

        let views = ViewTask::from_tasks(vec![with_category, dangling], &categories);
        assert_eq!(views[0].category_name.as_deref(), Some("Fitness"));
        assert_eq!(views[1].category_name, None);
    }

    #[test]
    fn time_range_formats() {
        let mut t = task(1);
        t.start_time = NaiveTime::from_hms_opt(9, 0, 0);
        t.end_time = NaiveTime::from_hms_opt(9, 30, 0);
        assert_eq!(time_range(&t).as_deref(), Some("09:00-09:30"));

        t.all_day = true;
        assert_eq!(time_range(&t).as_deref(), Some("all day"));
    }
}
