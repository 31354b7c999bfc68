use clap::{Args, Parser, Subcommand};
use dayplan_core::models::{HabitType, ScheduleType, TimeUnit};

/// Plan tasks and habits from the terminal, or serve them over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks with optional filters
    List(ListCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Mark a task as completed
    Done(IdCommand),
    /// Mark a task as not completed
    Undo(IdCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Search titles, descriptions and notes
    Search(SearchCommand),
    /// Open tasks that started before today
    Overdue(LimitArgs),
    /// Tasks starting today
    Today,
    /// Open tasks starting between today and the next few days
    Upcoming(UpcomingCommand),
    /// Manage categories
    Category(CategoryCommand),
    /// Run the HTTP API
    Serve(ServeCommand),
}

#[derive(Args, Debug, Clone, Default)]
pub struct TaskFields {
    /// A longer description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Start date, e.g. "2025-06-10", "tomorrow" or "next friday"
    #[arg(long)]
    pub date: Option<String>,
    /// Start time (HH:MM)
    #[arg(long)]
    pub start: Option<String>,
    /// End time (HH:MM)
    #[arg(long)]
    pub end: Option<String>,
    /// How often the task repeats (daily, weekly, monthly, yearly, custom)
    #[arg(short, long)]
    pub schedule: Option<ScheduleType>,
    /// Duration unit (minutes, hours, days, weeks, months)
    #[arg(long)]
    pub unit: Option<TimeUnit>,
    /// Number of units, 1 to 10000
    #[arg(long)]
    pub unit_value: Option<i64>,
    /// Habit kind (health, productivity, learning, social, personal)
    #[arg(long)]
    pub habit: Option<HabitType>,
    /// Free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Category ID
    #[arg(short, long)]
    pub category: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    #[command(flatten)]
    pub fields: TaskFields,
    /// The task spans the whole day
    #[arg(long)]
    pub all_day: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Only completed (true) or open (false) tasks
    #[arg(long)]
    pub completed: Option<bool>,
    #[arg(short, long)]
    pub category: Option<i64>,
    #[arg(short, long)]
    pub schedule: Option<ScheduleType>,
    #[arg(long)]
    pub habit: Option<HabitType>,
    /// Only open tasks that started before today
    #[arg(long)]
    pub overdue: bool,
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Maximum number of tasks to show (defaults to `page_size` from config)
    #[arg(short, long)]
    pub limit: Option<i64>,
    /// Number of tasks to skip
    #[arg(long, default_value_t = 0)]
    pub offset: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    pub id: i64,
    /// Print the task as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: i64,

    /// Replace the whole task. Fields that are not given fall back to
    /// their defaults, and a title is required.
    #[arg(long)]
    pub full: bool,

    #[arg(short, long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub fields: TaskFields,

    #[arg(long, conflicts_with = "all_day_off")]
    pub all_day: bool,
    #[arg(long)]
    pub all_day_off: bool,

    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,
    #[arg(long, conflicts_with = "date")]
    pub date_clear: bool,
    #[arg(long, conflicts_with = "start")]
    pub start_clear: bool,
    #[arg(long, conflicts_with = "end")]
    pub end_clear: bool,
    #[arg(long, conflicts_with = "schedule")]
    pub schedule_clear: bool,
    #[arg(long, conflicts_with = "unit")]
    pub unit_clear: bool,
    #[arg(long, conflicts_with = "unit_value")]
    pub unit_value_clear: bool,
    #[arg(long, conflicts_with = "habit")]
    pub habit_clear: bool,
    #[arg(long, conflicts_with = "notes")]
    pub notes_clear: bool,
    #[arg(long, conflicts_with = "category")]
    pub category_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct IdCommand {
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchCommand {
    /// Text to look for, case-insensitive
    pub term: String,
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug, Clone)]
pub struct LimitArgs {
    #[arg(short, long, default_value_t = 100)]
    pub limit: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct UpcomingCommand {
    /// Days ahead of today to include (defaults to `upcoming_days` from config)
    #[arg(short, long)]
    pub days: Option<u32>,
    #[arg(short, long, default_value_t = 100)]
    pub limit: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub action: CategoryAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategoryAction {
    /// Create a category
    Add {
        name: String,
    },
    /// List all categories
    List,
    /// List the tasks in a category, newest first
    Tasks {
        id: i64,
        #[arg(long)]
        completed: Option<bool>,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct ServeCommand {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,
    /// Port to bind (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,
}
