//! # Dayplan Core Library
//!
//! Storage, validation and query logic for a personal task and habit planner.
//!
//! ## Features
//!
//! - **Tasks and Categories**: CRUD over tasks with optional scheduling
//!   metadata (schedule type, duration unit, start date and times, habit
//!   type) and named categories
//! - **Validation Profiles**: creation, partial-update and full-replacement
//!   rules with field-level error reporting
//! - **Date Views**: overdue, today and upcoming listings anchored on an
//!   injectable clock
//! - **Filtering and Search**: conjunctive filters, pagination and
//!   case-insensitive text search
//! - **Transactional Writes**: every mutation runs in its own SQLite
//!   transaction via sqlx
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`validation`]: Field and cross-field input rules
//! - [`query`]: Filters, pagination and result pages
//! - [`clock`]: Source of "today" for date-relative operations
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use dayplan_core::{
//!     db, models::NewTaskData,
//!     repository::{SqliteRepository, TaskRepository, TaskQueryRepository},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("dayplan.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let task = repo
//!         .add_task(NewTaskData {
//!             title: "Drink water".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created task #{}", task.id);
//!
//!     for task in repo.find_upcoming_tasks(7, 100).await? {
//!         println!("{} on {:?}", task.title, task.start_date);
//!     }
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod validation;
