//! HTTP handlers over the task store

use super::query::{
    CategoryTasksQuery, GetTaskQuery, LimitQuery, PaginationParams, SearchQuery, TaskListQuery,
    UpcomingQuery,
};
use crate::config::Config;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dayplan_core::error::CoreError;
use dayplan_core::models::{Category, NewCategory, NewTaskData, Task, UpdateMode, UpdateTaskData};
use dayplan_core::query::{Page, TaskFilter};
use dayplan_core::repository::{
    CategoryRepository, SqliteRepository, TaskQueryRepository, TaskRepository,
};
use dayplan_core::validation::ValidationErrors;
use serde::Serialize;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub repo: SqliteRepository,
    pub page_size: i64,
    pub upcoming_days: u32,
}

impl AppState {
    pub fn new(repo: SqliteRepository, config: &Config) -> Self {
        Self {
            repo,
            page_size: config.page_size,
            upcoming_days: config.upcoming_days,
        }
    }
}

type Extracted<T, R> = Result<T, R>;

// ============================================================================
// Health check
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Categories
// ============================================================================

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.repo.find_categories().await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    body: Extracted<Json<NewCategory>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let Json(req) = body?;
    let category = state.repo.add_category(req.name).await?;
    tracing::info!(category_id = category.id, name = %category.name, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// Tasks of one category, newest first
pub async fn list_category_tasks(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
    query: Extracted<Query<CategoryTasksQuery>, QueryRejection>,
) -> Result<Json<Page<Task>>, AppError> {
    let Path(category_id) = path?;
    let Query(query) = query?;
    let params = PaginationParams {
        limit: query.limit,
        offset: query.offset,
    };
    params.validate().map_err(AppError::BadRequest)?;
    let pagination = params.to_pagination(state.page_size);

    let tasks = state
        .repo
        .find_tasks_by_category(category_id, query.completed, pagination)
        .await?;
    let filter = TaskFilter {
        completed: query.completed,
        ..TaskFilter::category(category_id)
    };
    let total = state.repo.count_tasks(&filter).await?;

    Ok(Json(Page::new(tasks, total, pagination)))
}

// ============================================================================
// Tasks
// ============================================================================

/// List tasks with filters and pagination
pub async fn list_tasks(
    State(state): State<AppState>,
    query: Extracted<Query<TaskListQuery>, QueryRejection>,
) -> Result<Json<Page<Task>>, AppError> {
    let Query(query) = query?;
    let params = query.pagination();
    params.validate().map_err(AppError::BadRequest)?;

    let filter = query.filter();
    let pagination = params.to_pagination(state.page_size);
    let tasks = state.repo.find_tasks(&filter, pagination).await?;
    let total = state.repo.count_tasks(&filter).await?;

    Ok(Json(Page::new(tasks, total, pagination)))
}

pub async fn create_task(
    State(state): State<AppState>,
    body: Extracted<Json<NewTaskData>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let Json(data) = body?;
    let task = state.repo.add_task(data).await?;
    tracing::info!(task_id = task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task, optionally with its category expanded inline
pub async fn get_task(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
    query: Extracted<Query<GetTaskQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Path(task_id) = path?;
    let Query(query) = query?;

    if query.include_category.unwrap_or(false) {
        let details = state
            .repo
            .find_task_details(task_id)
            .await?
            .ok_or_else(|| task_not_found(task_id))?;
        Ok(Json(details).into_response())
    } else {
        let task = state
            .repo
            .find_task_by_id(task_id)
            .await?
            .ok_or_else(|| task_not_found(task_id))?;
        Ok(Json(task).into_response())
    }
}

/// Apply only the supplied fields; `null` clears a nullable field
pub async fn patch_task(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
    body: Extracted<Json<UpdateTaskData>, JsonRejection>,
) -> Result<Json<Task>, AppError> {
    update(state, path?, body?, UpdateMode::Partial).await
}

/// Replace the whole task; missing fields revert to their defaults
pub async fn replace_task(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
    body: Extracted<Json<UpdateTaskData>, JsonRejection>,
) -> Result<Json<Task>, AppError> {
    update(state, path?, body?, UpdateMode::Full).await
}

async fn update(
    state: AppState,
    Path(task_id): Path<i64>,
    Json(data): Json<UpdateTaskData>,
    mode: UpdateMode,
) -> Result<Json<Task>, AppError> {
    let task = state
        .repo
        .update_task(task_id, data, mode)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(task_id) = path?;
    if state.repo.delete_task(task_id).await? {
        tracing::info!(task_id, "task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(task_not_found(task_id))
    }
}

pub async fn complete_task(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
) -> Result<Json<Task>, AppError> {
    let Path(task_id) = path?;
    let task = state
        .repo
        .mark_completed(task_id)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;
    Ok(Json(task))
}

pub async fn incomplete_task(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
) -> Result<Json<Task>, AppError> {
    let Path(task_id) = path?;
    let task = state
        .repo
        .mark_incomplete(task_id)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;
    Ok(Json(task))
}

pub async fn overdue_tasks(
    State(state): State<AppState>,
    query: Extracted<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, AppError> {
    let Query(query) = query?;
    let limit = checked_limit(query.limit, state.page_size)?;
    Ok(Json(state.repo.find_overdue_tasks(limit).await?))
}

pub async fn today_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(state.repo.find_today_tasks().await?))
}

pub async fn upcoming_tasks(
    State(state): State<AppState>,
    query: Extracted<Query<UpcomingQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, AppError> {
    let Query(query) = query?;
    let limit = checked_limit(query.limit, state.page_size)?;
    let days = query.days.unwrap_or(state.upcoming_days);
    Ok(Json(state.repo.find_upcoming_tasks(days, limit).await?))
}

/// Case-insensitive search over title, description and notes
pub async fn search_tasks(
    State(state): State<AppState>,
    query: Extracted<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Page<Task>>, AppError> {
    let Query(query) = query?;
    let term = query.q.trim();
    if term.is_empty() {
        return Err(AppError::BadRequest("query parameter 'q' is required".to_string()));
    }
    let params = PaginationParams {
        limit: query.limit,
        offset: query.offset,
    };
    params.validate().map_err(AppError::BadRequest)?;
    let pagination = params.to_pagination(state.page_size);

    let tasks = state.repo.search_tasks(term, pagination).await?;
    let total = state.repo.count_search_results(term).await?;
    Ok(Json(Page::new(tasks, total, pagination)))
}

fn checked_limit(limit: Option<i64>, default: i64) -> Result<i64, AppError> {
    match limit {
        Some(limit) if limit < 1 => Err(AppError::BadRequest("limit must be at least 1".to_string())),
        Some(limit) => Ok(limit),
        None => Ok(default),
    }
}

fn task_not_found(task_id: i64) -> AppError {
    AppError::NotFound(format!("Task {} not found", task_id))
}

// ============================================================================
// Errors
// ============================================================================

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Validation(ValidationErrors),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": e.to_string() }),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, serde_json::json!({ "error": msg })),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({
                    "error": "Validation failed",
                    "fields": errors,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => AppError::Validation(errors),
            CoreError::NotFound(msg) => AppError::NotFound(msg),
            CoreError::Constraint(msg) => AppError::Conflict(msg),
            CoreError::InvalidInput(msg) => AppError::BadRequest(msg),
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use axum::Router;
    use chrono::NaiveDate;
    use dayplan_core::clock::FixedClock;
    use dayplan_core::db;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn test_app() -> (Router, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("api.db");
        let pool = db::establish_connection(db_path.to_str().unwrap()).await.unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let repo = SqliteRepository::with_clock(pool, FixedClock(today));
        let state = AppState::new(repo, &Config::default());
        (create_router(state, true), temp_dir)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create(app: &Router, body: Value) -> Value {
        let (status, task) = send(app, Method::POST, "/api/tasks", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{}", task);
        task
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _dir) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (app, _dir) = test_app().await;
        let created = create(
            &app,
            json!({
                "title": "Morning run",
                "schedule_type": "daily",
                "unit": "minutes",
                "unit_value": 30,
                "start_date": "2025-06-11",
                "start_time": "07:00:00",
                "end_time": "07:30:00",
                "habit_type": "health"
            }),
        )
        .await;
        assert_eq!(created["completed"], false);

        let id = created["id"].as_i64().unwrap();
        let (status, fetched) = send(&app, Method::GET, &format!("/api/tasks/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "Morning run");
        assert_eq!(fetched["unit"], "minutes");
        assert_eq!(fetched["start_date"], "2025-06-11");
        assert!(fetched.get("category").is_none());
    }

    #[tokio::test]
    async fn get_with_category_expands_it() {
        let (app, _dir) = test_app().await;
        let (status, category) =
            send(&app, Method::POST, "/api/categories", Some(json!({ "name": "Health" }))).await;
        assert_eq!(status, StatusCode::CREATED);

        let task = create(&app, json!({ "title": "Stretch", "category_id": category["id"] })).await;
        let uri = format!("/api/tasks/{}?include_category=true", task["id"]);
        let (status, details) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(details["title"], "Stretch");
        assert_eq!(details["category"]["name"], "Health");
    }

    #[tokio::test]
    async fn validation_failures_are_unprocessable_with_fields() {
        let (app, _dir) = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/tasks",
            Some(json!({
                "title": "Read",
                "unit": "minutes",
                "start_time": "09:00:00",
                "end_time": "08:00:00"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<&str> = body["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"unit_value"));
        assert!(fields.contains(&"end_time"));
    }

    #[tokio::test]
    async fn malformed_requests_are_bad_requests() {
        let (app, _dir) = test_app().await;

        let (status, _) = send(&app, Method::POST, "/api/tasks", Some(json!({ "title": 5 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/tasks?schedule_type=hourly", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/tasks/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/tasks?limit=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patch_changes_only_supplied_fields_and_null_clears() {
        let (app, _dir) = test_app().await;
        let task = create(&app, json!({ "title": "Journal", "notes": "before bed", "description": "daily" })).await;
        let uri = format!("/api/tasks/{}", task["id"]);

        let (status, updated) =
            send(&app, Method::PATCH, &uri, Some(json!({ "title": "Evening journal", "notes": null }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Evening journal");
        assert_eq!(updated["notes"], Value::Null);
        assert_eq!(updated["description"], "daily");
    }

    #[tokio::test]
    async fn put_requires_title_and_resets_missing_fields() {
        let (app, _dir) = test_app().await;
        let task = create(&app, json!({ "title": "Journal", "notes": "before bed" })).await;
        let uri = format!("/api/tasks/{}", task["id"]);

        let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "notes": "x" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"][0]["field"], "title");

        let (status, replaced) = send(&app, Method::PUT, &uri, Some(json!({ "title": "Replaced" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(replaced["title"], "Replaced");
        assert_eq!(replaced["notes"], Value::Null);
    }

    #[tokio::test]
    async fn update_of_missing_task_is_not_found() {
        let (app, _dir) = test_app().await;
        let (status, _) = send(&app, Method::PATCH, "/api/tasks/999", Some(json!({ "title": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_returns_no_content_then_not_found() {
        let (app, _dir) = test_app().await;
        let task = create(&app, json!({ "title": "Temp" })).await;
        let uri = format!("/api/tasks/{}", task["id"]);

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn completion_toggles() {
        let (app, _dir) = test_app().await;
        let task = create(&app, json!({ "title": "Water plants" })).await;

        let (status, done) =
            send(&app, Method::POST, &format!("/api/tasks/{}/complete", task["id"]), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(done["completed"], true);

        let (status, undone) =
            send(&app, Method::POST, &format!("/api/tasks/{}/incomplete", task["id"]), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(undone["completed"], false);

        let (status, _) = send(&app, Method::POST, "/api/tasks/999/complete", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_returns_paginated_envelope() {
        let (app, _dir) = test_app().await;
        for i in 0..5 {
            create(&app, json!({ "title": format!("Task {}", i), "habit_type": "learning" })).await;
        }
        create(&app, json!({ "title": "Other", "habit_type": "social" })).await;

        let (status, page) =
            send(&app, Method::GET, "/api/tasks?habit_type=learning&limit=2&offset=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["items"].as_array().unwrap().len(), 2);
        assert_eq!(page["total"], 5);
        assert_eq!(page["page"], 2);
        assert_eq!(page["page_size"], 2);
        assert_eq!(page["total_pages"], 3);
    }

    #[tokio::test]
    async fn date_views_use_the_clock() {
        let (app, _dir) = test_app().await;
        create(&app, json!({ "title": "Today", "start_date": "2025-06-10" })).await;
        create(&app, json!({ "title": "Friday", "start_date": "2025-06-13" })).await;
        create(&app, json!({ "title": "Far away", "start_date": "2025-07-30" })).await;

        let (status, today) = send(&app, Method::GET, "/api/tasks/today", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(today.as_array().unwrap().len(), 1);
        assert_eq!(today[0]["title"], "Today");

        let (_, upcoming) = send(&app, Method::GET, "/api/tasks/upcoming", None).await;
        let titles: Vec<&str> = upcoming
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Today", "Friday"]);

        let (_, same_day) = send(&app, Method::GET, "/api/tasks/upcoming?days=0", None).await;
        assert_eq!(same_day.as_array().unwrap().len(), 1);
        assert_eq!(same_day[0]["title"], "Today");

        let (status, overdue) = send(&app, Method::GET, "/api/tasks/overdue", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(overdue.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_is_paginated_and_requires_a_term() {
        let (app, _dir) = test_app().await;
        create(&app, json!({ "title": "Drink WATER" })).await;
        create(&app, json!({ "title": "Walk", "notes": "bring water bottle" })).await;
        create(&app, json!({ "title": "Read" })).await;

        let (status, page) = send(&app, Method::GET, "/api/tasks/search?q=water&limit=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 2);
        assert_eq!(page["items"].as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::GET, "/api/tasks/search", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn category_conflicts_and_listing() {
        let (app, _dir) = test_app().await;
        let (_, fitness) = send(&app, Method::POST, "/api/categories", Some(json!({ "name": "Fitness" }))).await;
        let (status, body) = send(&app, Method::POST, "/api/categories", Some(json!({ "name": "Fitness" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].is_string());

        let (status, _) = send(&app, Method::POST, "/api/tasks", Some(json!({ "title": "x", "category_id": 42 }))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        create(&app, json!({ "title": "Push-ups", "category_id": fitness["id"] })).await;
        create(&app, json!({ "title": "Squats", "category_id": fitness["id"] })).await;

        let uri = format!("/api/categories/{}/tasks", fitness["id"]);
        let (status, page) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 2);
        assert_eq!(page["items"][0]["title"], "Squats");

        let (_, categories) = send(&app, Method::GET, "/api/categories", None).await;
        assert_eq!(categories.as_array().unwrap().len(), 1);
    }
}
