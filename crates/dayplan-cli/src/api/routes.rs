//! API route definitions

use super::handlers::{self, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: AppState, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        // Categories
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/categories/{id}/tasks",
            get(handlers::list_category_tasks),
        )
        // Tasks
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route("/api/tasks/overdue", get(handlers::overdue_tasks))
        .route("/api/tasks/today", get(handlers::today_tasks))
        .route("/api/tasks/upcoming", get(handlers::upcoming_tasks))
        .route("/api/tasks/search", get(handlers::search_tasks))
        .route(
            "/api/tasks/{id}",
            get(handlers::get_task)
                .patch(handlers::patch_task)
                .put(handlers::replace_task)
                .delete(handlers::delete_task),
        )
        .route("/api/tasks/{id}/complete", post(handlers::complete_task))
        .route("/api/tasks/{id}/incomplete", post(handlers::incomplete_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_permissive {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}
