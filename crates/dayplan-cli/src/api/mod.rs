//! HTTP API for the planner

pub mod handlers;
pub mod query;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;

use crate::config::ServerConfig;
use anyhow::Context;

/// Binds `server.host:server.port` and serves until the process is stopped.
pub async fn serve(state: AppState, server: &ServerConfig) -> anyhow::Result<()> {
    let app = create_router(state, server.cors_permissive);
    let addr = format!("{}:{}", server.host, server.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
