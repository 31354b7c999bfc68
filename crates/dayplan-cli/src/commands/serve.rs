use anyhow::Result;
use dayplan_core::repository::SqliteRepository;

use crate::api;
use crate::cli::ServeCommand;
use crate::config::Config;

pub async fn serve(repo: SqliteRepository, command: ServeCommand, config: &Config) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(host) = command.host {
        server.host = host;
    }
    if let Some(port) = command.port {
        server.port = port;
    }

    let state = api::AppState::new(repo, config);
    api::serve(state, &server).await
}
