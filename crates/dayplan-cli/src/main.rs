use clap::Parser;
use dayplan_core::db;
use dayplan_core::error::CoreError;
use dayplan_core::repository::SqliteRepository;
use owo_colors::{OwoColorize, Style};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod cli;
mod commands;
mod config;
mod parser;
mod views;

use cli::{CategoryCommand, Commands};

/// Verbose for the server, quiet for one-shot commands. `RUST_LOG` wins.
fn init_tracing(serving: bool) {
    let default_filter = if serving {
        "info,dayplan_core=debug,tower_http=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    init_tracing(matches!(cli.command, Commands::Serve(_)));

    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);
    let today = repository.today();

    let result = match cli.command {
        Commands::Add(command) => commands::add::add_task(&repository, command).await,
        Commands::List(command) => {
            commands::list::list_tasks(&repository, command, &config, today).await
        }
        Commands::Show(command) => commands::show::show_task(&repository, command, today).await,
        Commands::Edit(command) => commands::edit::edit_task(&repository, command).await,
        Commands::Done(command) => commands::complete::complete_task(&repository, command.id).await,
        Commands::Undo(command) => commands::complete::reopen_task(&repository, command.id).await,
        Commands::Delete(command) => commands::delete::delete_task(&repository, command).await,
        Commands::Search(command) => {
            commands::search::search_tasks(&repository, command, &config, today).await
        }
        Commands::Overdue(args) => {
            commands::agenda::overdue_tasks(&repository, args.limit, today).await
        }
        Commands::Today => commands::agenda::today_tasks(&repository, today).await,
        Commands::Upcoming(command) => {
            let days = command.days.unwrap_or(config.upcoming_days);
            commands::agenda::upcoming_tasks(&repository, days, command.limit, today).await
        }
        Commands::Category(CategoryCommand { action }) => {
            commands::category::category_command(&repository, action, &config, today).await
        }
        Commands::Serve(command) => commands::serve::serve(repository, command, &config).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::Validation(errors)) => {
            eprintln!("{} Validation failed:", "Error:".style(error_style));
            for error in errors.errors() {
                eprintln!("  {} {}", error.field.yellow(), error.message);
            }
        }
        Some(CoreError::NotFound(what)) => {
            eprintln!("{} Not found: {}", "Error:".style(error_style), what);
        }
        Some(CoreError::Constraint(msg)) => {
            eprintln!("{} {}", "Error:".style(error_style), msg);
        }
        Some(CoreError::InvalidInput(msg)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), msg);
        }
        Some(other) => {
            tracing::error!(error = ?other, "command failed");
            eprintln!("{} {}", "Error:".style(error_style), other);
        }
        None => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}
