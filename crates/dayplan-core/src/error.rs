use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Classifies a failed write. Uniqueness, foreign-key and check
    /// violations become `Constraint`; anything else stays a database error.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return CoreError::Constraint(format!("duplicate value ({})", db_err.message()));
            }
            if db_err.is_foreign_key_violation() {
                return CoreError::Constraint(format!(
                    "referenced record does not exist ({})",
                    db_err.message()
                ));
            }
            if db_err.is_check_violation() {
                return CoreError::Constraint(db_err.message().to_string());
            }
        }
        CoreError::Database(err)
    }
}
