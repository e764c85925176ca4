//! Error types and error handling

use thiserror::Error;

/// Generator error type
#[derive(Debug, Error)]
pub enum CrudError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unsupported database URL scheme
    #[error("Unsupported database URL: {0} (expected sqlite:// or postgres://)")]
    UnsupportedDatabase(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Terminal prompt error
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// No module in the registry matches the requested filter
    #[error("No module available: {0}")]
    NoModules(String),

    /// Module id not present in the registry
    #[error("Unknown module: '{0}'")]
    UnknownModule(String),

    /// Table not present in the schema catalog
    #[error("The database table '{0}' does not exist")]
    UnknownTable(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for CrudError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl From<figment::Error> for CrudError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, CrudError>;
