//! Collabcut - a session-scoped collaboration model.
//!
//! This library provides the core of the `collab` CLI: projects, tasks,
//! documents, chat and the decision timeline held in a single in-memory
//! store, plus the form validation rules that guard every mutation.

pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod forms;
pub mod models;
pub mod notify;
pub mod routes;
pub mod session;
pub mod store;

use forms::ValidationErrors;

/// Library-level error type for Collabcut operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Not signed in: redirecting to {redirect}")]
    Unauthenticated { redirect: String },

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

/// Result type alias for Collabcut operations.
pub type Result<T> = std::result::Result<T, Error>;
