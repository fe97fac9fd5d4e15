//! Error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by schedule generation.
///
/// A dead-end branch during search is not an error; it is handled by
/// backtracking and never reaches the caller.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The domain model is not self-consistent. Raised before any search.
    #[error("invalid domain model: {}", join_errors(.0))]
    InvalidModel(Vec<ValidationError>),

    /// Every attempt within the ceiling failed.
    #[error("no valid schedule found after {attempts} attempts")]
    Exhausted { attempts: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
