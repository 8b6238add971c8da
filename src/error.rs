//! Error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while loading or regenerating a timetable.
///
/// Placement shortfalls are not errors; they are reported in
/// [`Schedule::shortfalls`](crate::models::Schedule::shortfalls).
#[derive(Debug, Error)]
pub enum TimetableError {
    /// The input failed validation. Holds every problem found.
    #[error("invalid input: {}", join_errors(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid TOML for the expected layout.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl TimetableError {
    /// Validation errors, if this is an input error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            TimetableError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
