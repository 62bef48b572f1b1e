//! Error types for the intake_core library.

use crate::types::PatientId;
use std::collections::TryReserveError;
use std::fmt;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for intake_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A registration candidate violated a field constraint
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The waiting list or treatment history has no records
    #[error("The {0} is empty")]
    EmptyCollection(Collection),

    /// No waiting patient carries the requested id
    #[error("No waiting patient with id {0}")]
    NotFound(PatientId),

    /// Container storage could not grow
    #[error("Allocation failure: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the shell should abort instead of reporting and continuing.
    ///
    /// Only storage exhaustion is fatal; every other outcome is an expected
    /// condition the caller recovers from locally.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::AllocationFailure(_))
    }
}

/// Which container an `EmptyCollection` refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    Waiting,
    History,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Waiting => write!(f, "waiting list"),
            Collection::History => write!(f, "treatment history"),
        }
    }
}

/// Candidate field that failed validation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatientField {
    Id,
    Name,
    Age,
    Priority,
}

impl fmt::Display for PatientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatientField::Id => "id",
            PatientField::Name => "name",
            PatientField::Age => "age",
            PatientField::Priority => "priority",
        };
        f.write_str(name)
    }
}

/// The constraint a field broke
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Constraint {
    #[error("must be at least 1")]
    NotPositive,

    #[error("must not exceed {max}")]
    TooLarge { max: i64 },

    #[error("must not be empty")]
    Empty,

    #[error("must be at most {max} characters")]
    TooLong { max: usize },

    #[error("must be between {min} and {max}")]
    OutOfRange { min: i64, max: i64 },

    #[error("must be 1 (emergency), 2 (urgent) or 3 (normal)")]
    UnknownClass,

    #[error("is already in use by another patient")]
    Duplicate,
}

/// A rejected registration candidate
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field} {constraint}")]
pub struct ValidationError {
    pub field: PatientField,
    pub constraint: Constraint,
}

impl ValidationError {
    pub fn new(field: PatientField, constraint: Constraint) -> Self {
        Self { field, constraint }
    }
}
