//! Error types for the routine_core library.

use crate::validator::RoutineInvariantViolation;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for routine_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog data failed integrity checks; nothing can be generated from it
    #[error("Catalog load error: {}", .0.join("; "))]
    CatalogLoad(Vec<String>),

    /// Preferences are malformed or out of range; the caller should re-prompt
    #[error("Invalid preferences: {field} {constraint}")]
    InvalidPreferences {
        field: &'static str,
        constraint: String,
    },

    /// No exercise with the given id
    #[error("Exercise not found: {0}")]
    NotFound(String),

    /// The validator rejected composer output. Details stay in the source.
    #[error("Internal error while generating routine")]
    Internal(#[source] RoutineInvariantViolation),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, constraint: impl Into<String>) -> Self {
        Error::InvalidPreferences {
            field,
            constraint: constraint.into(),
        }
    }

    /// True for errors the user can fix by changing their input
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Error::InvalidPreferences { .. })
    }

    /// True for composer defects caught by the validator
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}
