//! Error types for the liftplan_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for liftplan_core operations
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

    /// Catalog or routine validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// An exercise ran out of reachable weight steps during advancement
    #[error(
        "no further progression for '{exercise}' (workout {workout}, day {day}): \
         weight window exhausted"
    )]
    ProgressionExhausted {
        exercise: String,
        workout: usize,
        day: u32,
    },

    /// A workout could not reach the target growth rate within the cap
    #[error(
        "progression stalled in workout {workout} on day {day} after {attempts} \
         advancement attempts"
    )]
    ProgressionStalled {
        workout: usize,
        day: u32,
        attempts: u32,
    },
}
