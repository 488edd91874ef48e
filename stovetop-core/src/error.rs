use thiserror::Error;

use crate::ai::AiError;
use crate::store::StoreError;

/// Why the model's output could not be turned into a recipe draft.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OutputError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Expected a JSON object at the top level")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

/// Failure of one recipe generation run.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The model answered with the refusal sentinel: the ingredients were
    /// unusable.
    #[error("Generation service refused the ingredients")]
    Refused,

    #[error("Generation service returned malformed output: {0}")]
    MalformedOutput(#[from] OutputError),

    #[error("Generation service call failed: {0}")]
    Upstream(#[from] AiError),

    #[error("Failed to persist recipe: {0}")]
    Persistence(#[from] StoreError),
}
