//! Autocomplete error types

use thiserror::Error;

/// Errors raised when an autocomplete engine is built or fed values that
/// break its contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutocompleteError {
    /// A required projection or collaborator was not supplied
    #[error("missing required projection: {0}")]
    MissingProjection(&'static str),

    /// A value of the wrong mode was supplied (single vs. multiple)
    #[error("value mode mismatch: engine is {}", mode_name(.multiple))]
    ValueModeMismatch {
        /// Whether the engine runs in multi-select mode
        multiple: bool,
    },
}

fn mode_name(multiple: &bool) -> &'static str {
    if *multiple {
        "multi-select but value is single"
    } else {
        "single-select but value is multiple"
    }
}

/// Result type for autocomplete operations
pub type Result<T> = std::result::Result<T, AutocompleteError>;
