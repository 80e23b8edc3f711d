/*!
 * Error types for the subshape engine.
 *
 * Almost everything in this crate degrades gracefully with a diagnostic; the
 * typed errors here cover the one genuinely reportable failure class (a
 * translation reply that cannot be reconstructed) plus an umbrella type for
 * library consumers, using the thiserror crate for ergonomic definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised when validating a translation collaborator's reply
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// The reply was not a JSON object
    #[error("Translation reply is not a JSON object")]
    NotAnObject,

    /// The reply carried `"success": false` (or no success flag at all)
    #[error("Translation marked as unsuccessful: {comment}")]
    MarkedUnsuccessful {
        /// The collaborator's comment, if any
        comment: String,
    },

    /// One or more input indices are absent from the reply
    #[error("Translation reply is missing segment(s): {}", indices.join(", "))]
    MissingSegments {
        /// The missing indices, in numeric order
        indices: Vec<String>,
    },

    /// A segment value was not a plain string
    #[error("Segment {index} should be a text string, got {found}")]
    WrongValueType {
        /// Index of the offending segment
        index: String,
        /// JSON type actually found
        found: String,
    },
}

/// Main engine error type that wraps all other errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error validating a translation exchange
    #[error("Exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility conversions for error propagation
impl From<anyhow::Error> for EngineError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
