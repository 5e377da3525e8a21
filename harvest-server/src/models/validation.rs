//! Input validation errors shared by models, settings and request extractors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Value outside a closed set (roles, investment statuses)
    #[error("unknown {field} '{value}'")]
    InvalidVariant { field: &'static str, value: String },

    /// Request body could not be decoded into the expected shape
    #[error("malformed request body: {detail}")]
    MalformedBody { detail: String },
}
