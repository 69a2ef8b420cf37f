//! Error types for myt-tools.

use thiserror::Error;

/// Main error type for myt operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied malformed input
    #[error("{0}")]
    Validation(String),

    /// Workflow tables or path search produced an inconsistent state
    #[error("Workflow error: {0}")]
    Workflow(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Stable type name reported in `error_type` fields of tool results.
    pub fn type_name(&self) -> &'static str {
        match self {
            Error::Validation(_) => "ValidationError",
            Error::Workflow(_) => "InternalError",
            Error::Config(_) => "ConfigError",
            Error::Serialization(_) => "SerializationError",
            Error::Io(_) => "IoError",
            Error::Other(_) => "Error",
        }
    }
}

/// Result type alias for myt operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = Error::Validation("from_status cannot be empty".to_string());
        assert_eq!(err.to_string(), "from_status cannot be empty");
        assert_eq!(err.type_name(), "ValidationError");
    }

    #[test]
    fn test_workflow_error_reports_internal() {
        let err = Error::Workflow("broken predecessor chain".to_string());
        assert_eq!(err.type_name(), "InternalError");
        assert!(err.to_string().contains("broken predecessor chain"));
    }

    #[test]
    fn test_from_serde_json() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.type_name(), "SerializationError");
    }
}
