//! Error types for the AIShura core.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the conversational core.
///
/// Typed, structured error variants with automatic conversion from
/// common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize)]
pub enum AishuraError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A caller-supplied argument failed validation before any side effect
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A submission is already in flight for the session
    #[error("Submission already in flight for session '{session_id}'")]
    Busy { session_id: String },

    /// IO error (snapshot file operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion gateway error, already degraded to a fallback by the caller
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AishuraError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a Busy error
    pub fn busy(session_id: impl Into<String>) -> Self {
        Self::Busy {
            session_id: session_id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an InvalidArgument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a Busy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}

impl From<std::io::Error> for AishuraError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AishuraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AishuraError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<crate::gateway::GatewayError> for AishuraError {
    fn from(err: crate::gateway::GatewayError) -> Self {
        Self::Gateway(err.to_string())
    }
}

/// A type alias for `Result<T, AishuraError>`.
pub type Result<T> = std::result::Result<T, AishuraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_predicate() {
        let err = AishuraError::not_found("session", "abc");
        assert!(err.is_not_found());
        assert!(!err.is_busy());
        assert_eq!(err.to_string(), "Entity not found: session 'abc'");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AishuraError = io.into();
        assert!(matches!(err, AishuraError::Io { .. }));
    }
}
