//! Error types shared by HostedControlPlane components
//!
//! Errors carry structured fields so a failed reconcile can be traced to the
//! field or resource kind that caused it.

use thiserror::Error;

/// Main error type for common HostedControlPlane operations
#[derive(Debug, Error)]
pub enum Error {
    /// A value in the HostedControlPlane spec could not be understood
    #[error("validation error for {field}: {message}")]
    Validation {
        /// The invalid field path (e.g., "spec.platform.type")
        field: String,
        /// Description of what's invalid
        message: String,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The resource kind being serialized (if known)
        kind: Option<String>,
    },
}

impl Error {
    /// Create a validation error for the given field path
    pub fn validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: None,
        }
    }

    /// Create a serialization error for a specific resource kind
    pub fn serialization_for(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
