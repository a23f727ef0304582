//! Error types for control-plane component adapters
//!
//! Only adapt functions fail. Predicates and keep-manifest rules are total and
//! fall back to a documented default instead of returning an error.

use thiserror::Error;

/// Errors raised while adapting a derived resource
#[derive(Debug, Error)]
pub enum ComponentError {
    /// An adapt function could not compute or write the desired state
    #[error("failed to adapt {resource}: {message}")]
    Adapt {
        /// Name of the resource being adapted
        resource: String,
        /// Description of what failed
        message: String,
    },

    /// A manifest did not have the kind its adapter was registered for
    #[error("manifest {manifest} has kind {found}, adapter expects {expected}")]
    UnexpectedKind {
        /// Manifest file name the adapter is registered under
        manifest: String,
        /// Kind the adapter works on
        expected: String,
        /// Kind found on the manifest
        found: String,
    },

    /// A manifest could not be converted to or from its typed form
    #[error("serialization error for manifest {manifest}: {message}")]
    Serialization {
        /// Manifest file name
        manifest: String,
        /// Description of what failed
        message: String,
    },

    /// Error from the shared HostedControlPlane types
    #[error(transparent)]
    Common(#[from] hcp_common::Error),
}

impl ComponentError {
    /// Create an adapt error for the named resource
    pub fn adapt(resource: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Adapt {
            resource: resource.into(),
            message: msg.into(),
        }
    }

    /// Create a kind mismatch error
    pub fn unexpected_kind(
        manifest: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::UnexpectedKind {
            manifest: manifest.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a serialization error for the named manifest
    pub fn serialization(manifest: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            manifest: manifest.into(),
            message: msg.into(),
        }
    }
}
