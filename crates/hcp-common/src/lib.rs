//! Common types for HostedControlPlane components: the CRD, errors, and
//! annotation keys shared by every derived-resource reconciler.

#![deny(missing_docs)]

pub mod crd;
pub mod error;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Annotation carrying the `namespace/name` of the HostedCluster that owns a
/// control plane.
///
/// Copied onto derived resources so changes made outside the operator can be
/// traced back and reconciled.
pub const HOSTED_CLUSTER_ANNOTATION: &str = "hypershift.openshift.io/cluster";

/// Annotation that turns off PKI reconciliation for a control plane.
///
/// When present, certificate and key Secrets are neither reconciled nor
/// deleted, so user-provided material stays in place.
pub const DISABLE_PKI_RECONCILIATION_ANNOTATION: &str =
    "hypershift.openshift.io/disable-pki-reconciliation";
