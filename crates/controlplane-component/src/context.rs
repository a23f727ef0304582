//! Per-cycle view of the control plane handed to every adapter

use std::sync::Arc;

use hcp_common::crd::{AvailabilityPolicy, HostedControlPlane, PlatformType};

/// Read-only snapshot of the control plane for one reconcile cycle
///
/// Built by the reconciliation engine and passed by reference to every
/// predicate, keep-manifest rule and adapt function, so all of them observe the
/// same state. The HostedControlPlane is behind an `Arc` so contexts for
/// concurrent cycles can share one fetched object.
#[derive(Clone, Debug)]
pub struct WorkloadContext {
    /// The owning HostedControlPlane
    pub hcp: Arc<HostedControlPlane>,
    /// Treat every adapter as enabled regardless of its predicate
    ///
    /// Used when rendering the full set of manifests, e.g. for every platform
    /// at once.
    pub skip_predicate: bool,
}

impl WorkloadContext {
    /// Create a context for the given control plane
    pub fn new(hcp: impl Into<Arc<HostedControlPlane>>) -> Self {
        Self {
            hcp: hcp.into(),
            skip_predicate: false,
        }
    }

    /// Set whether predicates are bypassed.
    pub fn with_skip_predicate(mut self, skip: bool) -> Self {
        self.skip_predicate = skip;
        self
    }

    /// Platform type of the control plane
    pub fn platform_type(&self) -> PlatformType {
        self.hcp.platform_type()
    }

    /// Controller availability policy of the control plane
    pub fn availability_policy(&self) -> AvailabilityPolicy {
        self.hcp.controller_availability_policy()
    }

    /// Returns true if the control plane carries the annotation
    pub fn has_annotation(&self, key: &str) -> bool {
        self.hcp.has_annotation(key)
    }
}
