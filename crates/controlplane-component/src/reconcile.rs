//! Per-cycle decision for a derived resource: apply, delete, or keep
//!
//! The adapter never talks to the API server. It tells the reconciliation
//! engine what to do with the resource and the engine performs the I/O.

use kube::{Resource, ResourceExt};
use tracing::{debug, trace};

use crate::adapter::GenericAdapter;
use crate::context::WorkloadContext;
use crate::Result;

/// What the reconciliation engine should do with a derived resource
#[derive(Clone, Debug, PartialEq)]
pub enum ManifestAction<K> {
    /// Create or update the resource with this adapted state
    Apply(K),
    /// The resource is disabled and any existing copy should be deleted
    Delete,
    /// The resource is disabled but an existing copy must be left untouched
    Keep,
}

impl<K> ManifestAction<K> {
    /// Returns true if the resource will be applied
    pub fn is_apply(&self) -> bool {
        matches!(self, Self::Apply(_))
    }

    /// Map the applied resource, leaving delete/keep decisions as they are
    pub fn map<T>(self, f: impl FnOnce(K) -> T) -> ManifestAction<T> {
        match self {
            Self::Apply(resource) => ManifestAction::Apply(f(resource)),
            Self::Delete => ManifestAction::Delete,
            Self::Keep => ManifestAction::Keep,
        }
    }
}

/// Whether a resource is enabled this cycle, honoring `skip_predicate`
pub(crate) fn is_enabled(ctx: &WorkloadContext, predicate: impl FnOnce() -> bool) -> bool {
    ctx.skip_predicate || predicate()
}

impl<K: Resource> GenericAdapter<K> {
    /// Decide what happens to `resource` this cycle.
    ///
    /// Enabled resources (predicate true, or `skip_predicate` set on the
    /// context) are adapted and returned for applying. Disabled resources are
    /// kept if the keep-manifest rule fires and deleted otherwise. The
    /// resource's name and namespace must already be set. Adapt errors are
    /// returned as-is for the caller to requeue.
    pub fn reconcile(&self, ctx: &WorkloadContext, mut resource: K) -> Result<ManifestAction<K>> {
        let name = resource.name_any();

        if !is_enabled(ctx, || self.predicate(ctx)) {
            if self.keep_manifest(ctx) {
                debug!(resource = %name, "resource disabled, keeping existing manifest");
                return Ok(ManifestAction::Keep);
            }
            debug!(resource = %name, "resource disabled, deleting");
            return Ok(ManifestAction::Delete);
        }

        self.adapt(ctx, &mut resource)?;
        trace!(resource = %name, "resource adapted");
        Ok(ManifestAction::Apply(resource))
    }
}
