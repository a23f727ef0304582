//! Ready-made options for policies shared across derived resources
//!
//! Predicate and keep-manifest helpers are total: a missing annotation or an
//! unknown platform resolves to the default documented on each helper.

use hcp_common::crd::{AvailabilityPolicy, PlatformType};
use hcp_common::HOSTED_CLUSTER_ANNOTATION;
use k8s_openapi::api::policy::v1::PodDisruptionBudget;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::{Resource, ResourceExt};

use crate::adapter::{with_adapt_function, with_keep_manifest, with_predicate, AdapterOption};
use crate::context::WorkloadContext;

// =============================================================================
// Adapt Helpers
// =============================================================================

/// Set disruption thresholds from the controller availability policy.
///
/// `SingleReplica` keeps one pod available, `HighlyAvailable` allows one pod to
/// be unavailable. Any other policy clears both thresholds. Exactly one of
/// `minAvailable`/`maxUnavailable` is set, the other is always cleared.
pub fn adapt_pod_disruption_budget() -> AdapterOption<PodDisruptionBudget> {
    with_adapt_function(|ctx: &WorkloadContext, pdb: &mut PodDisruptionBudget| {
        let (min_available, max_unavailable) = match ctx.availability_policy() {
            AvailabilityPolicy::SingleReplica => (Some(IntOrString::Int(1)), None),
            AvailabilityPolicy::HighlyAvailable => (None, Some(IntOrString::Int(1))),
            AvailabilityPolicy::Unspecified => (None, None),
        };

        let spec = pdb.spec.get_or_insert_with(Default::default);
        spec.min_available = min_available;
        spec.max_unavailable = max_unavailable;
        Ok(())
    })
}

/// Copy the HostedCluster annotation from the control plane onto the resource.
///
/// Lets changes made outside the operator be traced back to the owning
/// HostedCluster. Other annotations on the resource are preserved. A control
/// plane without the annotation yields an empty value.
pub fn set_hosted_cluster_annotation<K>() -> AdapterOption<K>
where
    K: Resource + 'static,
{
    with_adapt_function(|ctx: &WorkloadContext, resource: &mut K| {
        let value = ctx
            .hcp
            .annotation(HOSTED_CLUSTER_ANNOTATION)
            .unwrap_or_default()
            .to_string();
        resource
            .annotations_mut()
            .insert(HOSTED_CLUSTER_ANNOTATION.to_string(), value);
        Ok(())
    })
}

// =============================================================================
// Predicate Helpers
// =============================================================================

/// Disable the resource while the control plane carries `annotation`.
///
/// Presence alone disables, whatever the value. Enabled otherwise.
pub fn disable_if_annotation_exist<K>(annotation: impl Into<String>) -> AdapterOption<K>
where
    K: 'static,
{
    let annotation = annotation.into();
    with_predicate(move |ctx: &WorkloadContext| !ctx.has_annotation(&annotation))
}

/// Enable the resource only on the given platform.
pub fn enable_for_platform<K>(platform: PlatformType) -> AdapterOption<K>
where
    K: 'static,
{
    with_predicate(move |ctx: &WorkloadContext| ctx.platform_type() == platform)
}

// =============================================================================
// Keep-Manifest Helpers
// =============================================================================

/// Leave a disabled resource in place while the control plane carries
/// `annotation`.
///
/// Pair with [`disable_if_annotation_exist`] on the same key so that, e.g.,
/// with PKI reconciliation disabled user-provided Secrets are neither
/// overwritten nor deleted.
pub fn keep_manifest_if_annotation_exists<K>(annotation: impl Into<String>) -> AdapterOption<K>
where
    K: 'static,
{
    let annotation = annotation.into();
    with_keep_manifest(move |ctx: &WorkloadContext| ctx.has_annotation(&annotation))
}
