//! HostedControlPlane Custom Resource Definition
//!
//! The HostedControlPlane is the source of truth for every resource a
//! control-plane operator derives (PodDisruptionBudgets, Secrets,
//! Deployments, ...). Components only ever read it.

use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{AvailabilityPolicy, PlatformSpec, PlatformType};

/// Specification for a HostedControlPlane
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "hypershift.openshift.io",
    version = "v1beta1",
    kind = "HostedControlPlane",
    plural = "hostedcontrolplanes",
    shortname = "hcp",
    status = "HostedControlPlaneStatus",
    namespaced,
    printcolumn = r#"{"name":"Ready","type":"boolean","jsonPath":".status.ready"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct HostedControlPlaneSpec {
    /// Release image the control plane runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_image: Option<String>,

    /// Infrastructure platform configuration
    #[serde(default)]
    pub platform: PlatformSpec,

    /// Availability policy for control-plane components
    #[serde(default)]
    pub controller_availability_policy: AvailabilityPolicy,

    /// Availability policy for infrastructure services in the guest cluster
    #[serde(default)]
    pub infrastructure_availability_policy: AvailabilityPolicy,
}

/// Status for a HostedControlPlane
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HostedControlPlaneStatus {
    /// Whether the control plane is ready to serve
    #[serde(default)]
    pub ready: bool,

    /// Version the control plane last rolled out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HostedControlPlane {
    /// Returns true if the annotation key is present, whatever its value
    pub fn has_annotation(&self, key: &str) -> bool {
        self.annotations().contains_key(key)
    }

    /// Value of an annotation, if present
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations().get(key).map(String::as_str)
    }

    /// Platform type from the spec
    pub fn platform_type(&self) -> PlatformType {
        self.spec.platform.type_
    }

    /// Availability policy for control-plane components
    pub fn controller_availability_policy(&self) -> AvailabilityPolicy {
        self.spec.controller_availability_policy
    }
}
