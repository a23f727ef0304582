//! Shared types for the HostedControlPlane CRD

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Redundancy expected from control-plane components
///
/// Drives replica counts and disruption budgets of everything derived from the
/// control plane.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum AvailabilityPolicy {
    /// One replica per component
    #[default]
    SingleReplica,
    /// Multiple replicas spread for fault tolerance
    HighlyAvailable,
    /// Empty or unrecognized policy
    ///
    /// Newer API versions may add policies; older components treat them as
    /// imposing no availability constraint.
    #[serde(other, rename = "")]
    Unspecified,
}

impl AvailabilityPolicy {
    /// API string for this policy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleReplica => "SingleReplica",
            Self::HighlyAvailable => "HighlyAvailable",
            Self::Unspecified => "",
        }
    }
}

impl fmt::Display for AvailabilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AvailabilityPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SingleReplica" => Ok(Self::SingleReplica),
            "HighlyAvailable" => Ok(Self::HighlyAvailable),
            _ => Err(crate::Error::validation(
                "spec.controllerAvailabilityPolicy",
                format!("unknown availability policy: {s:?}"),
            )),
        }
    }
}

/// Infrastructure platform a hosted control plane runs for
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum PlatformType {
    /// Amazon Web Services
    #[serde(rename = "AWS")]
    Aws,
    /// No cloud integration
    None,
    /// IBM Cloud
    #[serde(rename = "IBMCloud")]
    IbmCloud,
    /// Agent-based installs on existing hosts
    Agent,
    /// KubeVirt virtual machines
    KubeVirt,
    /// Microsoft Azure
    Azure,
    /// IBM Power Virtual Server
    #[serde(rename = "PowerVS")]
    PowerVs,
    /// OpenStack private cloud
    OpenStack,
    /// Platform not set, or one this build does not know
    #[default]
    #[serde(other, rename = "")]
    Unspecified,
}

impl PlatformType {
    /// API string for this platform
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::None => "None",
            Self::IbmCloud => "IBMCloud",
            Self::Agent => "Agent",
            Self::KubeVirt => "KubeVirt",
            Self::Azure => "Azure",
            Self::PowerVs => "PowerVS",
            Self::OpenStack => "OpenStack",
            Self::Unspecified => "",
        }
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlatformType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AWS" => Ok(Self::Aws),
            "None" => Ok(Self::None),
            "IBMCloud" => Ok(Self::IbmCloud),
            "Agent" => Ok(Self::Agent),
            "KubeVirt" => Ok(Self::KubeVirt),
            "Azure" => Ok(Self::Azure),
            "PowerVS" => Ok(Self::PowerVs),
            "OpenStack" => Ok(Self::OpenStack),
            _ => Err(crate::Error::validation(
                "spec.platform.type",
                format!("unknown platform type: {s:?}"),
            )),
        }
    }
}

/// Platform configuration of a hosted control plane
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSpec {
    /// Platform type
    #[serde(rename = "type", default)]
    pub type_: PlatformType,
}

impl PlatformSpec {
    /// Platform spec for the given type
    pub fn new(type_: PlatformType) -> Self {
        Self { type_ }
    }
}
