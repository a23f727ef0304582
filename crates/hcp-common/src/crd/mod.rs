//! Custom Resource Definitions consumed by control-plane components

mod hosted_control_plane;
mod types;

pub use hosted_control_plane::{HostedControlPlane, HostedControlPlaneSpec, HostedControlPlaneStatus};
pub use types::{AvailabilityPolicy, PlatformSpec, PlatformType};
