//! Option-composed adapters for resources derived from a HostedControlPlane
//!
//! Each derived resource kind gets a [`GenericAdapter`] built from an ordered
//! list of [`AdapterOption`]s. The adapter answers three questions per
//! reconcile cycle: should the resource exist ([`GenericAdapter::predicate`]),
//! if not should an existing copy be left alone
//! ([`GenericAdapter::keep_manifest`]), and what should it look like
//! ([`GenericAdapter::adapt`]).
//!
//! # Usage
//!
//! ```rust,ignore
//! let adapter = GenericAdapter::new([
//!     disable_if_annotation_exist(DISABLE_PKI_RECONCILIATION_ANNOTATION),
//!     keep_manifest_if_annotation_exists(DISABLE_PKI_RECONCILIATION_ANNOTATION),
//!     set_hosted_cluster_annotation(),
//! ]);
//!
//! match adapter.reconcile(&ctx, secret)? {
//!     ManifestAction::Apply(secret) => apply(secret).await?,
//!     ManifestAction::Delete => delete(name).await?,
//!     ManifestAction::Keep => {}
//! }
//! ```

#![deny(missing_docs)]

mod adapter;
mod context;
pub mod error;
pub mod helpers;
mod reconcile;
mod registry;

pub use adapter::{
    with_adapt_function, with_keep_manifest, with_predicate, AdaptFn, AdapterOption,
    GenericAdapter, PredicateFn,
};
pub use context::WorkloadContext;
pub use error::ComponentError;
pub use helpers::{
    adapt_pod_disruption_budget, disable_if_annotation_exist, enable_for_platform,
    keep_manifest_if_annotation_exists, set_hosted_cluster_annotation,
};
pub use reconcile::ManifestAction;
pub use registry::{ManifestAdapter, ManifestAdapters};

/// Result type alias using the component error type
pub type Result<T> = std::result::Result<T, ComponentError>;
