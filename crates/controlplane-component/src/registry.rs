//! Adapters keyed by manifest file name
//!
//! Manifests are loaded untyped, so the registry stores adapters behind the
//! [`ManifestAdapter`] trait and converts each `DynamicObject` to the typed
//! resource its adapter was built for.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use kube::core::DynamicObject;
use kube::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::adapter::{AdapterOption, GenericAdapter};
use crate::context::WorkloadContext;
use crate::error::ComponentError;
use crate::reconcile::{is_enabled, ManifestAction};
use crate::Result;

/// A type-erased adapter operating on untyped manifests
pub trait ManifestAdapter: Send + Sync {
    /// Whether the manifest should exist this cycle
    fn predicate(&self, ctx: &WorkloadContext) -> bool;

    /// Whether a disabled manifest must be left in place
    fn keep_manifest(&self, ctx: &WorkloadContext) -> bool;

    /// Adapt an untyped manifest in place
    fn adapt_dynamic(
        &self,
        manifest: &str,
        ctx: &WorkloadContext,
        obj: &mut DynamicObject,
    ) -> Result<()>;
}

impl<K> ManifestAdapter for GenericAdapter<K>
where
    K: Resource<DynamicType = ()> + Serialize + DeserializeOwned + 'static,
{
    fn predicate(&self, ctx: &WorkloadContext) -> bool {
        GenericAdapter::predicate(self, ctx)
    }

    fn keep_manifest(&self, ctx: &WorkloadContext) -> bool {
        GenericAdapter::keep_manifest(self, ctx)
    }

    fn adapt_dynamic(
        &self,
        manifest: &str,
        ctx: &WorkloadContext,
        obj: &mut DynamicObject,
    ) -> Result<()> {
        let expected = K::kind(&());
        if let Some(types) = &obj.types {
            if types.kind != expected {
                return Err(ComponentError::unexpected_kind(
                    manifest,
                    expected,
                    &types.kind,
                ));
            }
        }

        let mut typed: K = obj
            .clone()
            .try_parse()
            .map_err(|e| ComponentError::serialization(manifest, e.to_string()))?;

        GenericAdapter::adapt(self, ctx, &mut typed)?;

        let value = serde_json::to_value(&typed)
            .map_err(|e| ComponentError::serialization(manifest, e.to_string()))?;
        *obj = serde_json::from_value(value)
            .map_err(|e| ComponentError::serialization(manifest, e.to_string()))?;
        Ok(())
    }
}

/// Registry of adapters keyed by manifest file name
///
/// Manifests without a registered adapter are always applied unchanged.
#[derive(Clone, Default)]
pub struct ManifestAdapters {
    adapters: BTreeMap<String, Arc<dyn ManifestAdapter>>,
}

impl fmt::Debug for ManifestAdapters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestAdapters")
            .field("manifests", &self.adapters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ManifestAdapters {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter for `manifest` built from the given options.
    pub fn with_adapter<K, I>(mut self, manifest: impl Into<String>, options: I) -> Self
    where
        K: Resource<DynamicType = ()> + Serialize + DeserializeOwned + 'static,
        I: IntoIterator<Item = AdapterOption<K>>,
    {
        self.register(manifest, GenericAdapter::new(options));
        self
    }

    /// Register an adapter for `manifest`, replacing any earlier one
    pub fn register(&mut self, manifest: impl Into<String>, adapter: impl ManifestAdapter + 'static) {
        let manifest = manifest.into();
        if self
            .adapters
            .insert(manifest.clone(), Arc::new(adapter))
            .is_some()
        {
            warn!(manifest = %manifest, "replacing previously registered manifest adapter");
        }
    }

    /// Adapter registered for `manifest`, if any
    pub fn get(&self, manifest: &str) -> Option<&dyn ManifestAdapter> {
        self.adapters.get(manifest).map(|a| a.as_ref())
    }

    /// Names of all manifests with a registered adapter
    pub fn manifests(&self) -> impl Iterator<Item = &str> {
        self.adapters.keys().map(String::as_str)
    }

    /// Number of registered adapters
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns true if no adapters are registered
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Decide what happens to the manifest `obj` loaded from `manifest`.
    ///
    /// Same decision as [`GenericAdapter::reconcile`]; manifests without an
    /// adapter are applied as loaded.
    pub fn reconcile(
        &self,
        manifest: &str,
        ctx: &WorkloadContext,
        mut obj: DynamicObject,
    ) -> Result<ManifestAction<DynamicObject>> {
        let Some(adapter) = self.get(manifest) else {
            trace!(manifest, "no adapter registered, applying as loaded");
            return Ok(ManifestAction::Apply(obj));
        };

        if !is_enabled(ctx, || adapter.predicate(ctx)) {
            if adapter.keep_manifest(ctx) {
                debug!(manifest, "manifest disabled, keeping existing resource");
                return Ok(ManifestAction::Keep);
            }
            debug!(manifest, "manifest disabled, deleting");
            return Ok(ManifestAction::Delete);
        }

        adapter.adapt_dynamic(manifest, ctx, &mut obj)?;
        trace!(manifest, "manifest adapted");
        Ok(ManifestAction::Apply(obj))
    }
}
