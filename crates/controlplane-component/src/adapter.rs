//! GenericAdapter and the options that configure it
//!
//! An [`AdapterOption`] is a transformation of an adapter under construction.
//! Options are applied in order; predicate and keep-manifest slots are
//! last-write-wins, while adapt functions chain (see [`with_adapt_function`]).

use std::fmt;
use std::sync::Arc;

use crate::context::WorkloadContext;
use crate::Result;

/// Boolean gate evaluated against the current context
pub type PredicateFn = Arc<dyn Fn(&WorkloadContext) -> bool + Send + Sync>;

/// Mutator that fills in the desired state of a resource in place
pub type AdaptFn<K> = Arc<dyn Fn(&WorkloadContext, &mut K) -> Result<()> + Send + Sync>;

/// One unit of adapter configuration
///
/// Cloning is cheap and a clone can be applied to any number of adapters; the
/// option only captures values, never shared mutable state.
pub struct AdapterOption<K> {
    apply: Arc<dyn Fn(&mut GenericAdapter<K>) + Send + Sync>,
}

impl<K> AdapterOption<K> {
    /// Wrap a raw transformation of the adapter under construction
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut GenericAdapter<K>) + Send + Sync + 'static,
    {
        Self { apply: Arc::new(f) }
    }

    /// Apply this option to an adapter
    pub fn apply(&self, adapter: &mut GenericAdapter<K>) {
        (self.apply)(adapter)
    }
}

impl<K> Clone for AdapterOption<K> {
    fn clone(&self) -> Self {
        Self {
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<K> fmt::Debug for AdapterOption<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterOption").finish_non_exhaustive()
    }
}

/// Predicate, mutator and keep-manifest rule for one derived resource kind
///
/// Built once from an option list and then only read, so a single adapter can
/// serve concurrent reconcile cycles.
pub struct GenericAdapter<K> {
    adapt: Option<AdaptFn<K>>,
    predicate: Option<PredicateFn>,
    keep_manifest: Option<PredicateFn>,
}

impl<K> Default for GenericAdapter<K> {
    fn default() -> Self {
        Self {
            adapt: None,
            predicate: None,
            keep_manifest: None,
        }
    }
}

impl<K> Clone for GenericAdapter<K> {
    fn clone(&self) -> Self {
        Self {
            adapt: self.adapt.clone(),
            predicate: self.predicate.clone(),
            keep_manifest: self.keep_manifest.clone(),
        }
    }
}

impl<K> fmt::Debug for GenericAdapter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericAdapter")
            .field("adapt", &self.adapt.is_some())
            .field("predicate", &self.predicate.is_some())
            .field("keep_manifest", &self.keep_manifest.is_some())
            .finish()
    }
}

impl<K> GenericAdapter<K> {
    /// Build an adapter by applying options in order to a default adapter
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator<Item = AdapterOption<K>>,
    {
        Self::default().with_options(options)
    }

    /// Apply further options on top of this adapter.
    ///
    /// `GenericAdapter::new([a, b]).with_options([c])` is the same adapter as
    /// `GenericAdapter::new([a, b, c])`.
    pub fn with_options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = AdapterOption<K>>,
    {
        for option in options {
            option.apply(&mut self);
        }
        self
    }

    /// Whether the resource should exist this cycle. Defaults to true.
    pub fn predicate(&self, ctx: &WorkloadContext) -> bool {
        self.predicate.as_ref().is_none_or(|p| p(ctx))
    }

    /// Whether a disabled resource must be left in place. Defaults to false.
    pub fn keep_manifest(&self, ctx: &WorkloadContext) -> bool {
        self.keep_manifest.as_ref().is_some_and(|k| k(ctx))
    }

    /// Run the configured adapt functions against the resource.
    ///
    /// A no-op when no adapt option was applied.
    pub fn adapt(&self, ctx: &WorkloadContext, resource: &mut K) -> Result<()> {
        match &self.adapt {
            Some(adapt) => adapt(ctx, resource),
            None => Ok(()),
        }
    }

    /// Replace the predicate slot
    pub fn set_predicate(&mut self, predicate: PredicateFn) {
        self.predicate = Some(predicate);
    }

    /// Replace the keep-manifest slot
    pub fn set_keep_manifest(&mut self, keep_manifest: PredicateFn) {
        self.keep_manifest = Some(keep_manifest);
    }

    /// Replace the adapt slot, discarding previously configured adapt functions
    pub fn set_adapt(&mut self, adapt: AdaptFn<K>) {
        self.adapt = Some(adapt);
    }
}

impl<K: 'static> GenericAdapter<K> {
    /// Append an adapt function after the ones already configured
    pub fn chain_adapt(&mut self, next: AdaptFn<K>) {
        let chained: AdaptFn<K> = match self.adapt.take() {
            Some(prev) => Arc::new(move |ctx: &WorkloadContext, resource: &mut K| {
                prev(ctx, resource)?;
                next(ctx, resource)
            }),
            None => next,
        };
        self.adapt = Some(chained);
    }
}

/// Option that gates whether the resource exists. Replaces any earlier predicate.
pub fn with_predicate<K, F>(predicate: F) -> AdapterOption<K>
where
    K: 'static,
    F: Fn(&WorkloadContext) -> bool + Send + Sync + 'static,
{
    let predicate: PredicateFn = Arc::new(predicate);
    AdapterOption::new(move |adapter: &mut GenericAdapter<K>| {
        adapter.set_predicate(Arc::clone(&predicate))
    })
}

/// Option that protects a disabled resource from deletion. Replaces any
/// earlier keep-manifest rule.
pub fn with_keep_manifest<K, F>(keep_manifest: F) -> AdapterOption<K>
where
    K: 'static,
    F: Fn(&WorkloadContext) -> bool + Send + Sync + 'static,
{
    let keep_manifest: PredicateFn = Arc::new(keep_manifest);
    AdapterOption::new(move |adapter: &mut GenericAdapter<K>| {
        adapter.set_keep_manifest(Arc::clone(&keep_manifest))
    })
}

/// Option that mutates the resource.
///
/// Adapt options chain: each runs after the adapt functions applied before it,
/// and the first error stops the chain.
pub fn with_adapt_function<K, F>(adapt: F) -> AdapterOption<K>
where
    K: 'static,
    F: Fn(&WorkloadContext, &mut K) -> Result<()> + Send + Sync + 'static,
{
    let adapt: AdaptFn<K> = Arc::new(adapt);
    AdapterOption::new(move |adapter: &mut GenericAdapter<K>| {
        adapter.chain_adapt(Arc::clone(&adapt))
    })
}
