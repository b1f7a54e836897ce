//! A keyed store of built models with lazy construction and usage-aware
//! pruning.
//!
//! Entries are scanned in order, so [`ModelCache::optimize`] moves the most
//! used ones to the front. Every mutating operation runs under one lock; lazy
//! builds happen outside it, at most once per entry.

use std::{
    any::Any,
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::Mutex;

use crate::{
    config::CacheConfig,
    descriptor::Describe,
    engine::ModelFactory,
    errors::{ModelError, ModelResult},
    model::Model,
    traits::{AttributeLabel, ModelKey},
};

mod id;
mod node;

pub use id::ModelId;
pub use node::CacheNode;

use node::{Rebuild, Shared};

/// What an optimize pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizeReport {
    /// Lazy entries reset to unbuilt.
    pub culled: usize,
    /// Value entries dropped for lack of a factory.
    pub removed: usize,
    pub sorted: bool,
}

pub struct ModelCache<K> {
    config: CacheConfig,
    nodes: Mutex<Vec<(K, Arc<CacheNode>)>>,
    hits: AtomicU64,
}

impl<K: Eq + Clone + Debug> Default for ModelCache<K> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl<K: Eq + Clone + Debug> ModelCache<K> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            nodes: Mutex::new(Vec::with_capacity(config.capacity)),
            config,
            hits: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.nodes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.lock().is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.node(key).is_some()
    }

    /// Keys in scan order.
    pub fn keys(&self) -> Vec<K> {
        self.nodes.lock().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Hits recorded against an entry since it was last built.
    pub fn usage(&self, key: &K) -> Option<u64> {
        self.node(key).map(|n| n.usage())
    }

    pub fn is_built(&self, key: &K) -> Option<bool> {
        self.node(key).map(|n| n.is_built())
    }

    /// Gets the model stored under `key`.
    ///
    /// # Errors
    ///
    /// [`ModelError::ModelNotFound`] if the key is absent,
    /// [`ModelError::TypeMismatch`] if the stored model isn't an `M`, or
    /// whatever a lazy entry's factory fails with.
    pub fn get<M: Any + Send + Sync>(&self, key: &K) -> ModelResult<Arc<M>> {
        let node = self
            .node(key)
            .ok_or_else(|| ModelError::ModelNotFound(format!("{key:?}")))?;

        self.access(&node)
    }

    /// Gets the model under `key`, or stores a lazy entry built by `factory`
    /// and returns its value. An existing entry always wins.
    pub fn get_or_insert_with<M, F>(&self, key: K, factory: F) -> ModelResult<Arc<M>>
    where
        M: Any + Send + Sync,
        F: Fn() -> ModelResult<M> + Send + Sync + 'static,
    {
        let node = self.insert_if_absent(key, || CacheNode::lazy(rebuild(factory))).1;
        self.access(&node)
    }

    /// Gets the model under `key`, or stores `default` and returns it.
    pub fn get_or_insert<M: Any + Send + Sync>(&self, key: K, default: M) -> ModelResult<Arc<M>> {
        let node = self.insert_if_absent(key, || CacheNode::value(Arc::new(default))).1;
        self.access(&node)
    }

    /// Stores a built model unless the key is taken. Returns whether the key
    /// already existed; an existing entry is never replaced.
    pub fn cache<M: Any + Send + Sync>(&self, key: K, model: M) -> bool {
        self.insert_if_absent(key, || CacheNode::value(Arc::new(model))).0
    }

    /// Stores a lazy entry unless the key is taken. Returns whether the key
    /// already existed.
    pub fn cache_lazy<M, F>(&self, key: K, factory: F) -> bool
    where
        M: Any + Send + Sync,
        F: Fn() -> ModelResult<M> + Send + Sync + 'static,
    {
        self.insert_if_absent(key, || CacheNode::lazy(rebuild(factory))).0
    }

    /// Inserts a copy of every absent entry. Copies start with no hits and
    /// keep the built value, if any. Returns how many were inserted.
    pub fn cache_all<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (K, Arc<CacheNode>)>,
    {
        let mut nodes = self.nodes.lock();
        let mut inserted = 0;

        for (key, node) in entries {
            if !nodes.iter().any(|(k, _)| *k == key) {
                nodes.push((key, Arc::new(node.copied())));
                inserted += 1;
            }
        }

        inserted
    }

    /// A snapshot of the entries in scan order. Nodes are shared, not copied.
    pub fn entries(&self) -> Vec<(K, Arc<CacheNode>)> {
        self.nodes.lock().clone()
    }

    /// Copies every entry into `other`, keeping whatever `other` already has.
    pub fn copy_to(&self, other: &ModelCache<K>) -> usize {
        other.cache_all(self.entries())
    }

    pub fn remove(&self, key: &K) -> bool {
        let mut nodes = self.nodes.lock();
        let before = nodes.len();
        nodes.retain(|(k, _)| k != key);
        nodes.len() != before
    }

    pub fn clear(&self) {
        self.nodes.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
    }

    /// Prunes rarely used entries, then sorts by usage, most used first.
    ///
    /// Does nothing unless usage tracking is on. Entries with fewer hits than
    /// the removal threshold are culled: lazy entries go back to unbuilt with
    /// no hits, value entries are removed. Sorting is skipped when the order
    /// is already right or there are fewer than two entries.
    pub fn optimize(&self) -> OptimizeReport {
        let mut report = OptimizeReport::default();

        if !self.config.track_usage {
            return report;
        }

        let mut nodes = self.nodes.lock();

        if let Some(threshold) = self.config.removal_threshold {
            let mut kept = Vec::with_capacity(nodes.len());

            for (key, node) in nodes.drain(..) {
                if node.usage() >= threshold {
                    kept.push((key, node));
                    continue;
                }

                match node.culled() {
                    Some(fresh) => {
                        if node.is_built() {
                            report.culled += 1;
                        }
                        kept.push((key, Arc::new(fresh)));
                    }
                    None => report.removed += 1,
                }
            }

            *nodes = kept;
        }

        let sorted = nodes
            .windows(2)
            .all(|pair| pair[0].1.usage() >= pair[1].1.usage());

        if nodes.len() >= 2 && !sorted {
            nodes.sort_by(|(_, a), (_, b)| b.usage().cmp(&a.usage()));
            report.sorted = true;
        }

        log::debug!(
            "Optimized model cache: {} culled, {} removed, sorted: {}",
            report.culled,
            report.removed,
            report.sorted
        );

        report
    }

    fn node(&self, key: &K) -> Option<Arc<CacheNode>> {
        self.nodes
            .lock()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node.clone())
    }

    fn insert_if_absent(&self, key: K, create: impl FnOnce() -> CacheNode) -> (bool, Arc<CacheNode>) {
        let mut nodes = self.nodes.lock();

        if let Some((_, node)) = nodes.iter().find(|(k, _)| *k == key) {
            return (true, node.clone());
        }

        let node = Arc::new(create());
        nodes.push((key, node.clone()));
        (false, node)
    }

    fn access<M: Any + Send + Sync>(&self, node: &CacheNode) -> ModelResult<Arc<M>> {
        let value = node
            .resolve()?
            .downcast::<M>()
            .map_err(|_| ModelError::mismatch::<M, dyn Any>())?;

        if self.config.track_usage {
            node.hit();
            self.count_hit();
        }

        Ok(value)
    }

    fn count_hit(&self) {
        let Some(threshold) = self.config.optimization_hit_threshold else {
            return;
        };

        // Counting and resetting in one step, so each crossing fires once.
        let previous = self
            .hits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |hits| {
                Some(if hits + 1 >= threshold { 0 } else { hits + 1 })
            })
            .unwrap_or_default();

        if previous + 1 >= threshold {
            self.optimize();
        }
    }
}

impl ModelCache<ModelId> {
    /// Gets the model of `T`, extracting and caching it on first use.
    pub fn get_or_build<T, K, L, Lp>(
        &self,
        factory: &Arc<ModelFactory>,
    ) -> ModelResult<Arc<Model<T, K, L, Lp>>>
    where
        T: Describe,
        K: ModelKey,
        L: AttributeLabel,
        Lp: AttributeLabel,
    {
        let factory = factory.clone();
        self.get_or_insert_with(ModelId::of::<T, K, L, Lp>(), move || {
            factory.create::<T, K, L, Lp>()
        })
    }
}

fn rebuild<M, F>(factory: F) -> Rebuild
where
    M: Any + Send + Sync,
    F: Fn() -> ModelResult<M> + Send + Sync + 'static,
{
    Arc::new(move || factory().map(|model| Arc::new(model) as Shared))
}
