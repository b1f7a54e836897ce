use std::{
    any::Any,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use once_cell::sync::OnceCell;

use crate::errors::ModelResult;

pub(crate) type Shared = Arc<dyn Any + Send + Sync>;
pub(crate) type Rebuild = Arc<dyn Fn() -> ModelResult<Shared> + Send + Sync>;

/// One cache entry: a built value, a factory that builds it on first access,
/// or both.
pub struct CacheNode {
    value: OnceCell<Shared>,
    factory: Option<Rebuild>,
    usage: AtomicU64,
}

impl CacheNode {
    pub(crate) fn value(value: Shared) -> Self {
        Self {
            value: OnceCell::with_value(value),
            factory: None,
            usage: AtomicU64::new(0),
        }
    }

    pub(crate) fn lazy(factory: Rebuild) -> Self {
        Self {
            value: OnceCell::new(),
            factory: Some(factory),
            usage: AtomicU64::new(0),
        }
    }

    /// The built value, building it first if needed. Concurrent first
    /// accesses wait for a single build.
    pub(crate) fn resolve(&self) -> ModelResult<Shared> {
        let value = self.value.get_or_try_init(|| match &self.factory {
            Some(factory) => {
                log::trace!("Building lazy cache node");
                factory()
            }
            None => Err(crate::ModelError::Contract(
                "a value node has no value".into(),
            )),
        })?;

        Ok(value.clone())
    }

    pub(crate) fn hit(&self) -> u64 {
        self.usage.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn usage(&self) -> u64 {
        self.usage.load(Ordering::Relaxed)
    }

    pub fn is_built(&self) -> bool {
        self.value.get().is_some()
    }

    pub fn is_lazy(&self) -> bool {
        self.factory.is_some()
    }

    /// A node for another cache: same factory and built value, own usage
    /// count.
    pub(crate) fn copied(&self) -> Self {
        let value = match self.value.get() {
            Some(value) => OnceCell::with_value(value.clone()),
            None => OnceCell::new(),
        };

        Self {
            value,
            factory: self.factory.clone(),
            usage: AtomicU64::new(0),
        }
    }

    /// A fresh, unbuilt node with the same factory; `None` for value nodes.
    pub(crate) fn culled(&self) -> Option<Self> {
        self.factory.clone().map(Self::lazy)
    }
}

impl fmt::Debug for CacheNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheNode")
            .field("built", &self.is_built())
            .field("lazy", &self.is_lazy())
            .field("usage", &self.usage())
            .finish()
    }
}
