use std::{fmt::Debug, hash::Hash};

use super::{AttributeContainer, AttributeValue};
use crate::{
    errors::{ModelError, ModelResult},
    utils::{OrderedMap, Uncased},
};

/// Mutable staging area for an [`AttributeContainer`].
///
/// Storage keeps insertion order. The named variant ([`Self::named`]) sorts
/// its case-insensitive labels when the container is built instead.
#[derive(Debug, Clone)]
pub struct AttributeContainerBuilder<L> {
    storage: OrderedMap<L, AttributeValue>,
    finalize: Option<fn(&mut OrderedMap<L, AttributeValue>)>,
}

impl<L: Eq + Hash + Clone + Debug> Default for AttributeContainerBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Eq + Hash + Clone + Debug> AttributeContainerBuilder<L> {
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: OrderedMap::with_capacity(capacity),
            finalize: None,
        }
    }

    pub fn contains(&self, label: &L) -> bool {
        self.storage.contains_key(label)
    }

    pub fn get(&self, label: &L) -> ModelResult<&AttributeValue> {
        self.storage
            .get(label)
            .ok_or_else(|| ModelError::AttributeNotFound(format!("{label:?}")))
    }

    /// Sets an attribute, overwriting any previous value under the same label.
    pub fn set(&mut self, label: L, value: impl Into<AttributeValue>) -> &mut Self {
        self.storage.insert(label, value.into());
        self
    }

    pub fn remove(&mut self, label: &L) -> &mut Self {
        self.storage.remove(label);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.storage.clear();
        self
    }

    pub fn extend<I>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = (L, AttributeValue)>,
    {
        for (label, value) in attributes {
            self.storage.insert(label, value);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn build(mut self) -> AttributeContainer<L> {
        if let Some(finalize) = self.finalize {
            finalize(&mut self.storage);
        }
        self.storage.shrink_to_fit();

        AttributeContainer::from_storage(self.storage)
    }
}

impl AttributeContainerBuilder<Uncased> {
    /// A builder for string labels compared without regard to case. The built
    /// container iterates its labels in case-insensitive order.
    pub fn named() -> Self {
        Self {
            storage: OrderedMap::with_capacity(8),
            finalize: Some(OrderedMap::sort_by_key_order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_and_remove_forgets() {
        let mut builder = AttributeContainerBuilder::<&'static str>::new();
        builder.set("unit", "km").set("unit", "mi").set("range", 3);
        builder.remove(&"range");

        let container = builder.build();
        assert_eq!(container.len(), 1);
        assert_eq!(container.get_as::<String>(&"unit").unwrap(), "mi");
        assert!(!container.has_attribute(&"range"));
    }

    #[test]
    fn test_named_builder_ignores_case() {
        let mut builder = AttributeContainerBuilder::named();
        builder.set("Unit".into(), "km").set("alpha".into(), 1);
        assert!(builder.contains(&"UNIT".into()));

        let container = builder.build();
        let labels: Vec<_> = container.labels().map(|l| l.as_str()).collect();
        assert_eq!(labels, vec!["alpha", "Unit"]);
    }
}
