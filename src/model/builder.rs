use std::{fmt::Debug, hash::Hash, sync::Arc};

use super::Model;
use crate::{
    attributes::AttributeContainerBuilder,
    errors::{ModelError, ModelResult},
    factory::FactoryVariant,
    property::Property,
    traits::ModelKey,
    utils::OrderedMap,
};

/// Assembles a [`Model`] from three parts: an attribute builder, the keyed
/// properties and the factory variants.
pub struct ModelBuilder<T, K, L = String, Lp = String> {
    target: &'static str,
    attributes: AttributeContainerBuilder<L>,
    properties: OrderedMap<K, Arc<Property<T, Lp>>>,
    factories: Vec<FactoryVariant<T, Lp>>,
}

impl<T, K, L, Lp> ModelBuilder<T, K, L, Lp>
where
    K: ModelKey,
    L: Eq + Hash + Clone + Debug,
{
    pub fn new(target: &'static str) -> Self {
        Self::with_capacity(target, 16, 8)
    }

    pub fn with_capacity(target: &'static str, properties: usize, attributes: usize) -> Self {
        Self {
            target,
            attributes: AttributeContainerBuilder::with_capacity(attributes),
            properties: OrderedMap::with_capacity(properties),
            factories: Vec::new(),
        }
    }

    pub fn attributes(&mut self) -> &mut AttributeContainerBuilder<L> {
        &mut self.attributes
    }

    /// Adds a property under a key that must not be taken yet.
    pub fn property(&mut self, key: K, property: Property<T, Lp>) -> ModelResult<&mut Self> {
        if self.properties.contains_key(&key) {
            return Err(ModelError::Contract(format!(
                "the key {} is already taken",
                key.key_name()
            )));
        }

        self.properties.insert(key, Arc::new(property));
        Ok(self)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.properties.contains_key(key)
    }

    /// Finds a property by its member name (not by key).
    pub fn find_property(&self, name: &str) -> Option<Arc<Property<T, Lp>>> {
        self.properties.values().find(|p| p.name() == name).cloned()
    }

    /// Adds a factory variant. Only one may be primary.
    pub fn factory(&mut self, variant: FactoryVariant<T, Lp>) -> ModelResult<&mut Self> {
        if variant.is_primary() && self.factories.iter().any(|f| f.is_primary()) {
            return Err(ModelError::MultiplePrimaryFactories {
                index: self.factories.len(),
            });
        }

        self.factories.push(variant);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn build(mut self) -> Model<T, K, L, Lp> {
        if let Some(position) = self.factories.iter().position(|f| f.is_primary()) {
            let primary = self.factories.remove(position);
            self.factories.insert(0, primary);
        }

        if let Some(ordering) = K::ordering() {
            self.properties.sort_keys_by(ordering);
        }
        self.properties.shrink_to_fit();

        Model::from_parts(
            self.target,
            self.properties,
            self.attributes.build(),
            self.factories,
        )
    }
}
