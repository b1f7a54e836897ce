use std::{fmt::Debug, hash::Hash};

use super::AttributeValue;
use crate::{
    errors::{ModelError, ModelResult},
    utils::OrderedMap,
};

/// Immutable label to value store attached to models and properties.
///
/// Built once through an [`AttributeContainerBuilder`](super::AttributeContainerBuilder)
/// and frozen afterwards. Looking up a label that was never set is an error,
/// never a silent default.
#[derive(Debug, Clone)]
pub struct AttributeContainer<L> {
    attributes: OrderedMap<L, AttributeValue>,
}

impl<L> Default for AttributeContainer<L> {
    fn default() -> Self {
        Self {
            attributes: OrderedMap::default(),
        }
    }
}

impl<L: Eq + Hash + Clone + Debug> AttributeContainer<L> {
    pub(crate) fn from_storage(attributes: OrderedMap<L, AttributeValue>) -> Self {
        Self { attributes }
    }

    /// A container with no attributes.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn labels(&self) -> impl ExactSizeIterator<Item = &L> {
        self.attributes.keys()
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &AttributeValue> {
        self.attributes.values()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&L, &AttributeValue)> {
        self.attributes.iter()
    }

    /// Determines whether an attribute exists under the specified label.
    pub fn has_attribute(&self, label: &L) -> bool {
        self.attributes.contains_key(label)
    }

    /// Gets the attribute with the specified label.
    ///
    /// # Errors
    ///
    /// [`ModelError::AttributeNotFound`] if the label isn't present.
    pub fn get_attribute(&self, label: &L) -> ModelResult<&AttributeValue> {
        self.attributes
            .get(label)
            .ok_or_else(|| ModelError::AttributeNotFound(format!("{label:?}")))
    }

    /// Gets the attribute converted to `A`, failing with a type mismatch if
    /// the stored value has another shape.
    pub fn get_as<A>(&self, label: &L) -> ModelResult<A>
    where
        A: TryFrom<AttributeValue>,
    {
        let value = self.get_attribute(label)?;
        let found = value.type_name();

        A::try_from(value.clone()).map_err(|_| ModelError::TypeMismatch {
            expected: std::any::type_name::<A>(),
            found,
        })
    }
}

impl<L: Eq + Hash + Clone> PartialEq for AttributeContainer<L> {
    fn eq(&self, other: &Self) -> bool {
        self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .zip(other.attributes.iter())
                .all(|(a, b)| a == b)
    }
}
