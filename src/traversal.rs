//! Walking a model's structure with a visitor.

use crate::{attributes::AttributeValue, model::Model, property::Property, traits::ModelKey};

/// Callbacks for [`Model::traverse`]. Every method defaults to doing nothing.
pub trait ModelVisitor<T, K, L, Lp> {
    fn visit_model(&mut self, _model: &Model<T, K, L, Lp>) {}

    fn visit_model_attribute(&mut self, _label: &L, _value: &AttributeValue) {}

    fn visit_property(&mut self, _key: &K, _property: &Property<T, Lp>) {}

    fn visit_property_attribute(
        &mut self,
        _property: &Property<T, Lp>,
        _label: &Lp,
        _value: &AttributeValue,
    ) {
    }
}

impl<T, K, L, Lp> Model<T, K, L, Lp>
where
    K: ModelKey,
    L: Eq + std::hash::Hash + Clone + std::fmt::Debug,
    Lp: Eq + std::hash::Hash + Clone + std::fmt::Debug,
{
    /// Visits the model, then its attributes, then each property followed by
    /// that property's attributes.
    pub fn traverse<V: ModelVisitor<T, K, L, Lp>>(&self, visitor: &mut V) {
        visitor.visit_model(self);

        for (label, value) in self.attributes().iter() {
            visitor.visit_model_attribute(label, value);
        }

        for (key, property) in self.entries() {
            visitor.visit_property(key, property);

            for (label, value) in property.attributes().iter() {
                visitor.visit_property_attribute(property, label, value);
            }
        }
    }
}
