//! The model aggregate: keyed properties, attributes and factory variants.

use std::{any::Any, fmt, sync::Arc};

use crate::{
    attributes::AttributeContainer,
    descriptor::FactoryArg,
    errors::{ModelError, ModelResult},
    factory::{self, FactoryVariant},
    property::{Property, TypedProperty},
    traits::ModelKey,
    utils::OrderedMap,
};

pub mod builder;

pub use builder::ModelBuilder;

/// A runtime-queryable description of a target type `T`.
///
/// Properties are addressed by keys of type `K`, model attributes by labels
/// of type `L` and property attributes by labels of type `Lp`. Models are
/// immutable once built and cheap to share (`Send + Sync` for any `T`).
pub struct Model<T, K, L = String, Lp = String> {
    target: &'static str,
    properties: OrderedMap<K, Arc<Property<T, Lp>>>,
    attributes: AttributeContainer<L>,
    factories: Vec<FactoryVariant<T, Lp>>,
}

impl<T, K: ModelKey, L, Lp> Model<T, K, L, Lp> {
    pub(crate) fn from_parts(
        target: &'static str,
        properties: OrderedMap<K, Arc<Property<T, Lp>>>,
        attributes: AttributeContainer<L>,
        factories: Vec<FactoryVariant<T, Lp>>,
    ) -> Self {
        Self {
            target,
            properties,
            attributes,
            factories,
        }
    }

    /// Name of the target type.
    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.properties.keys()
    }

    pub fn properties(&self) -> impl ExactSizeIterator<Item = &Property<T, Lp>> {
        self.properties.values().map(|p| p.as_ref())
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&K, &Property<T, Lp>)> {
        self.properties.iter().map(|(k, p)| (k, p.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn has_property(&self, key: &K) -> bool {
        self.properties.contains_key(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.has_property(key)
    }

    /// # Errors
    ///
    /// [`ModelError::PropertyNotFound`] if no property has this key.
    pub fn property(&self, key: &K) -> ModelResult<&Property<T, Lp>> {
        self.properties
            .get(key)
            .map(|p| p.as_ref())
            .ok_or_else(|| ModelError::PropertyNotFound(key.key_name()))
    }

    pub(crate) fn shared_property(&self, key: &K) -> Option<&Arc<Property<T, Lp>>> {
        self.properties.get(key)
    }

    /// The property with its value type asserted to be `V`.
    pub fn property_as<V: Any>(&self, key: &K) -> ModelResult<TypedProperty<'_, T, V, Lp>> {
        self.property(key)?.typed::<V>()
    }

    pub fn get<V: Any + Clone>(&self, target: &T, key: &K) -> ModelResult<V> {
        self.property(key)?.get(target)
    }

    pub fn get_ref<'a, V: Any>(&self, target: &'a T, key: &K) -> ModelResult<&'a V> {
        self.property(key)?.get_ref(target)
    }

    pub fn set<V: Any>(&self, target: &mut T, key: &K, value: V) -> ModelResult<()> {
        self.property(key)?.set(target, value)
    }

    pub fn has_value(&self, target: &T, key: &K) -> ModelResult<bool> {
        Ok(self.property(key)?.has_value(target))
    }

    pub fn attributes(&self) -> &AttributeContainer<L> {
        &self.attributes
    }

    /// Factory variants in priority order; the primary one, if any, first.
    pub fn factory_variants(&self) -> &[FactoryVariant<T, Lp>] {
        &self.factories
    }

    pub fn primary_factory(&self) -> Option<&FactoryVariant<T, Lp>> {
        self.factories.first().filter(|f| f.is_primary())
    }

    pub fn can_create(&self) -> bool {
        !self.factories.is_empty()
    }

    /// Creates a target with the first variant whose parameters can all be
    /// left out.
    pub fn create(&self) -> ModelResult<T> {
        self.ensure_creatable()?;

        self.factories
            .iter()
            .find(|f| f.is_parameterless())
            .ok_or_else(|| ModelError::FactoryNotFound("no parameterless variant".into()))?
            .create_default()
    }

    /// Creates a target with the first variant that structurally accepts the
    /// positional arguments.
    pub fn create_with(&self, arguments: Vec<FactoryArg>) -> ModelResult<T> {
        self.ensure_creatable()?;

        factory::select(&self.factories, &arguments)
            .ok_or_else(|| {
                ModelError::FactoryNotFound(format!("{} positional arguments", arguments.len()))
            })?
            .create(arguments)
    }

    /// Creates a target with the first variant whose parameters match the
    /// arguments by name.
    pub fn create_named<'n, I>(&self, arguments: I) -> ModelResult<T>
    where
        I: IntoIterator<Item = (&'n str, FactoryArg)>,
    {
        self.ensure_creatable()?;

        let arguments: Vec<_> = arguments.into_iter().collect();
        let variant = self
            .factories
            .iter()
            .find(|f| f.accepts_named(&arguments))
            .ok_or_else(|| {
                let names: Vec<_> = arguments.iter().map(|(name, _)| *name).collect();
                ModelError::FactoryNotFound(format!("named arguments {names:?}"))
            })?;

        variant.create_named(arguments)
    }

    fn ensure_creatable(&self) -> ModelResult<()> {
        if self.can_create() {
            Ok(())
        } else {
            Err(ModelError::CreationNotSupported)
        }
    }
}

impl<T, K: fmt::Debug, L: fmt::Debug, Lp: fmt::Debug> fmt::Debug for Model<T, K, L, Lp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("target", &self.target)
            .field("properties", &self.properties)
            .field("attributes", &self.attributes)
            .field("factories", &self.factories)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, args, descriptor::ValueType, field_accessor, property::PropertyBuilder};

    #[derive(Debug, Default, PartialEq)]
    struct Reading {
        value: f64,
        unit: String,
    }

    fn model(creatable: bool) -> Model<Reading, String> {
        let mut builder = ModelBuilder::new("Reading");
        builder.attributes().set("sensor".to_string(), true);
        builder
            .property(
                "value".to_string(),
                PropertyBuilder::new("value")
                    .field(ValueType::of::<f64>(), field_accessor!(Reading, value))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        builder
            .property(
                "unit".to_string(),
                PropertyBuilder::new("unit")
                    .field(ValueType::of::<String>(), field_accessor!(Reading, unit))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        if creatable {
            let descriptor = crate::FactoryDescriptor::<Reading>::constructor("new", |mut args| {
                Ok(Reading {
                    value: args.take_or_else(0, || 0.0)?,
                    unit: args.take_or_else(1, String::new)?,
                })
            })
            .parameter(crate::ParameterDescriptor::of::<f64>("value").optional())
            .parameter(crate::ParameterDescriptor::of::<String>("unit").optional());

            let variant = FactoryVariant::from_descriptor(&descriptor, false, |name| {
                builder.find_property(name)
            })
            .unwrap();
            builder.factory(variant).unwrap();
        }

        builder.build()
    }

    #[test]
    fn test_lookup_and_access() {
        let model = model(false);
        let mut reading = Reading::default();

        assert_eq!(model.len(), model.keys().len());
        assert!(model.contains(&"unit".to_string()));
        assert!(!model.has_property(&"missing".to_string()));

        model.set(&mut reading, &"unit".to_string(), "hPa".to_string()).unwrap();
        assert_eq!(reading.unit, "hPa");

        let value = model.property_as::<f64>(&"value".to_string()).unwrap();
        value.set(&mut reading, 1013.25).unwrap();
        assert_eq!(value.get(&reading).unwrap(), 1013.25);

        let error = model.property(&"missing".to_string()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        let error = model.property_as::<u8>(&"value".to_string()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_creation() {
        assert_eq!(
            model(false).create().unwrap_err().kind(),
            ErrorKind::ContractViolation
        );

        let model = model(true);
        assert_eq!(model.create().unwrap(), Reading::default());

        let reading = model.create_with(args![2.5f64]).unwrap();
        assert_eq!(reading.value, 2.5);

        let reading = model
            .create_named([("unit", crate::arg("km".to_string()))])
            .unwrap();
        assert_eq!(reading.unit, "km");

        let linked = model.factory_variants()[0].parameters()[1].linked_property();
        assert_eq!(linked.map(|p| p.name()), Some("unit"));
    }
}
