use std::{any::Any, fmt::Debug, hash::Hash, sync::Arc};

use super::{Accessor, ComputedSetter, Liveness, Property};
use crate::{
    attributes::{AttributeContainerBuilder, AttributeValue},
    descriptor::{DynValue, FieldAccessor, Initialization, MemberDescriptor, ValueType},
    errors::{ModelError, ModelResult},
};

/// Assembles a [`Property`].
///
/// Either start from a member ([`Self::from_member`]), which brings its field
/// accessors and initialization state along, or supply getter, setter and
/// initialization predicate explicitly. Building without a getter, or with
/// an unresolved initialization state, fails.
pub struct PropertyBuilder<T, Lp = String> {
    name: String,
    value_type: Option<ValueType>,
    accessor: Option<Accessor<T>>,
    setter: Option<ComputedSetter<T>>,
    liveness: Option<Liveness<T>>,
    attributes: AttributeContainerBuilder<Lp>,
}

impl<T: 'static, Lp: Eq + Hash + Clone + Debug> PropertyBuilder<T, Lp> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: None,
            accessor: None,
            setter: None,
            liveness: Some(Liveness::Always),
            attributes: AttributeContainerBuilder::new(),
        }
    }

    /// Starts from a declared member. A deferred member without a presence
    /// probe leaves the initialization state unresolved.
    pub fn from_member(member: &MemberDescriptor<T>) -> Self {
        let liveness = match member.initialization {
            Initialization::Always => Some(Liveness::Always),
            Initialization::Deferred { probe: Some(probe) } => Some(Liveness::Probe(probe)),
            Initialization::Deferred { probe: None } => None,
        };

        Self {
            name: member.name.to_string(),
            value_type: Some(member.value_type),
            accessor: Some(Accessor::Field(member.accessor)),
            setter: None,
            liveness,
            attributes: AttributeContainerBuilder::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn getter<V, F>(mut self, get: F) -> Self
    where
        V: Any,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.value_type = Some(ValueType::of::<V>());
        self.accessor = Some(Accessor::Computed {
            get: Arc::new(move |target| Box::new(get(target)) as DynValue),
            set: None,
        });
        self
    }

    pub fn setter<V, F>(mut self, set: F) -> Self
    where
        V: Any,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.setter = Some(Arc::new(move |target, value| {
            let value = value
                .downcast::<V>()
                .map_err(|_| ModelError::mismatch::<V, dyn Any>())?;
            set(target, *value);
            Ok(())
        }));
        self
    }

    /// Uses the given field accessors directly.
    pub fn field(mut self, value_type: ValueType, accessor: FieldAccessor<T>) -> Self {
        self.value_type = Some(value_type);
        self.accessor = Some(Accessor::Field(accessor));
        self
    }

    pub fn initialized_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.liveness = Some(Liveness::Predicate(Arc::new(predicate)));
        self
    }

    pub fn always_initialized(mut self) -> Self {
        self.liveness = Some(Liveness::Always);
        self
    }

    /// Wires a sibling `bool` field as the initialization flag.
    pub(crate) fn flagged_by(mut self, flag: FieldAccessor<T>) -> Self {
        self.liveness = Some(Liveness::Flag(flag));
        self
    }

    pub fn is_initialization_resolved(&self) -> bool {
        self.liveness.is_some()
    }

    pub fn attributes(&mut self) -> &mut AttributeContainerBuilder<Lp> {
        &mut self.attributes
    }

    pub fn attribute(mut self, label: Lp, value: impl Into<AttributeValue>) -> Self {
        self.attributes.set(label, value);
        self
    }

    pub fn build(self) -> ModelResult<Property<T, Lp>> {
        let (Some(value_type), Some(accessor)) = (self.value_type, self.accessor) else {
            return Err(ModelError::Contract(format!(
                "the property '{}' has no getter",
                self.name
            )));
        };

        let accessor = match (accessor, self.setter) {
            (accessor, None) => accessor,
            (Accessor::Computed { get, .. }, Some(set)) => Accessor::Computed { get, set: Some(set) },
            (Accessor::Field(_), Some(_)) => {
                return Err(ModelError::Contract(format!(
                    "the property '{}' mixes a field accessor with a computed setter",
                    self.name
                )));
            }
        };

        let liveness = self
            .liveness
            .ok_or_else(|| ModelError::MissingInitializationFlag(self.name.clone()))?;

        Ok(Property::from_parts(
            self.name,
            value_type,
            accessor,
            liveness,
            self.attributes.build(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, field_accessor};

    #[derive(Debug, Default)]
    struct Gauge {
        level: u8,
        label: Option<String>,
    }

    #[test]
    fn test_field_property_reads_and_writes() {
        let property = PropertyBuilder::<Gauge>::new("level")
            .field(ValueType::of::<u8>(), field_accessor!(Gauge, level))
            .build()
            .unwrap();

        let mut gauge = Gauge::default();
        property.set(&mut gauge, 7u8).unwrap();

        assert_eq!(*property.get_ref::<u8>(&gauge).unwrap(), 7);
        assert_eq!(property.get::<u8>(&gauge).unwrap(), 7);
        assert_eq!(
            property.set(&mut gauge, 7u32).unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_readonly_property_refuses_set() {
        let property = PropertyBuilder::<Gauge>::new("level")
            .field(ValueType::of::<u8>(), field_accessor!(Gauge, level, readonly))
            .build()
            .unwrap();

        let error = property.set(&mut Gauge::default(), 1u8).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ContractViolation);
        assert!(!property.is_mutable());
    }

    #[test]
    fn test_computed_property_with_predicate() {
        let property = PropertyBuilder::<Gauge>::new("label")
            .getter(|gauge: &Gauge| gauge.label.clone().unwrap_or_default())
            .setter(|gauge: &mut Gauge, label: String| gauge.label = Some(label))
            .initialized_when(|gauge| gauge.label.is_some())
            .build()
            .unwrap();

        let mut gauge = Gauge::default();
        assert!(!property.has_value(&gauge));

        property.set(&mut gauge, "fuel".to_string()).unwrap();
        assert!(property.has_value(&gauge));
        assert_eq!(property.get::<String>(&gauge).unwrap(), "fuel");
        assert_eq!(
            property.get_ref::<String>(&gauge).unwrap_err().kind(),
            ErrorKind::ContractViolation
        );
    }

    #[test]
    fn test_missing_getter_is_a_contract_violation() {
        let error = PropertyBuilder::<Gauge>::new("level").build().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ContractViolation);
    }
}
