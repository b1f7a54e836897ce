//! Typed accessors bound to a member of a target type.

use std::{any::Any, fmt, marker::PhantomData, sync::Arc};

use crate::{
    attributes::AttributeContainer,
    descriptor::{DynValue, FieldAccessor, ValueType},
    errors::{ModelError, ModelResult},
};

pub mod builder;

pub use builder::PropertyBuilder;

pub(crate) type ComputedGetter<T> = Arc<dyn Fn(&T) -> DynValue + Send + Sync>;
pub(crate) type ComputedSetter<T> = Arc<dyn Fn(&mut T, DynValue) -> ModelResult<()> + Send + Sync>;

pub(crate) enum Accessor<T> {
    /// Borrowing access straight into a field.
    Field(FieldAccessor<T>),
    /// Owned values produced by closures; no borrowing reads.
    Computed {
        get: ComputedGetter<T>,
        set: Option<ComputedSetter<T>>,
    },
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(field) => Accessor::Field(*field),
            Accessor::Computed { get, set } => Accessor::Computed {
                get: get.clone(),
                set: set.clone(),
            },
        }
    }
}

/// Answers whether a property currently holds a value.
pub(crate) enum Liveness<T> {
    Always,
    /// A sibling `bool` field (`has_<name>`).
    Flag(FieldAccessor<T>),
    Probe(fn(&T) -> bool),
    Predicate(Arc<dyn Fn(&T) -> bool + Send + Sync>),
}

impl<T> Clone for Liveness<T> {
    fn clone(&self) -> Self {
        match self {
            Liveness::Always => Liveness::Always,
            Liveness::Flag(flag) => Liveness::Flag(*flag),
            Liveness::Probe(probe) => Liveness::Probe(*probe),
            Liveness::Predicate(predicate) => Liveness::Predicate(predicate.clone()),
        }
    }
}

impl<T> Liveness<T> {
    fn check(&self, target: &T) -> bool {
        match self {
            Liveness::Always => true,
            Liveness::Flag(flag) => flag
                .get(target)
                .downcast_ref::<bool>()
                .copied()
                .unwrap_or(false),
            Liveness::Probe(probe) => probe(target),
            Liveness::Predicate(predicate) => predicate(target),
        }
    }
}

/// A named, typed accessor for one member of `T`, with its own attributes.
///
/// The value type is carried as a [`ValueType`] tag; every typed operation
/// checks it and fails with a type mismatch instead of misreading memory.
pub struct Property<T, Lp = String> {
    name: String,
    value_type: ValueType,
    accessor: Accessor<T>,
    liveness: Liveness<T>,
    attributes: AttributeContainer<Lp>,
}

impl<T, Lp> Property<T, Lp> {
    pub(crate) fn from_parts(
        name: String,
        value_type: ValueType,
        accessor: Accessor<T>,
        liveness: Liveness<T>,
        attributes: AttributeContainer<Lp>,
    ) -> Self {
        Self {
            name,
            value_type,
            accessor,
            liveness,
            attributes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn attributes(&self) -> &AttributeContainer<Lp> {
        &self.attributes
    }

    pub fn is_mutable(&self) -> bool {
        match &self.accessor {
            Accessor::Field(field) => field.is_mutable(),
            Accessor::Computed { set, .. } => set.is_some(),
        }
    }

    /// Whether the member holds a value right now. Never cached.
    pub fn has_value(&self, target: &T) -> bool {
        self.liveness.check(target)
    }

    /// Reads a copy of the value.
    pub fn get<V: Any + Clone>(&self, target: &T) -> ModelResult<V> {
        match &self.accessor {
            Accessor::Field(field) => field
                .get(target)
                .downcast_ref::<V>()
                .cloned()
                .ok_or_else(|| self.mismatch::<V>()),
            Accessor::Computed { get, .. } => get(target)
                .downcast::<V>()
                .map(|value| *value)
                .map_err(|_| self.mismatch::<V>()),
        }
    }

    /// Borrows the value. Only field-backed properties can lend references.
    pub fn get_ref<'a, V: Any>(&self, target: &'a T) -> ModelResult<&'a V> {
        match &self.accessor {
            Accessor::Field(field) => field
                .get(target)
                .downcast_ref::<V>()
                .ok_or_else(|| self.mismatch::<V>()),
            Accessor::Computed { .. } => Err(ModelError::Contract(format!(
                "the computed property '{}' cannot lend a reference",
                self.name
            ))),
        }
    }

    /// Reads the value without knowing its type.
    pub fn get_dyn<'a>(&self, target: &'a T) -> Option<&'a dyn Any> {
        match &self.accessor {
            Accessor::Field(field) => Some(field.get(target)),
            Accessor::Computed { .. } => None,
        }
    }

    pub fn set<V: Any>(&self, target: &mut T, value: V) -> ModelResult<()> {
        match &self.accessor {
            Accessor::Field(field) => {
                let slot = field
                    .get_mut(target)
                    .ok_or_else(|| ModelError::ImmutableProperty(self.name.clone()))?;
                let slot = slot.downcast_mut::<V>().ok_or_else(|| self.mismatch::<V>())?;

                *slot = value;
                Ok(())
            }
            Accessor::Computed { set: Some(set), .. } => set(target, Box::new(value)),
            Accessor::Computed { set: None, .. } => {
                Err(ModelError::ImmutableProperty(self.name.clone()))
            }
        }
    }

    /// A view of this property with its value type fixed to `V`.
    pub fn typed<V: Any>(&self) -> ModelResult<TypedProperty<'_, T, V, Lp>> {
        if self.value_type.is::<V>() {
            Ok(TypedProperty {
                property: self,
                _value: PhantomData,
            })
        } else {
            Err(self.mismatch::<V>())
        }
    }

    fn mismatch<V>(&self) -> ModelError {
        ModelError::TypeMismatch {
            expected: std::any::type_name::<V>(),
            found: self.value_type.name(),
        }
    }
}

impl<T, Lp: Clone> Clone for Property<T, Lp> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            value_type: self.value_type,
            accessor: self.accessor.clone(),
            liveness: self.liveness.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

impl<T, Lp: fmt::Debug> fmt::Debug for Property<T, Lp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("mutable", &self.is_mutable())
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// A [`Property`] whose value type has been checked to be `V`.
pub struct TypedProperty<'a, T, V, Lp = String> {
    property: &'a Property<T, Lp>,
    _value: PhantomData<fn() -> V>,
}

impl<T, V, Lp: fmt::Debug> fmt::Debug for TypedProperty<'_, T, V, Lp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedProperty")
            .field("property", self.property)
            .finish()
    }
}

impl<'a, T, V: Any, Lp> TypedProperty<'a, T, V, Lp> {
    pub fn property(&self) -> &'a Property<T, Lp> {
        self.property
    }

    pub fn name(&self) -> &'a str {
        self.property.name()
    }

    pub fn get(&self, target: &T) -> ModelResult<V>
    where
        V: Clone,
    {
        self.property.get(target)
    }

    pub fn get_ref<'t>(&self, target: &'t T) -> ModelResult<&'t V> {
        self.property.get_ref(target)
    }

    pub fn set(&self, target: &mut T, value: V) -> ModelResult<()> {
        self.property.set(target, value)
    }

    pub fn has_value(&self, target: &T) -> bool {
        self.property.has_value(target)
    }
}

impl<T, V, Lp> Clone for TypedProperty<'_, T, V, Lp> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V, Lp> Copy for TypedProperty<'_, T, V, Lp> {}
