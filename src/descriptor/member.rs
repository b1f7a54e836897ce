use std::{any::Any, fmt};

use super::{ValueType, Visibility};
use crate::annotations::Annotation;

pub type FieldGetter<T> = for<'a> fn(&'a T) -> &'a dyn Any;
pub type FieldSetter<T> = for<'a> fn(&'a mut T) -> &'a mut dyn Any;

/// Borrowing accessors for one field of `T`. A readonly field has no setter.
pub struct FieldAccessor<T> {
    get: FieldGetter<T>,
    get_mut: Option<FieldSetter<T>>,
}

impl<T> FieldAccessor<T> {
    pub fn new(get: FieldGetter<T>, get_mut: FieldSetter<T>) -> Self {
        Self {
            get,
            get_mut: Some(get_mut),
        }
    }

    pub fn readonly(get: FieldGetter<T>) -> Self {
        Self { get, get_mut: None }
    }

    pub fn is_mutable(&self) -> bool {
        self.get_mut.is_some()
    }

    pub fn get<'a>(&self, target: &'a T) -> &'a dyn Any {
        (self.get)(target)
    }

    pub fn get_mut<'a>(&self, target: &'a mut T) -> Option<&'a mut dyn Any> {
        self.get_mut.map(|get_mut| get_mut(target))
    }
}

impl<T> Clone for FieldAccessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldAccessor<T> {}

/// Builds a [`FieldAccessor`] for a named field.
///
/// ```ignore
/// let accessor = field_accessor!(Car, mileage);
/// let id = field_accessor!(Car, id, readonly);
/// ```
#[macro_export]
macro_rules! field_accessor {
    ($target:ty, $field:ident) => {{
        fn get(target: &$target) -> &dyn ::core::any::Any {
            &target.$field
        }
        fn get_mut(target: &mut $target) -> &mut dyn ::core::any::Any {
            &mut target.$field
        }
        $crate::descriptor::FieldAccessor::<$target>::new(get, get_mut)
    }};
    ($target:ty, $field:ident, readonly) => {{
        fn get(target: &$target) -> &dyn ::core::any::Any {
            &target.$field
        }
        $crate::descriptor::FieldAccessor::<$target>::readonly(get)
    }};
}

/// Whether a member is known to hold a value at all times.
pub enum Initialization<T> {
    Always,
    /// The value may be absent. A probe, when present, answers whether it is
    /// set; otherwise a `has<Name>` companion flag has to exist.
    Deferred { probe: Option<fn(&T) -> bool> },
}

impl<T> Clone for Initialization<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Initialization<T> {}

impl<T> fmt::Debug for Initialization<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Initialization::Always => f.write_str("Always"),
            Initialization::Deferred { probe } => f
                .debug_struct("Deferred")
                .field("probe", &probe.is_some())
                .finish(),
        }
    }
}

/// One declared field of a target type.
pub struct MemberDescriptor<T> {
    pub name: &'static str,
    pub value_type: ValueType,
    pub visibility: Visibility,
    pub initialization: Initialization<T>,
    pub annotations: Vec<Annotation>,
    pub accessor: FieldAccessor<T>,
}

impl<T> MemberDescriptor<T> {
    /// A public, always-initialized member without annotations.
    pub fn new(name: &'static str, value_type: ValueType, accessor: FieldAccessor<T>) -> Self {
        Self {
            name,
            value_type,
            visibility: Visibility::Public,
            initialization: Initialization::Always,
            annotations: Vec::new(),
            accessor,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn deferred(mut self, probe: Option<fn(&T) -> bool>) -> Self {
        self.initialization = Initialization::Deferred { probe };
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn is_mutable(&self) -> bool {
        self.accessor.is_mutable()
    }
}

impl<T> Clone for MemberDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            value_type: self.value_type,
            visibility: self.visibility,
            initialization: self.initialization,
            annotations: self.annotations.clone(),
            accessor: self.accessor,
        }
    }
}

impl<T> fmt::Debug for MemberDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("visibility", &self.visibility)
            .field("mutable", &self.is_mutable())
            .field("initialization", &self.initialization)
            .field("annotations", &self.annotations)
            .finish()
    }
}
