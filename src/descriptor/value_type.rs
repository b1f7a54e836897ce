use std::{
    any::{Any, TypeId},
    fmt,
};

use super::{DynValue, FactoryArg};
use crate::errors::{ModelError, ModelResult};

#[derive(Clone, Copy)]
struct Nullable {
    inner: TypeId,
    inner_name: &'static str,
    none: fn() -> DynValue,
    some: fn(DynValue) -> Result<DynValue, DynValue>,
}

/// Explicit type tag carried by members, properties and parameters.
///
/// Compatibility is exact type identity. A nullable tag (built with
/// [`ValueType::optional`]) describes an `Option<U>` and also accepts a null
/// argument or a bare `U`, which gets wrapped into `Some`.
#[derive(Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
    nullable: Option<Nullable>,
}

fn none<U: 'static>() -> DynValue {
    Box::new(None::<U>)
}

fn some<U: 'static>(value: DynValue) -> Result<DynValue, DynValue> {
    value
        .downcast::<U>()
        .map(|inner| Box::new(Some(*inner)) as DynValue)
}

impl ValueType {
    pub fn of<V: 'static>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: std::any::type_name::<V>(),
            nullable: None,
        }
    }

    /// The tag of `Option<U>`.
    pub fn optional<U: 'static>() -> Self {
        Self {
            id: TypeId::of::<Option<U>>(),
            name: std::any::type_name::<Option<U>>(),
            nullable: Some(Nullable {
                inner: TypeId::of::<U>(),
                inner_name: std::any::type_name::<U>(),
                none: none::<U>,
                some: some::<U>,
            }),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable.is_some()
    }

    pub fn is<V: 'static>(&self) -> bool {
        self.id == TypeId::of::<V>()
    }

    /// Whether an argument of the given runtime type fits.
    pub fn accepts_type(&self, id: TypeId) -> bool {
        self.id == id || self.nullable.is_some_and(|n| n.inner == id)
    }

    pub fn accepts(&self, argument: &FactoryArg) -> bool {
        match argument {
            FactoryArg::Null => self.is_nullable(),
            FactoryArg::Value(value) => self.accepts_type((**value).type_id()),
        }
    }

    /// Converts an argument into a value of exactly this type.
    pub fn coerce(&self, argument: FactoryArg) -> ModelResult<DynValue> {
        let nullable = self.nullable;

        match argument {
            FactoryArg::Null => match nullable {
                Some(n) => Ok((n.none)()),
                None => Err(ModelError::TypeMismatch {
                    expected: self.name,
                    found: "null",
                }),
            },
            FactoryArg::Value(value) if (*value).type_id() == self.id => Ok(value),
            FactoryArg::Value(value) => match nullable {
                Some(n) => (n.some)(value).map_err(|_| ModelError::TypeMismatch {
                    expected: n.inner_name,
                    found: "another type",
                }),
                None => Err(ModelError::TypeMismatch {
                    expected: self.name,
                    found: "another type",
                }),
            },
        }
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueType").field(&self.name).finish()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::arg;

    #[test]
    fn test_exact_identity_without_widening() {
        let int = ValueType::of::<i32>();

        assert!(int.accepts(&arg(1i32)));
        assert!(!int.accepts(&arg(1i16)));
        assert!(!int.accepts(&arg(1i64)));
        assert!(!int.accepts(&FactoryArg::Null));
    }

    #[test]
    fn test_nullable_accepts_null_and_bare_values() {
        let name = ValueType::optional::<String>();

        assert!(name.accepts(&FactoryArg::Null));
        assert!(name.accepts(&arg(String::from("x"))));
        assert!(name.accepts(&arg(Some(String::from("x")))));

        let wrapped = name.coerce(arg(String::from("x"))).unwrap();
        assert_eq!(
            wrapped.downcast_ref::<Option<String>>(),
            Some(&Some("x".to_string()))
        );

        let null = name.coerce(FactoryArg::Null).unwrap();
        assert_eq!(null.downcast_ref::<Option<String>>(), Some(&None));
    }
}
