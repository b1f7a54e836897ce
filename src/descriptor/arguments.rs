use std::any::Any;

use crate::errors::{ModelError, ModelResult};

/// A type-erased value passed into or out of a model.
pub type DynValue = Box<dyn Any>;

/// One positional argument for [`Model::create_with`](crate::Model::create_with).
pub enum FactoryArg {
    Null,
    Value(DynValue),
}

impl FactoryArg {
    pub fn is_null(&self) -> bool {
        matches!(self, FactoryArg::Null)
    }
}

impl std::fmt::Debug for FactoryArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FactoryArg::Null => f.write_str("Null"),
            FactoryArg::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// Wraps a value as a positional factory argument.
pub fn arg<V: Any>(value: V) -> FactoryArg {
    FactoryArg::Value(Box::new(value))
}

/// Builds a `Vec<FactoryArg>`; `null` stands for [`FactoryArg::Null`].
#[macro_export]
macro_rules! args {
    (@acc [$($out:expr),*]) => { ::std::vec![$($out),*] };
    (@acc [$($out:expr),*] null $(, $($rest:tt)*)?) => {
        $crate::args!(@acc [$($out,)* $crate::descriptor::FactoryArg::Null] $($($rest)*)?)
    };
    (@acc [$($out:expr),*] $value:expr $(, $($rest:tt)*)?) => {
        $crate::args!(@acc [$($out,)* $crate::descriptor::arg($value)] $($($rest)*)?)
    };
    ($($input:tt)*) => { $crate::args!(@acc [] $($input)*) };
}

/// The coerced arguments handed to a factory invoker.
///
/// Slots are in parameter order. An empty slot means the caller left an
/// optional parameter out, and the invoker should fall back to its default.
pub struct Arguments {
    factory: &'static str,
    parameters: Vec<Option<&'static str>>,
    slots: Vec<Option<DynValue>>,
}

impl Arguments {
    pub(crate) fn new(
        factory: &'static str,
        parameters: Vec<Option<&'static str>>,
        slots: Vec<Option<DynValue>>,
    ) -> Self {
        Self {
            factory,
            parameters,
            slots,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_supplied(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Option::is_some)
    }

    /// Takes a required argument.
    pub fn take<V: Any>(&mut self, index: usize) -> ModelResult<V> {
        match self.take_slot(index) {
            Some(value) => downcast(value),
            None => Err(ModelError::MissingArgument {
                factory: self.factory.to_string(),
                parameter: self.parameter_name(index),
            }),
        }
    }

    /// Takes an optional argument, computing the default when it was left out.
    pub fn take_or_else<V: Any>(&mut self, index: usize, default: impl FnOnce() -> V) -> ModelResult<V> {
        match self.take_slot(index) {
            Some(value) => downcast(value),
            None => Ok(default()),
        }
    }

    fn take_slot(&mut self, index: usize) -> Option<DynValue> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    fn parameter_name(&self, index: usize) -> String {
        match self.parameters.get(index).copied().flatten() {
            Some(name) => name.to_string(),
            None => format!("#{index}"),
        }
    }
}

fn downcast<V: Any>(value: DynValue) -> ModelResult<V> {
    value
        .downcast::<V>()
        .map(|v| *v)
        .map_err(|_| ModelError::mismatch::<V, dyn Any>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_and_defaults() {
        let mut arguments = Arguments::new(
            "new",
            vec![Some("x"), Some("y")],
            vec![Some(Box::new(3i32)), None],
        );

        assert!(arguments.is_supplied(0));
        assert_eq!(arguments.take::<i32>(0).unwrap(), 3);
        assert_eq!(arguments.take_or_else(1, || 7i32).unwrap(), 7);

        let error = arguments.take::<i32>(1).unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::InvalidFactoryConfiguration);
    }

    #[test]
    fn test_args_macro() {
        let arguments = crate::args![1i32, null, String::from("x")];

        assert_eq!(arguments.len(), 3);
        assert!(arguments[1].is_null());
    }
}
