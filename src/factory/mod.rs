//! Factory variants: the ways a model can construct its target.

use std::{fmt, sync::Arc};

use crate::{
    annotations::{self, builtin},
    descriptor::{Arguments, DynValue, FactoryArg, FactoryDescriptor, FactoryKind, Invoker, ParameterDescriptor, ValueType},
    errors::{ModelError, ModelResult},
    property::Property,
};

/// One parameter of a [`FactoryVariant`].
pub struct FactoryParameter<T, Lp = String> {
    name: &'static str,
    index: usize,
    value_type: ValueType,
    optional: bool,
    linked_property: Option<Arc<Property<T, Lp>>>,
    descriptor: ParameterDescriptor,
}

impl<T, Lp> FactoryParameter<T, Lp> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The property this parameter initializes, if one could be linked.
    pub fn linked_property(&self) -> Option<&Arc<Property<T, Lp>>> {
        self.linked_property.as_ref()
    }

    /// The parameter as it was declared.
    pub fn descriptor(&self) -> &ParameterDescriptor {
        &self.descriptor
    }
}

impl<T, Lp> Clone for FactoryParameter<T, Lp> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            index: self.index,
            value_type: self.value_type,
            optional: self.optional,
            linked_property: self.linked_property.clone(),
            descriptor: self.descriptor.clone(),
        }
    }
}

impl<T, Lp> fmt::Debug for FactoryParameter<T, Lp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryParameter")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("value_type", &self.value_type)
            .field("optional", &self.optional)
            .field(
                "linked_property",
                &self.linked_property.as_ref().map(|p| p.name().to_string()),
            )
            .finish()
    }
}

/// A constructor or factory function that builds a `T`.
pub struct FactoryVariant<T, Lp = String> {
    name: &'static str,
    kind: FactoryKind,
    is_primary: bool,
    parameters: Vec<FactoryParameter<T, Lp>>,
    invoker: Invoker<T>,
}

impl<T, Lp> FactoryVariant<T, Lp> {
    /// Resolves the parameters of a declared factory.
    ///
    /// Each parameter is linked to the property named by its
    /// `parameter(property = ..)` annotation, or else to the property with the
    /// parameter's own name. `link` looks properties up by name.
    pub fn from_descriptor<F>(
        descriptor: &FactoryDescriptor<T>,
        is_primary: bool,
        link: F,
    ) -> ModelResult<Self>
    where
        F: Fn(&str) -> Option<Arc<Property<T, Lp>>>,
    {
        let parameters = descriptor
            .parameters
            .iter()
            .enumerate()
            .map(|(index, parameter)| {
                let name = parameter.name.ok_or_else(|| ModelError::UnnamedParameter {
                    factory: descriptor.name.to_string(),
                    index,
                })?;

                let linked_name = annotations::find(&parameter.annotations, builtin::PARAMETER)
                    .and_then(|a| a.argument("property", 0))
                    .and_then(|v| v.as_str())
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or(name);

                Ok(FactoryParameter {
                    name,
                    index,
                    value_type: parameter.value_type,
                    optional: parameter.optional,
                    linked_property: link(linked_name),
                    descriptor: parameter.clone(),
                })
            })
            .collect::<ModelResult<Vec<_>>>()?;

        Ok(Self {
            name: descriptor.name,
            kind: descriptor.kind,
            is_primary,
            parameters,
            invoker: descriptor.invoker,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FactoryKind {
        self.kind
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn parameters(&self) -> &[FactoryParameter<T, Lp>] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&FactoryParameter<T, Lp>> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Whether every parameter can be left out.
    pub fn is_parameterless(&self) -> bool {
        self.parameters.iter().all(|p| p.optional)
    }

    /// Structural positional match: enough parameters, every left-out
    /// trailing parameter optional, every supplied argument type-compatible.
    pub fn accepts(&self, arguments: &[FactoryArg]) -> bool {
        if arguments.len() > self.parameters.len() {
            return false;
        }

        let (supplied, rest) = self.parameters.split_at(arguments.len());

        rest.iter().all(|p| p.optional)
            && supplied
                .iter()
                .zip(arguments)
                .all(|(p, argument)| p.value_type.accepts(argument))
    }

    /// Named match: every name is a parameter with a compatible argument and
    /// every parameter left out is optional.
    pub fn accepts_named(&self, arguments: &[(&str, FactoryArg)]) -> bool {
        let supplied = arguments.iter().all(|(name, argument)| {
            self.parameter(name)
                .is_some_and(|p| p.value_type.accepts(argument))
        });

        supplied
            && self
                .parameters
                .iter()
                .all(|p| p.optional || arguments.iter().any(|(name, _)| *name == p.name))
    }

    /// Invokes the factory with positional arguments.
    pub fn create(&self, arguments: Vec<FactoryArg>) -> ModelResult<T> {
        if arguments.len() > self.parameters.len() {
            return Err(ModelError::FactoryNotFound(format!(
                "'{}' takes {} arguments, {} were given",
                self.name,
                self.parameters.len(),
                arguments.len()
            )));
        }

        let mut slots = Vec::with_capacity(self.parameters.len());
        let mut arguments = arguments.into_iter();

        for parameter in &self.parameters {
            match arguments.next() {
                Some(argument) => slots.push(Some(parameter.value_type.coerce(argument)?)),
                None => slots.push(self.omit(parameter)?),
            }
        }

        self.invoke(slots)
    }

    /// Invokes the factory with arguments matched to parameters by name.
    pub fn create_named<'n, I>(&self, arguments: I) -> ModelResult<T>
    where
        I: IntoIterator<Item = (&'n str, FactoryArg)>,
    {
        let mut slots: Vec<Option<DynValue>> = self.parameters.iter().map(|_| None).collect();

        for (name, argument) in arguments {
            let parameter = self.parameter(name).ok_or_else(|| ModelError::UnknownParameter {
                factory: self.name.to_string(),
                parameter: name.to_string(),
            })?;

            slots[parameter.index] = Some(parameter.value_type.coerce(argument)?);
        }

        for parameter in &self.parameters {
            if slots[parameter.index].is_none() {
                self.omit(parameter)?;
            }
        }

        self.invoke(slots)
    }

    /// Invokes the factory leaving out every parameter.
    pub fn create_default(&self) -> ModelResult<T> {
        self.create(Vec::new())
    }

    fn omit(&self, parameter: &FactoryParameter<T, Lp>) -> ModelResult<Option<DynValue>> {
        if parameter.optional {
            Ok(None)
        } else {
            Err(ModelError::MissingArgument {
                factory: self.name.to_string(),
                parameter: parameter.name.to_string(),
            })
        }
    }

    fn invoke(&self, slots: Vec<Option<DynValue>>) -> ModelResult<T> {
        let names = self.parameters.iter().map(|p| Some(p.name)).collect();
        (self.invoker)(Arguments::new(self.name, names, slots))
    }
}

impl<T, Lp> Clone for FactoryVariant<T, Lp> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind,
            is_primary: self.is_primary,
            parameters: self.parameters.clone(),
            invoker: self.invoker,
        }
    }
}

impl<T, Lp> fmt::Debug for FactoryVariant<T, Lp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryVariant")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("is_primary", &self.is_primary)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// The first variant, in order, that structurally accepts the arguments.
pub fn select<'a, T, Lp>(
    variants: &'a [FactoryVariant<T, Lp>],
    arguments: &[FactoryArg],
) -> Option<&'a FactoryVariant<T, Lp>> {
    variants.iter().find(|v| v.accepts(arguments))
}
