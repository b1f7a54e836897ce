use std::fmt;

use strum::{AsRefStr, Display};

use super::{Arguments, ValueType, Visibility};
use crate::{annotations::Annotation, errors::ModelResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum FactoryKind {
    /// The memberwise constructor of the type.
    PrimaryConstructor,
    /// Any other associated function returning `Self`.
    Constructor,
    /// A function explicitly marked as a factory.
    Function,
}

pub type Invoker<T> = fn(Arguments) -> ModelResult<T>;

#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    /// `None` for parameters bound by a pattern rather than a name.
    pub name: Option<&'static str>,
    pub index: usize,
    pub value_type: ValueType,
    /// Whether the parameter has a default and can be left out.
    pub optional: bool,
    pub annotations: Vec<Annotation>,
}

impl ParameterDescriptor {
    pub fn new(name: &'static str, value_type: ValueType) -> Self {
        Self {
            name: Some(name),
            index: 0,
            value_type,
            optional: false,
            annotations: Vec::new(),
        }
    }

    pub fn of<V: 'static>(name: &'static str) -> Self {
        Self::new(name, ValueType::of::<V>())
    }

    pub fn unnamed(value_type: ValueType) -> Self {
        Self {
            name: None,
            ..Self::new("", value_type)
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A constructor or factory function of a target type.
pub struct FactoryDescriptor<T> {
    pub name: &'static str,
    pub kind: FactoryKind,
    pub visibility: Visibility,
    pub annotations: Vec<Annotation>,
    pub parameters: Vec<ParameterDescriptor>,
    pub invoker: Invoker<T>,
}

impl<T> FactoryDescriptor<T> {
    pub fn new(name: &'static str, kind: FactoryKind, invoker: Invoker<T>) -> Self {
        Self {
            name,
            kind,
            visibility: Visibility::Public,
            annotations: Vec::new(),
            parameters: Vec::new(),
            invoker,
        }
    }

    pub fn primary_constructor(name: &'static str, invoker: Invoker<T>) -> Self {
        Self::new(name, FactoryKind::PrimaryConstructor, invoker)
    }

    pub fn constructor(name: &'static str, invoker: Invoker<T>) -> Self {
        Self::new(name, FactoryKind::Constructor, invoker)
    }

    pub fn function(name: &'static str, invoker: Invoker<T>) -> Self {
        Self::new(name, FactoryKind::Function, invoker)
    }

    /// Appends a parameter, assigning it the next index.
    pub fn parameter(mut self, mut parameter: ParameterDescriptor) -> Self {
        parameter.index = self.parameters.len();
        self.parameters.push(parameter);
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

impl<T> Clone for FactoryDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind,
            visibility: self.visibility,
            annotations: self.annotations.clone(),
            parameters: self.parameters.clone(),
            invoker: self.invoker,
        }
    }
}

impl<T> fmt::Debug for FactoryDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("visibility", &self.visibility)
            .field("annotations", &self.annotations)
            .field("parameters", &self.parameters)
            .finish()
    }
}
