//! Annotation instances and the registry that classifies them.
//!
//! An [`Annotation`] is what a member, type or parameter carries: an identity
//! ([`AnnotationType`]) plus its arguments. What an annotation *means* to the
//! extraction engine (attribute, inclusion marker, exclusion marker, which
//! argument holds its value) is not stored on the annotation itself but looked
//! up in an [`AnnotationRegistry`].

use std::fmt;

use serde::Serialize;

use crate::{attributes::AttributeValue, utils::simple_name};

pub mod builtin;
pub mod registry;

pub use registry::{AnnotationDeclaration, AnnotationKind, AnnotationRegistry, AnnotationRegistryBuilder};

/// Identity of an annotation, spelled as its path (`Unit`, `units::Unit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AnnotationType(&'static str);

impl AnnotationType {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &'static str {
        self.0
    }

    /// The last path segment, used as the label for string-labelled models.
    pub fn simple_name(&self) -> &'static str {
        simple_name(self.0)
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationArgument {
    pub name: Option<&'static str>,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    ty: AnnotationType,
    arguments: Vec<AnnotationArgument>,
}

impl Annotation {
    /// A presence-only annotation.
    pub fn marker(path: &'static str) -> Self {
        Self {
            ty: AnnotationType::new(path),
            arguments: Vec::new(),
        }
    }

    pub fn new(ty: AnnotationType) -> Self {
        Self {
            ty,
            arguments: Vec::new(),
        }
    }

    /// Adds a named argument.
    pub fn with(mut self, name: &'static str, value: impl Into<AttributeValue>) -> Self {
        self.arguments.push(AnnotationArgument {
            name: Some(name),
            value: value.into(),
        });
        self
    }

    /// Adds a positional argument.
    pub fn with_positional(mut self, value: impl Into<AttributeValue>) -> Self {
        self.arguments.push(AnnotationArgument {
            name: None,
            value: value.into(),
        });
        self
    }

    pub fn ty(&self) -> AnnotationType {
        self.ty
    }

    pub fn is(&self, ty: AnnotationType) -> bool {
        self.ty == ty
    }

    pub fn arguments(&self) -> &[AnnotationArgument] {
        &self.arguments
    }

    pub fn named(&self, name: &str) -> Option<&AttributeValue> {
        self.arguments
            .iter()
            .find(|a| a.name == Some(name))
            .map(|a| &a.value)
    }

    pub fn positional(&self, index: usize) -> Option<&AttributeValue> {
        self.arguments
            .iter()
            .filter(|a| a.name.is_none())
            .nth(index)
            .map(|a| &a.value)
    }

    /// Finds the argument for a declared parameter: by name first, then by
    /// its position among the positional arguments.
    pub fn argument(&self, name: &str, position: usize) -> Option<&AttributeValue> {
        self.named(name).or_else(|| self.positional(position))
    }
}

/// Finds the first annotation of the given type.
pub fn find(annotations: &[Annotation], ty: AnnotationType) -> Option<&Annotation> {
    annotations.iter().find(|a| a.is(ty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_lookup_prefers_names() {
        let annotation = Annotation::marker("units::Unit")
            .with_positional("km")
            .with("precision", 2);

        assert_eq!(annotation.ty().simple_name(), "Unit");
        assert_eq!(annotation.argument("symbol", 0), Some(&AttributeValue::from("km")));
        assert_eq!(annotation.argument("precision", 1), Some(&AttributeValue::Int(2)));
        assert_eq!(annotation.argument("missing", 1), None);
    }
}
