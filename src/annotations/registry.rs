use std::collections::HashMap;

use strum::{AsRefStr, Display};

use super::{AnnotationType, builtin};

/// What an annotation type is tagged as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum AnnotationKind {
    /// Becomes a model or property attribute.
    Attribute,
    /// Includes the annotated member under the opt-in policy.
    Inclusion,
    /// Excludes the annotated member under the opt-out policy.
    Exclusion,
}

/// The static tags and declared parameters of one annotation type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationDeclaration {
    kinds: Vec<AnnotationKind>,
    parameters: Vec<&'static str>,
    value_parameter: Option<&'static str>,
}

impl AnnotationDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute() -> Self {
        Self::new().with_kind(AnnotationKind::Attribute)
    }

    pub fn inclusion() -> Self {
        Self::new().with_kind(AnnotationKind::Inclusion)
    }

    pub fn exclusion() -> Self {
        Self::new().with_kind(AnnotationKind::Exclusion)
    }

    pub fn with_kind(mut self, kind: AnnotationKind) -> Self {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self
    }

    /// Declares the next parameter, in positional order.
    pub fn parameter(mut self, name: &'static str) -> Self {
        if !self.parameters.contains(&name) {
            self.parameters.push(name);
        }
        self
    }

    /// Declares a parameter and marks it as the one holding the value.
    pub fn value(mut self, name: &'static str) -> Self {
        self = self.parameter(name);
        self.value_parameter = Some(name);
        self
    }

    pub fn is(&self, kind: AnnotationKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn kinds(&self) -> &[AnnotationKind] {
        &self.kinds
    }

    pub fn parameters(&self) -> &[&'static str] {
        &self.parameters
    }

    /// The marked value parameter, if one was declared explicitly.
    pub fn value_parameter(&self) -> Option<&'static str> {
        self.value_parameter
    }

    pub fn position_of(&self, parameter: &str) -> Option<usize> {
        self.parameters.iter().position(|p| *p == parameter)
    }
}

/// Maps annotation identities to their declarations.
///
/// Built once, then shared read-only (the engine holds it behind an `Arc`).
/// Unregistered annotation types have no kinds: they are neither attributes
/// nor inclusion/exclusion markers.
#[derive(Debug, Clone)]
pub struct AnnotationRegistry {
    declarations: HashMap<AnnotationType, AnnotationDeclaration>,
}

impl Default for AnnotationRegistry {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AnnotationRegistry {
    /// A builder pre-populated with the built-in annotations.
    pub fn builder() -> AnnotationRegistryBuilder {
        AnnotationRegistryBuilder {
            declarations: builtin::declarations().into_iter().collect(),
        }
    }

    pub fn declaration(&self, ty: AnnotationType) -> Option<&AnnotationDeclaration> {
        self.declarations.get(&ty)
    }

    pub fn is(&self, ty: AnnotationType, kind: AnnotationKind) -> bool {
        self.declarations.get(&ty).is_some_and(|d| d.is(kind))
    }

    pub fn is_attribute(&self, ty: AnnotationType) -> bool {
        self.is(ty, AnnotationKind::Attribute)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

pub struct AnnotationRegistryBuilder {
    declarations: HashMap<AnnotationType, AnnotationDeclaration>,
}

impl AnnotationRegistryBuilder {
    /// Registers an annotation type, replacing any previous declaration.
    pub fn declare(mut self, path: &'static str, declaration: AnnotationDeclaration) -> Self {
        self.declarations
            .insert(AnnotationType::new(path), declaration);
        self
    }

    /// Shorthand for a presence-only attribute annotation.
    pub fn attribute(self, path: &'static str) -> Self {
        self.declare(path, AnnotationDeclaration::attribute())
    }

    pub fn build(self) -> AnnotationRegistry {
        log::trace!(
            "Built annotation registry with {} declarations",
            self.declarations.len()
        );
        AnnotationRegistry {
            declarations: self.declarations,
        }
    }
}
