//! Annotation to attribute translation: labels and values.

use std::{any::TypeId, sync::Arc};

use super::ModelFactory;
use crate::{
    annotations::{Annotation, AnnotationRegistry, AnnotationType},
    attributes::AttributeValue,
    errors::{ModelError, ModelResult},
    traits::{AttributeLabel, LabelKind},
};

/// Where an annotation keeps its attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueSelector {
    /// Presence-only: the value is `true`.
    Presence,
    Parameter { name: &'static str, position: usize },
}

impl ValueSelector {
    /// The marked value parameter, else a parameter named `value`, else
    /// presence.
    fn of(registry: &AnnotationRegistry, ty: AnnotationType) -> Self {
        let Some(declaration) = registry.declaration(ty) else {
            return Self::Presence;
        };

        let name = declaration
            .value_parameter()
            .or_else(|| declaration.parameters().iter().copied().find(|p| *p == "value"));

        match name.and_then(|n| declaration.position_of(n).map(|position| (n, position))) {
            Some((name, position)) => Self::Parameter { name, position },
            None => Self::Presence,
        }
    }

    fn select(&self, annotation: &Annotation) -> ModelResult<AttributeValue> {
        match self {
            Self::Presence => Ok(AttributeValue::Bool(true)),
            Self::Parameter { name, position } => annotation
                .argument(name, *position)
                .cloned()
                .ok_or_else(|| {
                    ModelError::Contract(format!(
                        "the annotation {} has no argument for its value parameter '{name}'",
                        annotation.ty()
                    ))
                }),
        }
    }
}

impl ModelFactory {
    /// The label and value of an annotation, or `None` if it isn't tagged as
    /// an attribute.
    pub(crate) fn attribute<L: AttributeLabel>(
        &self,
        annotation: &Annotation,
    ) -> ModelResult<Option<(L, AttributeValue)>> {
        if !self.registry.is_attribute(annotation.ty()) {
            return Ok(None);
        }

        let label = self.label::<L>(annotation.ty())?;
        let value = self.value_selector(annotation.ty()).select(annotation)?;

        Ok(Some((label, value)))
    }

    fn value_selector(&self, ty: AnnotationType) -> ValueSelector {
        *self
            .memo
            .lock()
            .values
            .entry(ty)
            .or_insert_with(|| ValueSelector::of(&self.registry, ty))
    }

    fn label<L: AttributeLabel>(&self, ty: AnnotationType) -> ModelResult<L> {
        let key = (TypeId::of::<L>(), ty);

        if let Some(label) = self.memo.lock().labels.get(&key) {
            if let Some(label) = label.downcast_ref::<L>() {
                return Ok(label.clone());
            }
        }

        let label = resolve_label::<L>(ty)?;
        self.memo.lock().labels.insert(key, Arc::new(label.clone()));

        Ok(label)
    }
}

fn resolve_label<L: AttributeLabel>(ty: AnnotationType) -> ModelResult<L> {
    match L::label_kind() {
        LabelKind::Name(resolve) => Ok(resolve(ty.simple_name())),
        LabelKind::Constant(constants) => constants
            .into_iter()
            .find(|c| c.attribute == Some(ty.path()))
            .map(|c| c.value)
            .ok_or_else(|| ModelError::LabelNotFound {
                annotation: ty.to_string(),
                label_type: std::any::type_name::<L>(),
            }),
        LabelKind::Variant => Err(ModelError::UnsupportedKind {
            kind: "Variant",
            usage: "attribute labels",
        }),
    }
}
