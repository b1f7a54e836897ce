//! Annotations understood by the extraction engine itself.
//!
//! `#[derive(Model)]` and `#[factories]` translate their helper attributes into
//! these; hand-written descriptors can attach them directly.

use super::{AnnotationDeclaration, AnnotationKind, AnnotationType};

/// Type-level settings. Arguments: `inclusion` (`"opt_in"` / `"opt_out"`).
pub const MODEL: AnnotationType = AnnotationType::new("model");

/// Explicit property metadata. Arguments: `name`, `index`, `tags`.
pub const PROPERTY: AnnotationType = AnnotationType::new("property");

/// Includes a member under the opt-in policy.
pub const INCLUDED: AnnotationType = AnnotationType::new("included");

/// Excludes a member under the opt-out policy.
pub const EXCLUDED: AnnotationType = AnnotationType::new("excluded");

/// Marks a function as a factory. Arguments: `primary`.
pub const FACTORY: AnnotationType = AnnotationType::new("factory");

/// Keeps a constructor or function out of the factory variants.
pub const EXCLUDED_FACTORY: AnnotationType = AnnotationType::new("excluded_factory");

/// Parameter metadata. Arguments: `property` (linked property name).
pub const PARAMETER: AnnotationType = AnnotationType::new("parameter");

pub(crate) fn declarations() -> Vec<(AnnotationType, AnnotationDeclaration)> {
    vec![
        (MODEL, AnnotationDeclaration::new().parameter("inclusion")),
        (
            PROPERTY,
            AnnotationDeclaration::new()
                .with_kind(AnnotationKind::Inclusion)
                .parameter("name")
                .parameter("index")
                .parameter("tags"),
        ),
        (INCLUDED, AnnotationDeclaration::inclusion()),
        (EXCLUDED, AnnotationDeclaration::exclusion()),
        (FACTORY, AnnotationDeclaration::new().parameter("primary")),
        (EXCLUDED_FACTORY, AnnotationDeclaration::exclusion()),
        (PARAMETER, AnnotationDeclaration::new().parameter("property")),
    ]
}
