use crate::{
    annotations::{self, AnnotationKind, AnnotationRegistry, builtin},
    config::FactoryConfig,
    descriptor::{FactoryDescriptor, FactoryKind, TypeDescriptor, Visibility},
};

/// Discovers the factories of a type, in priority order, with their primary
/// flag.
///
/// The primary constructor comes first, then the other public constructors
/// in declaration order, then public functions marked `factory`. Anything
/// carrying an exclusion annotation is left out.
pub(crate) fn discover<'d, T>(
    descriptor: &'d TypeDescriptor<T>,
    registry: &AnnotationRegistry,
    config: &FactoryConfig,
) -> Vec<(&'d FactoryDescriptor<T>, bool)> {
    let excluded = |factory: &FactoryDescriptor<T>| {
        factory
            .annotations
            .iter()
            .any(|a| a.is(builtin::EXCLUDED_FACTORY) || registry.is(a.ty(), AnnotationKind::Exclusion))
    };

    let marked_primary = |factory: &FactoryDescriptor<T>| {
        annotations::find(&factory.annotations, builtin::FACTORY)
            .and_then(|a| a.argument("primary", 0))
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    };

    let eligible = |kind: FactoryKind| {
        descriptor
            .factories
            .iter()
            .filter(move |f| f.kind == kind && !excluded(*f))
    };

    let primary = eligible(FactoryKind::PrimaryConstructor).map(|f| (f, true));

    let constructors = eligible(FactoryKind::Constructor)
        .filter(|f| f.visibility == Visibility::Public)
        .map(|f| (f, marked_primary(f)));

    let functions = eligible(FactoryKind::Function)
        .filter(|f| {
            config.include_functions
                && f.visibility == Visibility::Public
                && annotations::find(&f.annotations, builtin::FACTORY).is_some()
        })
        .map(|f| (f, marked_primary(f)));

    primary.chain(constructors).chain(functions).collect()
}
