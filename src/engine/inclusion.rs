use super::ModelFactory;
use crate::{
    annotations::{Annotation, AnnotationKind},
    config::Inclusion,
    descriptor::{MemberDescriptor, Visibility},
};

impl ModelFactory {
    /// Whether a member becomes a property.
    ///
    /// Only public members are eligible. Immutable members are eligible only
    /// when explicitly included, since the opt-out default expects setters.
    pub(crate) fn includes<T>(&self, member: &MemberDescriptor<T>, inclusion: Inclusion) -> bool {
        if member.visibility != Visibility::Public {
            return false;
        }

        let included = self.carries(&member.annotations, AnnotationKind::Inclusion);

        if !member.is_mutable() && !included {
            return false;
        }

        match inclusion {
            Inclusion::OptOut => !self.carries(&member.annotations, AnnotationKind::Exclusion),
            Inclusion::OptIn => included,
        }
    }

    /// Whether any annotation's type is tagged with `kind`.
    pub(crate) fn carries(&self, annotations: &[Annotation], kind: AnnotationKind) -> bool {
        annotations.iter().any(|a| self.registry.is(a.ty(), kind))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        annotations::{Annotation, AnnotationDeclaration, AnnotationRegistry, builtin},
        config::Inclusion,
        descriptor::{MemberDescriptor, ValueType, Visibility},
        engine::ModelFactory,
        field_accessor,
    };

    struct Row {
        id: u32,
        secret: String,
    }

    fn id() -> MemberDescriptor<Row> {
        MemberDescriptor::new("id", ValueType::of::<u32>(), field_accessor!(Row, id))
    }

    fn secret() -> MemberDescriptor<Row> {
        MemberDescriptor::new("secret", ValueType::of::<String>(), field_accessor!(Row, secret))
    }

    fn factory() -> ModelFactory {
        ModelFactory::new(
            AnnotationRegistry::builder()
                .declare("Hidden", AnnotationDeclaration::exclusion())
                .declare("Column", AnnotationDeclaration::inclusion())
                .build(),
        )
    }

    #[test]
    fn test_opt_out() {
        let factory = factory();

        assert!(factory.includes(&id(), Inclusion::OptOut));
        assert!(!factory.includes(&id().annotated(Annotation::new(builtin::EXCLUDED)), Inclusion::OptOut));
        assert!(!factory.includes(&secret().annotated(Annotation::marker("Hidden")), Inclusion::OptOut));
        assert!(!factory.includes(&id().with_visibility(Visibility::Restricted), Inclusion::OptOut));
    }

    #[test]
    fn test_opt_in() {
        let factory = factory();

        assert!(!factory.includes(&id(), Inclusion::OptIn));
        assert!(factory.includes(&id().annotated(Annotation::new(builtin::INCLUDED)), Inclusion::OptIn));
        assert!(factory.includes(&id().annotated(Annotation::marker("Column")), Inclusion::OptIn));
        assert!(factory.includes(&id().annotated(Annotation::new(builtin::PROPERTY)), Inclusion::OptIn));
    }

    #[test]
    fn test_immutable_members_need_explicit_inclusion() {
        let factory = factory();
        let readonly = MemberDescriptor::new("id", ValueType::of::<u32>(), field_accessor!(Row, id, readonly));

        assert!(!factory.includes(&readonly, Inclusion::OptOut));
        assert!(factory.includes(&readonly.annotated(Annotation::new(builtin::INCLUDED)), Inclusion::OptOut));
    }
}
