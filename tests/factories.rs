mod common;

use common::{Car, Sealed, factory};
use specular::{
    ErrorKind, Model, ModelError, arg, args,
    annotations::{Annotation, builtin},
    descriptor::{Describe, FactoryDescriptor, FactoryKind, ParameterDescriptor, TypeDescriptor},
};

fn car_model() -> Model<Car, String> {
    factory().create().unwrap()
}

#[test]
fn test_variants_in_priority_order() {
    let model = car_model();

    let names: Vec<_> = model.factory_variants().iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["Car", "parked", "imported"]);

    let primary = model.primary_factory().unwrap();
    assert_eq!(primary.kind(), FactoryKind::PrimaryConstructor);
    assert!(primary.is_primary());
    assert!(!model.factory_variants()[1].is_primary());
}

#[test]
fn test_parameters_link_to_properties() {
    let model = car_model();

    let primary = model.primary_factory().unwrap();
    let mileage = primary.parameter("mileage").unwrap();
    assert!(mileage.is_optional());
    assert_eq!(mileage.linked_property().unwrap().name(), "mileage");

    // has_color is excluded, so nothing links to it
    assert!(primary.parameter("has_color").unwrap().linked_property().is_none());

    let imported = &model.factory_variants()[2];
    let code = imported.parameter("code").unwrap();
    assert_eq!(code.linked_property().unwrap().name(), "id");
}

#[test]
fn test_positional_creation() {
    let model = car_model();

    let car = model.create_with(args![7u64]).unwrap();
    assert_eq!(car, Car::new(7));

    let car = model
        .create_with(args![7u64, 120u32, "Bolt".to_string()])
        .unwrap();
    assert_eq!(car.mileage, 120);
    assert_eq!(car.nickname.as_deref(), Some("Bolt"));

    let car = model.create_with(args![7u64, 120u32, null]).unwrap();
    assert_eq!(car.nickname, None);
}

#[test]
fn test_positional_creation_without_a_match() {
    let model = car_model();

    let error = model.create_with(args!["seven"]).unwrap_err();
    assert!(matches!(error, ModelError::FactoryNotFound(_)));
    assert_eq!(error.kind(), ErrorKind::InvalidFactoryConfiguration);

    // null only fits nullable parameters
    assert!(model.create_with(args![null]).is_err());
}

#[test]
fn test_named_creation() {
    let model = car_model();

    let car = model
        .create_named([("id", arg(3u64)), ("color", arg("red".to_string()))])
        .unwrap();
    assert_eq!(car.id, 3);
    assert_eq!(car.color, "red");

    let car = model.create_named([("code", arg(11u64))]).unwrap();
    assert_eq!(car.id, 11);
}

#[test]
fn test_named_creation_on_a_variant() {
    let model = car_model();
    let primary = model.primary_factory().unwrap();

    let error = primary
        .create_named([("wheels", arg(4u8))])
        .unwrap_err();
    assert!(matches!(error, ModelError::UnknownParameter { .. }));

    let error = primary.create_named([("mileage", arg(4u32))]).unwrap_err();
    assert!(matches!(error, ModelError::MissingArgument { .. }));
}

#[test]
fn test_parameterless_creation() {
    let model = car_model();
    assert_eq!(model.create().unwrap(), Car::new(0));
}

#[test]
fn test_creation_needs_factories() {
    let model: Model<Sealed, String> = factory().create().unwrap();

    assert!(!model.can_create());
    let error = model.create().unwrap_err();
    assert!(matches!(error, ModelError::CreationNotSupported));
    assert_eq!(error.kind(), ErrorKind::ContractViolation);
}

#[derive(Debug, PartialEq)]
struct Gadget {
    size: u8,
}

fn primary_function() -> FactoryDescriptor<Gadget> {
    FactoryDescriptor::function("assembled", |_| Ok(Gadget { size: 1 }))
        .annotated(Annotation::new(builtin::FACTORY).with("primary", true))
}

struct TwoPrimaries;

impl Describe for TwoPrimaries {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::new("TwoPrimaries")
            .factory(FactoryDescriptor::primary_constructor("TwoPrimaries", |_| Ok(TwoPrimaries)))
            .factory(
                FactoryDescriptor::function("other", |_| Ok(TwoPrimaries))
                    .annotated(Annotation::new(builtin::FACTORY).with("primary", true)),
            )
    }
}

#[test]
fn test_two_primaries_are_rejected() {
    let error = factory()
        .create::<TwoPrimaries, String, String, String>()
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidFactoryConfiguration);
    match error {
        ModelError::Extraction { location, source } => {
            assert_eq!(location, "TwoPrimaries::other");
            assert!(matches!(*source, ModelError::MultiplePrimaryFactories { index: 1 }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_primary_function_is_placed_first() {
    let descriptor = TypeDescriptor::new("Gadget")
        .factory(FactoryDescriptor::constructor("new", |_| Ok(Gadget { size: 0 })))
        .factory(primary_function());

    let model: Model<Gadget, String> = factory().create_from(&descriptor).unwrap();

    let names: Vec<_> = model.factory_variants().iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["assembled", "new"]);
    // Both are parameterless; the primary one wins
    assert_eq!(model.create().unwrap(), Gadget { size: 1 });
}

#[test]
fn test_unnamed_parameters_are_rejected() {
    let descriptor = TypeDescriptor::new("Gadget").factory(
        FactoryDescriptor::constructor("from_pair", |mut args| {
            let (size, _): (u8, u8) = args.take(0)?;
            Ok(Gadget { size })
        })
        .parameter(ParameterDescriptor::unnamed(specular::ValueType::of::<(u8, u8)>())),
    );

    let error = factory()
        .create_from::<Gadget, String, String, String>(&descriptor)
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidFactoryConfiguration);
    match error {
        ModelError::Extraction { source, .. } => {
            assert!(matches!(*source, ModelError::UnnamedParameter { index: 0, .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_excluded_factories_are_skipped() {
    let descriptor = TypeDescriptor::new("Gadget")
        .factory(
            FactoryDescriptor::constructor("hidden", |_| Ok(Gadget { size: 9 }))
                .annotated(Annotation::new(builtin::EXCLUDED_FACTORY)),
        )
        .factory(FactoryDescriptor::constructor("plain", |_| Ok(Gadget { size: 2 })));

    let model: Model<Gadget, String> = factory().create_from(&descriptor).unwrap();

    assert_eq!(model.factory_variants().len(), 1);
    assert_eq!(model.create().unwrap(), Gadget { size: 2 });
}

#[test]
fn test_functions_can_be_switched_off() {
    use specular::config::FactoryConfig;
    use std::sync::Arc;

    let config = FactoryConfig::builder().include_functions(false).build();
    let factory = specular::ModelFactory::with_config(Arc::new(common::registry()), config);

    let model: Model<Car, String> = factory.create().unwrap();
    let names: Vec<_> = model.factory_variants().iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["Car", "parked"]);
}
