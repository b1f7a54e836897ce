// Common test utilities and fixtures

#![allow(dead_code)]

use specular::{
    annotations::{Annotation, AnnotationDeclaration, AnnotationRegistry, builtin},
    descriptor::{
        Describe, FactoryDescriptor, MemberDescriptor, ParameterDescriptor, TypeDescriptor,
        ValueType, Visibility,
    },
    engine::ModelFactory,
    field_accessor,
};

/// Route `log` output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A registry knowing every annotation the fixtures use
pub fn registry() -> AnnotationRegistry {
    AnnotationRegistry::builder()
        .attribute("Entity")
        .declare("Unit", AnnotationDeclaration::attribute().value("symbol"))
        .declare("units::Unit", AnnotationDeclaration::attribute().value("symbol"))
        .declare("Description", AnnotationDeclaration::attribute().parameter("value"))
        .declare("Exposed", AnnotationDeclaration::inclusion())
        .declare("Hidden", AnnotationDeclaration::exclusion())
        .build()
}

pub fn factory() -> ModelFactory {
    init_logging();
    ModelFactory::new(registry())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: u64,
    pub mileage: u32,
    pub nickname: Option<String>,
    pub color: String,
    pub has_color: bool,
    serial: u8,
}

impl Car {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            mileage: 0,
            nickname: None,
            color: String::new(),
            has_color: false,
            serial: 0,
        }
    }

    pub fn serial(&self) -> u8 {
        self.serial
    }
}

fn nickname_is_set(car: &Car) -> bool {
    car.nickname.is_some()
}

impl Describe for Car {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::new("Car")
            .annotated(Annotation::marker("Entity"))
            .member(
                MemberDescriptor::new("id", ValueType::of::<u64>(), field_accessor!(Car, id, readonly))
                    .annotated(Annotation::new(builtin::INCLUDED))
                    .annotated(Annotation::marker("Description").with_positional("Identifier")),
            )
            .member(
                MemberDescriptor::new("mileage", ValueType::of::<u32>(), field_accessor!(Car, mileage))
                    .annotated(Annotation::marker("Unit").with("symbol", "km"))
                    .annotated(Annotation::marker("Exposed")),
            )
            .member(
                MemberDescriptor::new(
                    "nickname",
                    ValueType::optional::<String>(),
                    field_accessor!(Car, nickname),
                )
                .deferred(Some(nickname_is_set)),
            )
            .member(
                MemberDescriptor::new("color", ValueType::of::<String>(), field_accessor!(Car, color))
                    .deferred(None),
            )
            .member(
                MemberDescriptor::new("has_color", ValueType::of::<bool>(), field_accessor!(Car, has_color))
                    .annotated(Annotation::marker("Hidden")),
            )
            .member(
                MemberDescriptor::new("serial", ValueType::of::<u8>(), field_accessor!(Car, serial))
                    .with_visibility(Visibility::Private),
            )
            .factory(
                FactoryDescriptor::primary_constructor("Car", |mut args| {
                    Ok(Car {
                        id: args.take(0)?,
                        mileage: args.take_or_else(1, || 0)?,
                        nickname: args.take_or_else(2, || None)?,
                        color: args.take_or_else(3, String::new)?,
                        has_color: args.take_or_else(4, || false)?,
                        serial: 0,
                    })
                })
                .parameter(ParameterDescriptor::of::<u64>("id"))
                .parameter(ParameterDescriptor::of::<u32>("mileage").optional())
                .parameter(ParameterDescriptor::new("nickname", ValueType::optional::<String>()).optional())
                .parameter(ParameterDescriptor::of::<String>("color").optional())
                .parameter(ParameterDescriptor::of::<bool>("has_color").optional()),
            )
            .factory(FactoryDescriptor::constructor("parked", |_| Ok(Car::new(0))))
            .factory(
                FactoryDescriptor::function("imported", |mut args| Ok(Car::new(args.take(0)?)))
                    .annotated(Annotation::new(builtin::FACTORY))
                    .parameter(
                        ParameterDescriptor::of::<u64>("code")
                            .annotated(Annotation::new(builtin::PARAMETER).with("property", "id")),
                    ),
            )
    }
}

/// A type whose deferred member has neither a probe nor a has-flag
#[derive(Debug)]
pub struct Broken {
    pub value: u32,
}

impl Describe for Broken {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::new("Broken").member(
            MemberDescriptor::new("value", ValueType::of::<u32>(), field_accessor!(Broken, value))
                .deferred(None),
        )
    }
}

/// A type without any factory
#[derive(Debug)]
pub struct Sealed {
    pub level: u8,
}

impl Describe for Sealed {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::new("Sealed").member(MemberDescriptor::new(
            "level",
            ValueType::of::<u8>(),
            field_accessor!(Sealed, level),
        ))
    }
}
