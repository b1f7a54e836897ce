mod common;

use common::{Car, factory};
use specular::{
    ErrorKind, Model, ModelError,
    annotations::{Annotation, builtin},
    descriptor::{Describe, MemberDescriptor, TypeDescriptor, ValueType},
    field_accessor,
    traits::{
        AttributeLabel, KeyKind, LabelConstant, LabelKind, ModelKey, enum_constants,
    },
};
use strum::{EnumIter, IntoStaticStr};

#[derive(Debug, Clone)]
struct Row {
    id: u32,
    mileage: u32,
    nickname: String,
}

impl Describe for Row {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::new("Row")
            .member(
                MemberDescriptor::new("id", ValueType::of::<u32>(), field_accessor!(Row, id))
                    .annotated(Annotation::new(builtin::PROPERTY).with("index", 0)),
            )
            .member(
                MemberDescriptor::new("mileage", ValueType::of::<u32>(), field_accessor!(Row, mileage))
                    .annotated(Annotation::new(builtin::PROPERTY).with("index", 1)),
            )
            .member(
                MemberDescriptor::new("nickname", ValueType::of::<String>(), field_accessor!(Row, nickname))
                    .annotated(
                        Annotation::new(builtin::PROPERTY)
                            .with("name", "alias")
                            .with("index", 2)
                            .with("tags", vec!["nick"]),
                    ),
            )
    }
}

fn row() -> Row {
    Row {
        id: 1,
        mileage: 20,
        nickname: "Bolt".into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
enum Column {
    Id,
    Mileage,
    Nick,
}

impl ModelKey for Column {
    fn key_kind() -> KeyKind<Self> {
        KeyKind::Constant(enum_constants())
    }
}

#[test]
fn test_name_keys_honor_overrides() {
    let model: Model<Row, String> = factory().create().unwrap();

    let keys: Vec<_> = model.keys().cloned().collect();
    assert_eq!(keys, vec!["id", "mileage", "alias"]);
    assert_eq!(model.property(&"alias".to_string()).unwrap().name(), "nickname");
}

#[test]
fn test_index_keys() {
    let model: Model<Row, u8> = factory().create().unwrap();

    assert_eq!(model.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(model.get::<u32>(&row(), &1).unwrap(), 20);
}

#[test]
fn test_index_keys_require_an_index() {
    let error = factory().create::<Car, u32, String, String>().unwrap_err();

    assert_eq!(error.kind(), ErrorKind::NotFound);
    match error {
        ModelError::Extraction { location, source } => {
            assert_eq!(location, "Car::id");
            assert!(matches!(*source, ModelError::KeyNotFound { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_enum_keys_match_tags_then_names() {
    let model: Model<Row, Column> = factory().create().unwrap();

    assert_eq!(
        model.keys().cloned().collect::<Vec<_>>(),
        vec![Column::Id, Column::Mileage, Column::Nick]
    );
    assert_eq!(model.get::<String>(&row(), &Column::Nick).unwrap(), "Bolt");
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Slot {
    First,
    Named(String),
}

impl ModelKey for Slot {
    fn key_kind() -> KeyKind<Self> {
        KeyKind::Variant
    }
}

#[test]
fn test_data_carrying_keys_are_unsupported() {
    let error = factory().create::<Row, Slot, String, String>().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnsupportedKeyOrLabelKind);

    // Only the kind matters; the variants exist to carry data
    let _ = [Slot::First, Slot::Named(String::new())];
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Meta {
    Entity,
    Unit,
    Description,
}

impl AttributeLabel for Meta {
    fn label_kind() -> LabelKind<Self> {
        let constant = |name, ordinal, attribute, value| LabelConstant {
            name,
            ordinal,
            attribute: Some(attribute),
            value,
        };

        LabelKind::Constant(vec![
            constant("Entity", 0, "Entity", Meta::Entity),
            constant("Unit", 1, "Unit", Meta::Unit),
            constant("Description", 2, "Description", Meta::Description),
        ])
    }
}

#[test]
fn test_enum_labels_follow_back_references() {
    let model: Model<Car, String, Meta, Meta> = factory().create().unwrap();

    assert!(model.attributes().has_attribute(&Meta::Entity));
    let mileage = model.property(&"mileage".to_string()).unwrap();
    assert_eq!(
        mileage.attributes().get_attribute(&Meta::Unit).unwrap().as_str(),
        Some("km")
    );
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Partial {
    Entity,
}

impl AttributeLabel for Partial {
    fn label_kind() -> LabelKind<Self> {
        LabelKind::Constant(vec![LabelConstant {
            name: "Entity",
            ordinal: 0,
            attribute: Some("Entity"),
            value: Partial::Entity,
        }])
    }
}

#[test]
fn test_missing_label_constant() {
    let error = factory()
        .create::<Car, String, Partial, Partial>()
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::NotFound);
    match error {
        ModelError::Extraction { location, source } => {
            assert_eq!(location, "Car::id");
            assert!(matches!(*source, ModelError::LabelNotFound { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[derive(Debug)]
struct Twins {
    left: u8,
    right: u8,
}

impl Describe for Twins {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::new("Twins")
            .member(MemberDescriptor::new("left", ValueType::of::<u8>(), field_accessor!(Twins, left)))
            .member(
                MemberDescriptor::new("right", ValueType::of::<u8>(), field_accessor!(Twins, right))
                    .annotated(Annotation::new(builtin::PROPERTY).with("name", "left")),
            )
    }
}

#[test]
fn test_duplicate_keys_are_rejected() {
    let error = factory().create::<Twins, String, String, String>().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ContractViolation);
}

#[derive(Debug, Clone)]
struct Player {
    score: u32,
}

impl Describe for Player {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::new("Player").member(
            MemberDescriptor::new("score", ValueType::of::<u32>(), field_accessor!(Player, score))
                .annotated(Annotation::new(builtin::PROPERTY).with("name", "pts")),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
enum Stat {
    Pts,
    Score,
}

impl ModelKey for Stat {
    fn key_kind() -> KeyKind<Self> {
        KeyKind::Constant(enum_constants())
    }
}

#[test]
fn test_enum_keys_match_the_name_override() {
    let model: Model<Player, Stat> = factory().create().unwrap();

    assert_eq!(model.keys().cloned().collect::<Vec<_>>(), vec![Stat::Pts]);
    assert_eq!(model.get::<u32>(&Player { score: 12 }, &Stat::Pts).unwrap(), 12);
}
