use std::collections::HashMap;

use quickcheck::quickcheck;
use specular::{AttributeContainerBuilder, AttributeValue, ErrorKind, ModelError, Uncased};

#[test]
fn test_last_write_wins() {
    fn prop(writes: Vec<(u8, i64)>) -> bool {
        let mut builder = AttributeContainerBuilder::<u8>::new();
        let mut expected = HashMap::new();

        for (label, value) in &writes {
            builder.set(*label, *value);
            expected.insert(*label, *value);
        }

        let container = builder.build();
        container.len() == expected.len()
            && expected
                .iter()
                .all(|(label, value)| container.get_attribute(label).ok() == Some(&AttributeValue::Int(*value)))
    }

    quickcheck(prop as fn(Vec<(u8, i64)>) -> bool);
}

#[test]
fn test_insertion_order_is_kept() {
    fn prop(labels: Vec<u8>) -> bool {
        let mut builder = AttributeContainerBuilder::<u8>::new();
        let mut first_seen = Vec::new();

        for label in labels {
            if !first_seen.contains(&label) {
                first_seen.push(label);
            }
            builder.set(label, true);
        }

        builder.build().labels().copied().eq(first_seen)
    }

    quickcheck(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn test_named_containers_sort_labels() {
    let mut builder = AttributeContainerBuilder::named();
    builder
        .set(Uncased::new("range"), 3)
        .set(Uncased::new("Unit"), "km")
        .set(Uncased::new("description"), "fast");

    let container = builder.build();
    let labels: Vec<_> = container.labels().map(|l| l.to_string()).collect();
    assert_eq!(labels, vec!["description", "range", "Unit"]);
    assert!(container.has_attribute(&Uncased::new("UNIT")));
}

#[test]
fn test_typed_reads() {
    let mut builder = AttributeContainerBuilder::<&'static str>::new();
    builder.set("unit", "km").set("precision", 2).set("aliases", vec!["a", "b"]);
    let container = builder.build();

    assert_eq!(container.get_as::<String>(&"unit").unwrap(), "km");
    assert_eq!(container.get_as::<i64>(&"precision").unwrap(), 2);
    assert_eq!(container.get_attribute(&"aliases").unwrap().as_list().map(|l| l.len()), Some(2));

    let error = container.get_as::<bool>(&"unit").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::TypeMismatch);

    let error = container.get_attribute(&"missing").unwrap_err();
    assert!(matches!(error, ModelError::AttributeNotFound(_)));
}
