//! Attribute values and containers.
//!
//! An attribute is a labelled value attached to a model or to one of its
//! properties. Labels are whatever type the model was configured with
//! (`String`, [`Uncased`](crate::utils::Uncased), or an enum deriving
//! `AttributeLabel`); values are always [`AttributeValue`]s.

use std::fmt;

use derive_more::{From, TryInto};
use serde::{Deserialize, Serialize};

pub mod builder;
pub mod container;

pub use builder::AttributeContainerBuilder;
pub use container::AttributeContainer;

/// The value carried by an attribute or an annotation argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, From, TryInto)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Int(_) => "i64",
            AttributeValue::Float(_) => "f64",
            AttributeValue::Text(_) => "String",
            AttributeValue::List(_) => "Vec<AttributeValue>",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(l) => Some(l),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Int(value.into())
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(value: Vec<&str>) -> Self {
        AttributeValue::List(value.into_iter().map(AttributeValue::from).collect())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Int(i) => write!(f, "{i}"),
            AttributeValue::Float(x) => write!(f, "{x}"),
            AttributeValue::Text(s) => write!(f, "{s:?}"),
            AttributeValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}
