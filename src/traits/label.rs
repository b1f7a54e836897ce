use std::{fmt::Debug, hash::Hash};

use crate::utils::Uncased;

/// One constant of an enum used as a label type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelConstant<L> {
    pub name: &'static str,
    pub ordinal: usize,
    /// The annotation this constant stands for (`#[label(Unit)]`).
    pub attribute: Option<&'static str>,
    pub value: L,
}

/// How attribute labels of type `L` are derived from annotations.
pub enum LabelKind<L> {
    /// The annotation's simple name.
    Name(fn(&'static str) -> L),
    /// The first constant referencing the annotation.
    Constant(Vec<LabelConstant<L>>),
    /// Enums whose variants carry data. Not supported as labels.
    Variant,
}

/// Trait for types that can label attributes.
///
/// Enums get it through `#[derive(AttributeLabel)]`.
pub trait AttributeLabel: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    fn label_kind() -> LabelKind<Self>;

    /// How the label is spelled in model descriptions.
    fn label_name(&self) -> String {
        format!("{self:?}")
    }
}

impl AttributeLabel for String {
    fn label_kind() -> LabelKind<Self> {
        LabelKind::Name(|name| name.to_string())
    }

    fn label_name(&self) -> String {
        self.clone()
    }
}

impl AttributeLabel for &'static str {
    fn label_kind() -> LabelKind<Self> {
        LabelKind::Name(|name| name)
    }

    fn label_name(&self) -> String {
        self.to_string()
    }
}

impl AttributeLabel for Uncased {
    fn label_kind() -> LabelKind<Self> {
        LabelKind::Name(|name| Uncased::new(name))
    }

    fn label_name(&self) -> String {
        self.to_string()
    }
}
