//! Serializable snapshots of resolved models, for emission sinks.

use serde::{Deserialize, Serialize};

use crate::{
    attributes::{AttributeContainer, AttributeValue},
    model::Model,
    traits::{AttributeLabel, ModelKey},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescription {
    pub target: String,
    pub attributes: Vec<(String, AttributeValue)>,
    pub properties: Vec<PropertyDescription>,
    pub factories: Vec<FactoryDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescription {
    pub key: String,
    pub name: String,
    pub value_type: String,
    pub mutable: bool,
    pub attributes: Vec<(String, AttributeValue)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryDescription {
    pub name: String,
    pub kind: String,
    pub primary: bool,
    pub parameters: Vec<ParameterDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescription {
    pub name: String,
    pub value_type: String,
    pub optional: bool,
    pub linked_property: Option<String>,
}

/// Accepts resolved models, e.g. to emit code or documentation for them.
pub trait ModelSink {
    fn accept(&mut self, description: ModelDescription);
}

impl ModelSink for Vec<ModelDescription> {
    fn accept(&mut self, description: ModelDescription) {
        self.push(description);
    }
}

fn attributes<L: AttributeLabel>(container: &AttributeContainer<L>) -> Vec<(String, AttributeValue)> {
    container
        .iter()
        .map(|(label, value)| (label.label_name(), value.clone()))
        .collect()
}

impl<T, K, L, Lp> Model<T, K, L, Lp>
where
    K: ModelKey,
    L: AttributeLabel,
    Lp: AttributeLabel,
{
    pub fn description(&self) -> ModelDescription {
        ModelDescription {
            target: self.target().to_string(),
            attributes: attributes(self.attributes()),
            properties: self
                .entries()
                .map(|(key, property)| PropertyDescription {
                    key: key.key_name(),
                    name: property.name().to_string(),
                    value_type: property.value_type().name().to_string(),
                    mutable: property.is_mutable(),
                    attributes: attributes(property.attributes()),
                })
                .collect(),
            factories: self
                .factory_variants()
                .iter()
                .map(|variant| FactoryDescription {
                    name: variant.name().to_string(),
                    kind: variant.kind().to_string(),
                    primary: variant.is_primary(),
                    parameters: variant
                        .parameters()
                        .iter()
                        .map(|p| ParameterDescription {
                            name: p.name().to_string(),
                            value_type: p.value_type().name().to_string(),
                            optional: p.is_optional(),
                            linked_property: p.linked_property().map(|l| l.name().to_string()),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
