//! The extraction engine: turns a [`TypeDescriptor`] into a [`Model`].
//!
//! [`ModelFactory`] is an explicit context object. Construct one (it's cheap:
//! an `Arc`'d registry and a few empty memo tables), share it, and call
//! [`ModelFactory::create`] for each target type. It holds no global state;
//! two factories with different registries classify annotations
//! independently.
//!
//! Per target the engine:
//! 1. picks the inclusion policy (`model(inclusion = ..)` or the configured
//!    default),
//! 2. resolves model attributes from type-level annotations,
//! 3. walks the members, skipping ineligible or excluded ones, resolving each
//!    included member's key, attributes and initialization state,
//! 4. discovers factories and links their parameters to the properties.
//!
//! Any failure aborts that target's model only, wrapped with the target and
//! member it happened at.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

use parking_lot::Mutex;

use crate::{
    annotations::{self, AnnotationRegistry, AnnotationType, builtin},
    config::{FactoryConfig, Inclusion},
    descriptor::{Describe, MemberDescriptor, TypeDescriptor},
    errors::{ModelError, ModelResult},
    factory::FactoryVariant,
    model::{Model, ModelBuilder},
    property::PropertyBuilder,
    traits::{AttributeLabel, ModelKey},
    utils::naming::is_flag_for,
};

pub mod batch;
pub mod diagnostics;
pub(crate) mod factories;
pub(crate) mod inclusion;
pub(crate) mod keys;
pub(crate) mod transformer;

pub use batch::{BatchSummary, ModelBatch};
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, LogSink, Severity};

use keys::KeyResolver;
use transformer::ValueSelector;

/// Lookups memoized across every model a factory builds.
#[derive(Default)]
pub(crate) struct Memo {
    pub(crate) values: HashMap<AnnotationType, ValueSelector>,
    /// Resolved labels per (label type, annotation type).
    pub(crate) labels: HashMap<(TypeId, AnnotationType), Arc<dyn Any + Send + Sync>>,
}

pub struct ModelFactory {
    registry: Arc<AnnotationRegistry>,
    config: FactoryConfig,
    memo: Mutex<Memo>,
}

impl Default for ModelFactory {
    fn default() -> Self {
        Self::new(AnnotationRegistry::default())
    }
}

impl ModelFactory {
    pub fn new(registry: AnnotationRegistry) -> Self {
        Self::with_config(Arc::new(registry), FactoryConfig::default())
    }

    pub fn with_config(registry: Arc<AnnotationRegistry>, config: FactoryConfig) -> Self {
        Self {
            registry,
            config,
            memo: Mutex::new(Memo::default()),
        }
    }

    pub fn registry(&self) -> &AnnotationRegistry {
        &self.registry
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Builds the model of a type that describes itself.
    pub fn create<T, K, L, Lp>(&self) -> ModelResult<Model<T, K, L, Lp>>
    where
        T: Describe,
        K: ModelKey,
        L: AttributeLabel,
        Lp: AttributeLabel,
    {
        self.create_from(&T::describe())
    }

    /// Builds the model of a described type.
    pub fn create_from<T, K, L, Lp>(
        &self,
        descriptor: &TypeDescriptor<T>,
    ) -> ModelResult<Model<T, K, L, Lp>>
    where
        T: 'static,
        K: ModelKey,
        L: AttributeLabel,
        Lp: AttributeLabel,
    {
        let target = descriptor.name;
        log::debug!("Extracting model of {target}");

        let inclusion = self.inclusion_of(descriptor).map_err(|e| e.at(target, None))?;
        let keys = KeyResolver::<K>::new().map_err(|e| e.at(target, None))?;

        let mut builder = ModelBuilder::<T, K, L, Lp>::with_capacity(
            target,
            self.config.property_capacity,
            self.config.attribute_capacity,
        );

        for annotation in &descriptor.annotations {
            if let Some((label, value)) = self
                .attribute::<L>(annotation)
                .map_err(|e| e.at(target, None))?
            {
                builder.attributes().set(label, value);
            }
        }

        for member in &descriptor.members {
            if !self.includes(member, inclusion) {
                log::trace!("Skipping {target}::{} ({inclusion})", member.name);
                continue;
            }

            let at = |e: ModelError| e.at(target, Some(member.name));
            let key = keys.resolve(member).map_err(at)?;
            let property = self.property::<T, Lp>(descriptor, member).map_err(at)?;

            builder.property(key, property).map_err(at)?;
        }

        for (factory, is_primary) in factories::discover(descriptor, &self.registry, &self.config) {
            let at = |e: ModelError| e.at(target, Some(factory.name));
            let variant = FactoryVariant::from_descriptor(factory, is_primary, |name| {
                builder.find_property(name)
            })
            .map_err(at)?;

            log::trace!(
                "Discovered factory {target}::{} ({}, primary: {is_primary})",
                factory.name,
                factory.kind
            );
            builder.factory(variant).map_err(at)?;
        }

        let model = builder.build();
        log::debug!(
            "Extracted model of {target}: {} properties, {} attributes, {} factories",
            model.len(),
            model.attributes().len(),
            model.factory_variants().len()
        );

        Ok(model)
    }

    fn inclusion_of<T>(&self, descriptor: &TypeDescriptor<T>) -> ModelResult<Inclusion> {
        let spelled = annotations::find(&descriptor.annotations, builtin::MODEL)
            .and_then(|a| a.argument("inclusion", 0));

        match spelled {
            None => Ok(self.config.default_inclusion),
            Some(value) => value
                .as_str()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| {
                    ModelError::Contract(format!("'{value}' is not an inclusion policy"))
                }),
        }
    }

    fn property<T, Lp>(
        &self,
        descriptor: &TypeDescriptor<T>,
        member: &MemberDescriptor<T>,
    ) -> ModelResult<crate::property::Property<T, Lp>>
    where
        T: 'static,
        Lp: AttributeLabel,
    {
        let mut property = PropertyBuilder::<T, Lp>::from_member(member);

        for annotation in &member.annotations {
            if let Some((label, value)) = self.attribute::<Lp>(annotation)? {
                property.attributes().set(label, value);
            }
        }

        if !property.is_initialization_resolved() {
            let name = keys::resolved_name(member);
            let flag = descriptor
                .members
                .iter()
                .find(|m| is_flag_for(m.name, &name) && m.value_type.is::<bool>())
                .ok_or_else(|| ModelError::MissingInitializationFlag(member.name.to_string()))?;

            log::trace!("Wiring {} as the initialization flag of {}", flag.name, member.name);
            property = property.flagged_by(flag.accessor);
        }

        property.build()
    }
}
