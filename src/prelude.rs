//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits,
//! allowing users to get started quickly with a single import.
//!
//! # Usage
//!
//! ```rust,ignore
//! use specular::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Models
//!
//! - [`Model`]: Keyed properties, attributes and factory variants of a type
//! - [`Property`] / [`TypedProperty`]: Accessors bound to one member
//! - [`FactoryVariant`]: One way of constructing the target
//! - [`AttributeContainer`]: Labelled attribute values
//!
//! ## Extraction
//!
//! - [`ModelFactory`]: Builds models from type descriptors
//! - [`AnnotationRegistry`]: Classifies annotations as attributes, inclusion
//!   or exclusion markers
//! - [`Describe`]: Implemented by `#[derive(Model)]`
//!
//! ## Keys and Labels
//!
//! - [`ModelKey`]: Property key types (`String`, integers, enums)
//! - [`AttributeLabel`]: Attribute label types (`String`, enums)
//! - [`Uncased`]: Case-insensitive names
//!
//! ## Caching
//!
//! - [`ModelCache`]: Lazy, usage-aware model store
//! - [`ModelId`]: Cache key of a model configuration
//!
//! ## Error Handling
//!
//! - [`ModelError`]: Every failure the crate reports
//! - [`ErrorKind`]: Coarse classification of a failure
//! - [`ModelResult`]: Result alias (`Result<T, ModelError>`)
//!
//! # Common Patterns
//!
//! ## Reading and Writing Properties
//!
//! ```rust,ignore
//! use specular::prelude::*;
//!
//! let model: Model<Car, String> = factory.create()?;
//! let mileage = model.property_as::<u32>(&"mileage".to_string())?;
//!
//! mileage.set(&mut car, 1500)?;
//! assert_eq!(mileage.get(&car)?, 1500);
//! ```
//!
//! ## Caching Models
//!
//! ```rust,ignore
//! use specular::prelude::*;
//! use std::sync::Arc;
//!
//! let factory = Arc::new(ModelFactory::default());
//! let cache = ModelCache::<ModelId>::new(CacheConfig::usage_aware(2));
//!
//! let model = cache.get_or_build::<Car, String, String, String>(&factory)?;
//! ```

// Through the crate root so the derive macros of the same names come along.
pub use crate::{AttributeLabel, Model, ModelKey};

pub use crate::{
    annotations::{Annotation, AnnotationDeclaration, AnnotationKind, AnnotationRegistry},
    args,
    attributes::{AttributeContainer, AttributeContainerBuilder, AttributeValue},
    cache::{ModelCache, ModelId},
    config::{CacheConfig, FactoryConfig, Inclusion},
    description::{ModelDescription, ModelSink},
    descriptor::{Describe, FactoryArg, TypeDescriptor, ValueType, arg},
    engine::{Diagnostics, ModelBatch, ModelFactory},
    errors::{ErrorKind, ModelError, ModelResult},
    factory::FactoryVariant,
    property::{Property, TypedProperty},
    traversal::ModelVisitor,
    utils::Uncased,
};

#[cfg(feature = "derive")]
pub use crate::factories;
