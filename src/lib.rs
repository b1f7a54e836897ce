//! # Specular
//!
//! Typed, key-addressable models of Rust structs. A model describes a target
//! type at runtime: its properties (get, set, has-value), the attributes
//! attached to the type and to each property, and the factory variants that
//! construct it. Calling code can read, write and create instances through a
//! model without hard-coding anything per type.
//!
//! ## Features
//!
//! - **Annotation-driven**: members and factories opt in or out through
//!   annotations classified by an explicit [`AnnotationRegistry`]
//! - **Flexible keys**: properties are addressed by name, by index or by enum
//!   constant, decided by the key type
//! - **Typed labels**: attributes are labelled by annotation name or by enum
//!   constants referencing annotations
//! - **Factory variants**: positional, named and parameterless creation
//! - **Model cache**: lazy construction, usage tracking and pruning
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use specular::prelude::*;
//!
//! #[derive(Model, Debug)]
//! #[annotate(Vehicle)]
//! pub struct Car {
//!     #[property(name = "plate")]
//!     pub registration: String,
//!     #[annotate(Unit("km"))]
//!     #[construct(default)]
//!     pub mileage: u32,
//! }
//!
//! let registry = AnnotationRegistry::builder()
//!     .attribute("Vehicle")
//!     .declare("Unit", AnnotationDeclaration::attribute().value("symbol"))
//!     .build();
//! let factory = ModelFactory::new(registry);
//!
//! let model: Model<Car, String> = factory.create()?;
//! let mut car = model.create_with(args!["AB-123".to_string()])?;
//! model.set(&mut car, &"mileage".to_string(), 1200u32)?;
//! ```

extern crate self as specular;

pub mod annotations;
pub mod attributes;
pub mod cache;
pub mod config;
pub mod description;
pub mod descriptor;
pub mod engine;
pub mod errors;
pub mod factory;
pub mod model;
pub mod prelude;
pub mod property;
pub mod traits;
pub mod traversal;
pub mod utils;

pub use annotations::{Annotation, AnnotationDeclaration, AnnotationKind, AnnotationRegistry, AnnotationType};
pub use attributes::{AttributeContainer, AttributeContainerBuilder, AttributeValue};
pub use cache::{ModelCache, ModelId};
pub use config::{CacheConfig, FactoryConfig, Inclusion};
pub use description::{ModelDescription, ModelSink};
pub use descriptor::{
    Arguments, Describe, FactoryArg, FactoryDescriptor, MemberDescriptor, ParameterDescriptor,
    TypeDescriptor, ValueType, Visibility, arg,
};
pub use engine::{ModelBatch, ModelFactory};
pub use errors::{ErrorKind, ModelError, ModelResult};
pub use factory::{FactoryParameter, FactoryVariant};
pub use model::{Model, ModelBuilder};
pub use property::{Property, PropertyBuilder, TypedProperty};
pub use traits::{AttributeLabel, ModelKey};
pub use traversal::ModelVisitor;
pub use utils::Uncased;

#[cfg(feature = "derive")]
pub use specular_macros::{AttributeLabel, Model, ModelKey, factories};
