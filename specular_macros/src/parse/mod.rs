//! Parsing infrastructure for the specular macros
//!
//! This module turns derive inputs and impl blocks into metadata using syn's
//! visitor pattern. It keeps AST parsing separate from code generation.
//!
//! # Architecture
//!
//! The parsing phase consists of several layers:
//!
//! 1. **Metadata Structures** (`metadata.rs`) - Data structures that hold
//!    all parsed information
//! 2. **Attribute Parsing** (`attributes.rs`) - Helper attributes on structs,
//!    fields, factory functions and parameters
//! 3. **Model Visitor** (`model.rs`) - Visits `#[derive(Model)]` structs
//! 4. **Factories Visitor** (`factories.rs`) - Visits `#[factories]` impl blocks
//!    and strips the helper attributes it consumed
//! 5. **Enums** (`enums.rs`) - Key and label enums
//!
//! # Example Flow
//!
//! ```text
//! User's Code
//!     ↓
//! ModelVisitor / FactoriesVisitor
//!     ↓
//! FieldAttributes / FactoryAttributes (helper attributes)
//!     ↓
//! ModelMetadata / FactoriesMetadata
//!     ↓
//! Code Generation (generate/)
//! ```

pub mod attributes;
pub mod enums;
pub mod factories;
pub mod metadata;
pub mod model;

pub use enums::parse_enum;
pub use factories::FactoriesVisitor;
pub use metadata::*;
pub use model::ModelVisitor;
