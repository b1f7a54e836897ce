//! Utility modules for specular
//!
//! Small collection and naming helpers shared by the model, attribute and
//! cache implementations.

pub mod naming;
pub mod ordered;

pub use naming::{Uncased, simple_name};
pub use ordered::OrderedMap;
