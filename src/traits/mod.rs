pub mod key;
pub mod label;

// Re-export commonly used types
pub use key::{EnumConstant, KeyKind, ModelKey, enum_constants};
pub use label::{AttributeLabel, LabelConstant, LabelKind};
