use strum::{AsRefStr, Display};
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Coarse classification of a [`ModelError`].
///
/// Callers that only care about the category of a failure (rather than its
/// message) should match on this instead of the error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ErrorKind {
    NotFound,
    UnsupportedKeyOrLabelKind,
    InvalidFactoryConfiguration,
    ContractViolation,
    TypeMismatch,
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("No attribute with the label {0} exists")]
    AttributeNotFound(String),

    #[error("The key {0} does not exist in the property map")]
    PropertyNotFound(String),

    #[error("No model with a key of {0} was found in the cache")]
    ModelNotFound(String),

    #[error("No key could be resolved for member '{member}': {reason}")]
    KeyNotFound { member: String, reason: String },

    #[error("No label of type {label_type} references the annotation '{annotation}'")]
    LabelNotFound {
        annotation: String,
        label_type: &'static str,
    },

    #[error("{kind} types are not supported as {usage} yet")]
    UnsupportedKind {
        kind: &'static str,
        usage: &'static str,
    },

    #[error("Only one factory variant may be primary, but a second was found at index {index}")]
    MultiplePrimaryFactories { index: usize },

    #[error("No factory was found that is able to take the specified arguments: {0}")]
    FactoryNotFound(String),

    #[error("Factory parameter at index {index} of '{factory}' has no name")]
    UnnamedParameter { factory: String, index: usize },

    #[error("Factory '{factory}' requires a value for parameter '{parameter}'")]
    MissingArgument { factory: String, parameter: String },

    #[error("Factory '{factory}' has no parameter named '{parameter}'")]
    UnknownParameter { factory: String, parameter: String },

    #[error("The property '{0}' is immutable")]
    ImmutableProperty(String),

    #[error("Target creation is not supported in this model")]
    CreationNotSupported,

    #[error(
        "Member '{0}' is deferred but has neither a has-flag companion nor a presence probe"
    )]
    MissingInitializationFlag(String),

    #[error("Contract violation: {0}")]
    Contract(String),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{location}: {source}")]
    Extraction {
        location: String,
        #[source]
        source: Box<ModelError>,
    },
}

impl ModelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::AttributeNotFound(_)
            | ModelError::PropertyNotFound(_)
            | ModelError::ModelNotFound(_)
            | ModelError::KeyNotFound { .. }
            | ModelError::LabelNotFound { .. } => ErrorKind::NotFound,
            ModelError::UnsupportedKind { .. } => ErrorKind::UnsupportedKeyOrLabelKind,
            ModelError::MultiplePrimaryFactories { .. }
            | ModelError::FactoryNotFound(_)
            | ModelError::UnnamedParameter { .. }
            | ModelError::MissingArgument { .. }
            | ModelError::UnknownParameter { .. } => ErrorKind::InvalidFactoryConfiguration,
            ModelError::ImmutableProperty(_)
            | ModelError::CreationNotSupported
            | ModelError::MissingInitializationFlag(_)
            | ModelError::Contract(_) => ErrorKind::ContractViolation,
            ModelError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ModelError::Extraction { source, .. } => source.kind(),
        }
    }

    /// Attaches a target/member location to an extraction error.
    pub(crate) fn at(self, target: &str, member: Option<&str>) -> Self {
        let location = match member {
            Some(member) => format!("{target}::{member}"),
            None => target.to_string(),
        };

        ModelError::Extraction {
            location,
            source: Box::new(self),
        }
    }

    pub(crate) fn mismatch<E: ?Sized, F: ?Sized>() -> Self {
        ModelError::TypeMismatch {
            expected: std::any::type_name::<E>(),
            found: std::any::type_name::<F>(),
        }
    }
}
