use crate::model::ConversionError;
use thiserror::Error as ThisError;

///
/// RegistryError
///
/// Request-time registry miss: a discriminator with no registered type
/// entity. Distinct from an unrelated-branch outcome, which is not an error.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("no type entity registered for '{discriminator}' under root '{root}'")]
    TypeNotFound { root: String, discriminator: String },
}

///
/// ContextError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ContextError {
    #[error("object of class '{found}' cannot be wrapped by the descriptor of class '{expected}'")]
    ClassMismatch { expected: String, found: String },

    #[error("class '{class}' is not a registered type entity of root '{root}'")]
    UnregisteredClass { root: String, class: String },

    #[error("class '{class}' has no table '{table}'")]
    UnknownTable { class: String, table: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}
