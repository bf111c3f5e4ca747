use crate::{
    config::ConfigError,
    entity::{ContextError, RegistryError},
    model::{ConversionError, ModelError},
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable classification.
/// Every concern-specific error converts into this at the descriptor boundary;
/// the typed cause stays reachable through `detail`.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without structured detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a registry-origin internal error.
    pub(crate) fn registry_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Registry, message.into())
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.detail, Some(ErrorDetail::Registry(_)))
    }

    #[must_use]
    pub const fn is_conversion(&self) -> bool {
        matches!(self.class, ErrorClass::Conversion)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Model(ModelError),

    #[error("{0}")]
    Conversion(ConversionError),

    #[error("{0}")]
    Registry(RegistryError),

    #[error("{0}")]
    Context(ContextError),

    #[error("{0}")]
    Config(ConfigError),
}

impl From<ModelError> for InternalError {
    fn from(err: ModelError) -> Self {
        Self {
            class: ErrorClass::Configuration,
            origin: ErrorOrigin::Model,
            message: err.to_string(),
            detail: Some(ErrorDetail::Model(err)),
        }
    }
}

impl From<ConversionError> for InternalError {
    fn from(err: ConversionError) -> Self {
        Self {
            class: ErrorClass::Conversion,
            origin: ErrorOrigin::Decode,
            message: err.to_string(),
            detail: Some(ErrorDetail::Conversion(err)),
        }
    }
}

impl From<RegistryError> for InternalError {
    fn from(err: RegistryError) -> Self {
        Self {
            class: ErrorClass::NotFound,
            origin: ErrorOrigin::Registry,
            message: err.to_string(),
            detail: Some(ErrorDetail::Registry(err)),
        }
    }
}

impl From<ContextError> for InternalError {
    fn from(err: ContextError) -> Self {
        if let ContextError::Conversion(err) = err {
            return err.into();
        }

        Self {
            class: ErrorClass::InvalidArgument,
            origin: ErrorOrigin::Context,
            message: err.to_string(),
            detail: Some(ErrorDetail::Context(err)),
        }
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self {
            class: ErrorClass::Configuration,
            origin: ErrorOrigin::Config,
            message: err.to_string(),
            detail: Some(ErrorDetail::Config(err)),
        }
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Registration-time structural misconfiguration; never retried.
    Configuration,
    /// A row could not be turned into an object.
    Conversion,
    NotFound,
    InvalidArgument,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Conversion => "conversion",
            Self::NotFound => "not_found",
            Self::InvalidArgument => "invalid_argument",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Config,
    Model,
    Decode,
    Registry,
    Context,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Model => "model",
            Self::Decode => "decode",
            Self::Registry => "registry",
            Self::Context => "context",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
