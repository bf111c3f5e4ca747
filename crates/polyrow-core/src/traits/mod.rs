#[macro_use]
mod macros;

use crate::value::{FieldValue, Value};
use std::{any::Any, fmt::Debug};
use thiserror::Error as ThisError;

///
/// Path
/// Fully-qualified class path. Identity of a class in the model.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// Pojo
///
/// Plain data object persisted through a root entity's tables.
/// Attribute access is by attribute name so that descriptors can fill and read
/// objects without knowing their concrete Rust type.
///

pub trait Pojo: Any + Debug + Send + Sync {
    /// Path of this object's concrete class.
    fn class_path(&self) -> &'static str;

    fn get_value(&self, field: &str) -> Option<Value>;

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), FieldError>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl dyn Pojo {
    #[must_use]
    pub fn is<T: Pojo>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Pojo>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Take ownership of the concrete object, or `None` on a type mismatch.
    #[must_use]
    pub fn downcast<T: Pojo>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}

///
/// FieldError
///
/// Failure to assign a value to an object attribute.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum FieldError {
    #[error("unknown attribute '{0}'")]
    UnknownField(String),

    #[error("attribute '{field}' cannot hold {} value '{value}'", .value.label())]
    TypeMismatch { field: String, value: Value },
}

/// Assign a column value to a typed attribute slot.
/// Used by [`impl_pojo!`]-generated setters.
pub fn assign_field<T: FieldValue>(
    slot: &mut T,
    field: &str,
    value: Value,
) -> Result<(), FieldError> {
    match T::from_value(&value) {
        Some(v) => {
            *slot = v;
            Ok(())
        }
        None => Err(FieldError::TypeMismatch {
            field: field.to_string(),
            value,
        }),
    }
}

/// Factory producing a default-initialized object of a concrete class.
pub type Factory = fn() -> Box<dyn Pojo>;

/// Default factory for any constructible pojo type.
#[must_use]
pub fn default_factory<T: Pojo + Default>() -> Box<dyn Pojo> {
    Box::new(T::default())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Probe {
        label: String,
        weight: Option<u32>,
    }

    impl_pojo!(Probe, "traits_tests::Probe", { label, weight });

    #[test]
    fn generated_accessors_read_and_write_by_attribute() {
        let mut probe = Probe::default();
        probe
            .set_value("label", Value::Text("alpha".into()))
            .expect("text fits a String attribute");
        probe
            .set_value("weight", Value::Uint(7))
            .expect("uint fits an Option<u32> attribute");

        assert_eq!(probe.get_value("label"), Some(Value::Text("alpha".into())));
        assert_eq!(probe.get_value("weight"), Some(Value::Uint(7)));
        assert_eq!(probe.get_value("missing"), None);
        assert_eq!(probe.class_path(), "traits_tests::Probe");
    }

    #[test]
    fn setter_reports_unknown_and_mismatched_attributes() {
        let mut probe = Probe::default();

        assert_eq!(
            probe.set_value("nope", Value::Null),
            Err(FieldError::UnknownField("nope".to_string()))
        );
        let err = probe
            .set_value("label", Value::Int(3))
            .expect_err("int does not fit a String attribute");
        assert_eq!(err.to_string(), "attribute 'label' cannot hold int value '3'");
    }

    #[test]
    fn boxed_pojo_downcasts_to_its_concrete_type() {
        let boxed: Box<dyn Pojo> = default_factory::<Probe>();

        assert!(boxed.is::<Probe>());
        assert_eq!(boxed.downcast_ref::<Probe>(), Some(&Probe::default()));
        let probe = boxed.downcast::<Probe>().expect("factory builds a Probe");
        assert_eq!(*probe, Probe::default());
    }
}
