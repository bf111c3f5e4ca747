use crate::value::Value;
use std::fmt::{self, Display};

///
/// FieldKind
///
/// Declared column type of a field.
/// Aligned with `Value` variants; `Null` is accepted by every kind and
/// mandatory-ness is checked separately.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Blob,
    Bool,
    Float,
    Int,
    Text,
    Uint,
    Ulid,
    List(Box<Self>),
}

impl FieldKind {
    /// Whether `value` can be stored in a column of this kind.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null)
            | (Self::Blob, Value::Blob(_))
            | (Self::Bool, Value::Bool(_))
            | (Self::Float, Value::Float(_))
            | (Self::Int, Value::Int(_))
            | (Self::Text, Value::Text(_))
            | (Self::Uint, Value::Uint(_))
            | (Self::Ulid, Value::Ulid(_)) => true,
            (Self::List(inner), Value::List(items)) => {
                items.iter().all(|item| !item.is_null() && inner.accepts(item))
            }
            _ => false,
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Bool => write!(f, "bool"),
            Self::Float => write!(f, "float"),
            Self::Int => write!(f, "int"),
            Self::Text => write!(f, "text"),
            Self::Uint => write!(f, "uint"),
            Self::Ulid => write!(f, "ulid"),
            Self::List(inner) => write!(f, "list<{inner}>"),
        }
    }
}
