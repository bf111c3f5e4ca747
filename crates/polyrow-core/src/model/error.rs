use crate::traits::FieldError;
use derive_more::{Deref, IntoIterator};
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// ModelError
///
/// Structural-configuration error raised while building class models,
/// tables and descriptors. Always registration-time, never retried; the
/// offending descriptor is never published.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ModelError {
    #[error("type entity class '{class}' cannot be abstract")]
    AbstractTypeEntity { class: String },

    #[error("factory of class '{class}' builds objects of class '{produced}'")]
    FactoryMismatch { class: String, produced: String },

    #[error("class '{class}' is not annotated as a type entity")]
    MissingTypeEntity { class: String },

    #[error("class '{class}' is not annotated as, nor descends from, a root entity")]
    MissingRootEntity { class: String },

    #[error("type entity class '{class}' does not descend from root element class '{root}'")]
    NotASubtype { class: String, root: String },

    #[error(
        "type entity class '{class}' belongs to root '{registered_root}' and cannot be registered under root '{root}'"
    )]
    ForeignRoot {
        class: String,
        root: String,
        registered_root: String,
    },

    #[error("no keyspace annotation found for class '{class}' or its ancestors")]
    MissingKeyspace { class: String },

    #[error("no table annotation found for class '{class}' or its ancestors")]
    MissingTable { class: String },

    #[error("table '{table}' of class '{class}' has no partition key")]
    MissingPartitionKey { class: String, table: String },

    #[error("table '{table}' of class '{class}' declares more than one type key: '{first}' and '{second}'")]
    MultipleTypeKeys {
        class: String,
        table: String,
        first: String,
        second: String,
    },

    #[error("type key column '{column}' of table '{table}' in class '{class}' must be text")]
    TypeKeyNotText {
        class: String,
        table: String,
        column: String,
    },

    #[error("column '{column}' is declared more than once in class '{class}'")]
    DuplicateColumn { class: String, column: String },

    #[error("column '{column}' of class '{class}' is bound to unknown table '{table}'")]
    UnknownTable {
        class: String,
        column: String,
        table: String,
    },

    #[error("{role} ordinal {ordinal} is used twice in table '{table}' of class '{class}' (column '{column}')")]
    DuplicateKeyOrdinal {
        class: String,
        table: String,
        role: KeyRole,
        column: String,
        ordinal: u16,
    },

    #[error("keyspace of class '{class}' declares suffix type '{suffix_type}' with no keyspace key field")]
    MissingSuffixKey { class: String, suffix_type: String },

    #[error("keyspace key '{key}' is declared more than once in class '{class}'")]
    DuplicateKeyspaceKey { class: String, key: String },

    #[error(
        "type entity class '{class}' is inconsistent with root element class '{root}': {violations}"
    )]
    InvalidTypeEntity {
        class: String,
        root: String,
        violations: Violations,
    },
}

impl ModelError {
    /// Cross-validation violations carried by this error, if any.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::InvalidTypeEntity { violations, .. } => violations,
            _ => &[],
        }
    }
}

///
/// KeyRole
/// Structural role a field plays in a table.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KeyRole {
    PartitionKey,
    ClusteringKey,
    TypeKey,
    Index,
}

impl Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PartitionKey => "partition key",
            Self::ClusteringKey => "clustering key",
            Self::TypeKey => "type key",
            Self::Index => "index",
        };
        write!(f, "{label}")
    }
}

///
/// Violation
///
/// One failed cross-check between a type entity and its root.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Violation {
    /// Keyspace keys must be declared by the root class itself.
    KeyspaceKeyOutsideRoot {
        key: String,
        declared_in: String,
        root: String,
    },

    /// Nearest keyspace holder is not the root or one of its ancestors.
    KeyspaceOutsideRoot { found_in: String, root: String },

    /// Nearest table holder is not the root or one of its ancestors.
    TableOutsideRoot {
        table: String,
        found_in: String,
        root: String,
    },

    /// A structural field is not declared by the root or one of its ancestors.
    KeyFieldOutsideRoot {
        role: KeyRole,
        table: String,
        column: String,
        declared_in: String,
        root: String,
    },
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyspaceKeyOutsideRoot {
                key,
                declared_in,
                root,
            } => write!(
                f,
                "keyspace key '{key}' must be declared in root class '{root}' but is declared in '{declared_in}'"
            ),
            Self::KeyspaceOutsideRoot { found_in, root } => write!(
                f,
                "keyspace annotation found in '{found_in}', which is not visible from root class '{root}'"
            ),
            Self::TableOutsideRoot {
                table,
                found_in,
                root,
            } => write!(
                f,
                "table '{table}' annotation found in '{found_in}', which is not visible from root class '{root}'"
            ),
            Self::KeyFieldOutsideRoot {
                role,
                table,
                column,
                declared_in,
                root,
            } => write!(
                f,
                "{role} '{column}' of table '{table}' is declared in '{declared_in}', which is not visible from root class '{root}'"
            ),
        }
    }
}

///
/// Violations
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct Violations(Vec<Violation>);

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

///
/// ConversionError
///
/// Request-time failure turning a row into an object (or an object into
/// column values). Surfaced to the caller, never retried here.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ConversionError {
    #[error("missing POJO type column for class '{class}'")]
    MissingTypeColumn { class: String },

    #[error("class '{class}' is abstract and cannot be instantiated")]
    AbstractClass { class: String },

    #[error("column '{column}' (declared in '{declared_in}') expects {expected} but found {found}")]
    IncompatibleColumn {
        column: String,
        declared_in: String,
        expected: String,
        found: &'static str,
    },

    #[error("mandatory column '{column}' (declared in '{declared_in}') is null")]
    MandatoryColumnNull { column: String, declared_in: String },

    #[error("persister for column '{column}' failed: {message}")]
    Persister { column: String, message: String },

    #[error("class '{class}' cannot assign column '{column}': {source}")]
    Attribute {
        class: String,
        column: String,
        source: FieldError,
    },

    #[error("object of class '{class}' does not expose attribute '{attribute}'")]
    UnknownAttribute { class: String, attribute: String },

    #[error("missing value for keyspace key '{key}' of class '{class}'")]
    MissingKeyspaceKey { class: String, key: String },

    #[error("value '{value}' of keyspace key '{key}' is excluded for class '{class}'")]
    ExcludedKeyspaceKey {
        class: String,
        key: String,
        value: String,
    },
}
