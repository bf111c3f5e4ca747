use crate::{
    model::{ClassRef, ConversionError},
    row::Row,
    traits::Pojo,
    value::{FieldKind, Value},
};
use std::{fmt::Debug, sync::Arc};

///
/// Persister
///
/// Custom encoding of one attribute onto a database primitive.
/// `stored_kind` is the column kind the encoded form must satisfy.
///

pub trait Persister: Debug + Send + Sync {
    fn stored_kind(&self) -> FieldKind;

    fn encode(&self, value: &Value) -> Result<Value, String>;

    fn decode(&self, value: &Value) -> Result<Value, String>;
}

///
/// ClusteringOrder
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ClusteringOrder {
    #[default]
    Asc,
    Desc,
}

///
/// KeyspaceKeyDecl
/// Keyspace (suffix) key role of a field.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyspaceKeyDecl {
    pub suffix_type: &'static str,
    pub exclude: Vec<String>,
}

///
/// FieldDecl
///
/// Field as declared on one class. Turned into a [`FieldModel`] once the
/// declaring class is known.
///

#[derive(Clone, Debug)]
pub struct FieldDecl {
    attribute: &'static str,
    column: Option<&'static str>,
    kind: FieldKind,
    tables: Option<Vec<&'static str>>,
    partition_key: Option<u16>,
    clustering_key: Option<(u16, ClusteringOrder)>,
    type_key: bool,
    index: bool,
    mandatory: bool,
    keyspace_key: Option<KeyspaceKeyDecl>,
    persister: Option<Arc<dyn Persister>>,
}

impl FieldDecl {
    /// A persisted column named after the attribute.
    #[must_use]
    pub const fn column(attribute: &'static str, kind: FieldKind) -> Self {
        Self {
            attribute,
            column: Some(attribute),
            kind,
            tables: None,
            partition_key: None,
            clustering_key: None,
            type_key: false,
            index: false,
            mandatory: false,
            keyspace_key: None,
            persister: None,
        }
    }

    /// A keyspace key that is not stored in any column.
    #[must_use]
    pub fn suffix(attribute: &'static str, kind: FieldKind, suffix_type: &'static str) -> Self {
        Self {
            column: None,
            ..Self::column(attribute, kind).keyspace_key(suffix_type)
        }
    }

    /// Override the column name.
    #[must_use]
    pub const fn named(mut self, column: &'static str) -> Self {
        self.column = Some(column);
        self
    }

    /// Restrict the column to the listed tables (default: every table).
    #[must_use]
    pub fn in_tables(mut self, tables: &[&'static str]) -> Self {
        self.tables = Some(tables.to_vec());
        self
    }

    #[must_use]
    pub const fn partition_key(mut self, ordinal: u16) -> Self {
        self.partition_key = Some(ordinal);
        self.mandatory = true;
        self
    }

    #[must_use]
    pub const fn clustering_key(mut self, ordinal: u16, order: ClusteringOrder) -> Self {
        self.clustering_key = Some((ordinal, order));
        self.mandatory = true;
        self
    }

    #[must_use]
    pub const fn type_key(mut self) -> Self {
        self.type_key = true;
        self
    }

    #[must_use]
    pub const fn index(mut self) -> Self {
        self.index = true;
        self
    }

    #[must_use]
    pub const fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Also use this column as a keyspace key of the given suffix type.
    #[must_use]
    pub fn keyspace_key(mut self, suffix_type: &'static str) -> Self {
        self.keyspace_key = Some(KeyspaceKeyDecl {
            suffix_type,
            exclude: Vec::new(),
        });
        self
    }

    /// Keyspace key values for which no keyspace may be resolved.
    #[must_use]
    pub fn exclude(mut self, values: &[&str]) -> Self {
        if let Some(key) = self.keyspace_key.as_mut() {
            key.exclude = values.iter().map(ToString::to_string).collect();
        }
        self
    }

    #[must_use]
    pub fn persister(mut self, persister: Arc<dyn Persister>) -> Self {
        self.persister = Some(persister);
        self
    }

    #[must_use]
    pub const fn attribute(&self) -> &'static str {
        self.attribute
    }

    #[must_use]
    pub const fn column_name(&self) -> Option<&'static str> {
        self.column
    }

    /// Whether this column belongs to `table`.
    #[must_use]
    pub fn applies_to(&self, table: &str) -> bool {
        self.column.is_some()
            && self
                .tables
                .as_ref()
                .is_none_or(|tables| tables.iter().any(|t| *t == table))
    }

    pub(crate) fn bound_tables(&self) -> &[&'static str] {
        self.tables.as_deref().unwrap_or_default()
    }
}

///
/// FieldModel
///
/// Field descriptor: a declared field bound to its declaring class.
///

#[derive(Debug)]
pub struct FieldModel {
    decl: FieldDecl,
    declaring_class: ClassRef,
}

pub type FieldRef = Arc<FieldModel>;

impl FieldModel {
    #[must_use]
    pub const fn new(decl: FieldDecl, declaring_class: ClassRef) -> Self {
        Self {
            decl,
            declaring_class,
        }
    }

    #[must_use]
    pub const fn declaring_class(&self) -> &ClassRef {
        &self.declaring_class
    }

    #[must_use]
    pub const fn attribute(&self) -> &'static str {
        self.decl.attribute
    }

    /// Column name, or the attribute name for keyspace-key-only fields.
    #[must_use]
    pub const fn column_name(&self) -> &'static str {
        match self.decl.column {
            Some(column) => column,
            None => self.decl.attribute,
        }
    }

    #[must_use]
    pub const fn is_column(&self) -> bool {
        self.decl.column.is_some()
    }

    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.decl.kind
    }

    #[must_use]
    pub const fn partition_key(&self) -> Option<u16> {
        self.decl.partition_key
    }

    #[must_use]
    pub const fn clustering_key(&self) -> Option<(u16, ClusteringOrder)> {
        self.decl.clustering_key
    }

    #[must_use]
    pub const fn is_type_key(&self) -> bool {
        self.decl.type_key
    }

    #[must_use]
    pub const fn is_index(&self) -> bool {
        self.decl.index
    }

    #[must_use]
    pub const fn is_mandatory(&self) -> bool {
        self.decl.mandatory
    }

    #[must_use]
    pub const fn keyspace_key(&self) -> Option<&KeyspaceKeyDecl> {
        self.decl.keyspace_key.as_ref()
    }

    #[must_use]
    pub fn applies_to(&self, table: &str) -> bool {
        self.decl.applies_to(table)
    }

    /// Decode the column at `index` of `row` into this field's value.
    pub fn decode_value<R>(&self, row: &R, index: usize) -> Result<Value, ConversionError>
    where
        R: Row + ?Sized,
    {
        let raw = row.value(index).cloned().unwrap_or(Value::Null);

        let value = match &self.decl.persister {
            Some(persister) if !raw.is_null() => {
                self.check_kind(&persister.stored_kind(), &raw)?;
                persister
                    .decode(&raw)
                    .map_err(|message| self.persister_error(message))?
            }
            _ => raw,
        };

        self.check_kind(&self.decl.kind, &value)?;
        self.check_mandatory(&value)?;

        Ok(value)
    }

    /// Read this field from `object` and encode it for storage.
    pub fn encode_value(&self, object: &dyn Pojo) -> Result<Value, ConversionError> {
        let value = object
            .get_value(self.decl.attribute)
            .ok_or_else(|| ConversionError::UnknownAttribute {
                class: object.class_path().to_string(),
                attribute: self.decl.attribute.to_string(),
            })?;

        self.check_kind(&self.decl.kind, &value)?;
        self.check_mandatory(&value)?;

        match &self.decl.persister {
            Some(persister) if !value.is_null() => {
                let encoded = persister
                    .encode(&value)
                    .map_err(|message| self.persister_error(message))?;
                self.check_kind(&persister.stored_kind(), &encoded)?;

                Ok(encoded)
            }
            _ => Ok(value),
        }
    }

    fn check_kind(&self, kind: &FieldKind, value: &Value) -> Result<(), ConversionError> {
        if kind.accepts(value) {
            return Ok(());
        }

        Err(ConversionError::IncompatibleColumn {
            column: self.column_name().to_string(),
            declared_in: self.declaring_class.path().to_string(),
            expected: kind.to_string(),
            found: value.label(),
        })
    }

    fn check_mandatory(&self, value: &Value) -> Result<(), ConversionError> {
        if self.decl.mandatory && value.is_null() {
            return Err(ConversionError::MandatoryColumnNull {
                column: self.column_name().to_string(),
                declared_in: self.declaring_class.path().to_string(),
            });
        }

        Ok(())
    }

    fn persister_error(&self, message: String) -> ConversionError {
        ConversionError::Persister {
            column: self.column_name().to_string(),
            message,
        }
    }
}

///
/// TESTS
///
