use crate::{
    entity::{ContextError, KeyspaceKeys, TypeEntityDescriptor},
    model::{ConversionError, FieldRef, TableModel},
    row::ResultRow,
    traits::Pojo,
    value::Value,
};
use std::sync::Arc;

///
/// PojoContext
///
/// A concrete object paired with the descriptor of its exact class, ready
/// to be turned into column values for statement building.
///

#[derive(Debug)]
pub struct PojoContext {
    descriptor: Arc<TypeEntityDescriptor>,
    object: Box<dyn Pojo>,
}

impl PojoContext {
    pub(crate) fn new(descriptor: Arc<TypeEntityDescriptor>, object: Box<dyn Pojo>) -> Self {
        Self { descriptor, object }
    }

    #[must_use]
    pub fn object(&self) -> &dyn Pojo {
        &*self.object
    }

    #[must_use]
    pub fn into_object(self) -> Box<dyn Pojo> {
        self.object
    }

    #[must_use]
    pub const fn descriptor(&self) -> &Arc<TypeEntityDescriptor> {
        &self.descriptor
    }

    /// Current keyspace key values of the object, by key name.
    pub fn keyspace_key_values(&self) -> Result<KeyspaceKeys, ConversionError> {
        self.descriptor
            .keyspace_key_fields()
            .iter()
            .map(|(name, field)| -> Result<_, ConversionError> {
                let value = self.object.get_value(field.attribute()).ok_or_else(|| {
                    ConversionError::UnknownAttribute {
                        class: self.object.class_path().to_string(),
                        attribute: field.attribute().to_string(),
                    }
                })?;

                Ok(((*name).to_string(), value))
            })
            .collect()
    }

    /// Keyspace the object lives in.
    pub fn keyspace_name(&self) -> Result<String, ConversionError> {
        let kkeys = self.keyspace_key_values()?;

        self.descriptor.resolve_keyspace_name(&kkeys)
    }

    /// Every column of `table` with its encoded value, in table order.
    pub fn column_values(&self, table: &str) -> Result<Vec<(&'static str, Value)>, ContextError> {
        let table = self.table(table)?;

        self.encode(table.fields().iter())
    }

    /// Partition key then clustering key columns of `table`.
    pub fn primary_key_values(
        &self,
        table: &str,
    ) -> Result<Vec<(&'static str, Value)>, ContextError> {
        let table = self.table(table)?;

        self.encode(table.primary_key_fields())
    }

    /// The object as a row of `table` in its resolved keyspace.
    pub fn to_row(&self, table: &str) -> Result<ResultRow, ContextError> {
        let keyspace = self.keyspace_name()?;
        let columns = self.column_values(table)?;

        let row = columns
            .into_iter()
            .fold(ResultRow::builder(keyspace, table), |row, (name, value)| {
                row.column(name, value)
            })
            .build();

        Ok(row)
    }

    fn table(&self, name: &str) -> Result<&TableModel, ContextError> {
        self.descriptor
            .table(name)
            .ok_or_else(|| ContextError::UnknownTable {
                class: self.descriptor.object_class().path().to_string(),
                table: name.to_string(),
            })
    }

    // The type key column always carries the descriptor's discriminator.
    fn encode<'a, I>(&self, fields: I) -> Result<Vec<(&'static str, Value)>, ContextError>
    where
        I: Iterator<Item = &'a FieldRef>,
    {
        fields
            .map(|field| -> Result<_, ContextError> {
                let value = if field.is_type_key() {
                    Value::Text(self.descriptor.discriminator().to_string())
                } else {
                    field.encode_value(&*self.object)?
                };

                Ok((field.column_name(), value))
            })
            .collect()
    }
}
