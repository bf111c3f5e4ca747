use crate::{
    model::{FieldRef, KeyRole, ModelError},
    value::FieldKind,
};
use std::{collections::BTreeMap, sync::Arc};

///
/// TableModel
///
/// Table descriptor: the ordered columns of one physical table and the
/// identification of its partition, clustering, type key and index fields.
///

#[derive(Debug)]
pub struct TableModel {
    name: &'static str,
    fields: Vec<FieldRef>,
    partition_keys: Vec<FieldRef>,
    clustering_keys: Vec<FieldRef>,
    type_key: Option<FieldRef>,
    indexes: Vec<FieldRef>,
}

impl TableModel {
    /// Build the table `name` of `class` from every field bound to it.
    /// `fields` must already be in declaration order, root-most class first.
    pub(crate) fn build(
        class: &str,
        name: &'static str,
        fields: &[FieldRef],
    ) -> Result<Self, ModelError> {
        let fields: Vec<FieldRef> = fields
            .iter()
            .filter(|f| f.applies_to(name))
            .cloned()
            .collect();

        let partition_keys = ordered_keys(class, name, &fields, KeyRole::PartitionKey, |f| {
            f.partition_key()
        })?;
        if partition_keys.is_empty() {
            return Err(ModelError::MissingPartitionKey {
                class: class.to_string(),
                table: name.to_string(),
            });
        }
        let clustering_keys = ordered_keys(class, name, &fields, KeyRole::ClusteringKey, |f| {
            f.clustering_key().map(|(ordinal, _)| ordinal)
        })?;

        let mut type_key: Option<FieldRef> = None;
        for field in fields.iter().filter(|f| f.is_type_key()) {
            if let Some(first) = &type_key {
                return Err(ModelError::MultipleTypeKeys {
                    class: class.to_string(),
                    table: name.to_string(),
                    first: first.column_name().to_string(),
                    second: field.column_name().to_string(),
                });
            }
            if *field.kind() != FieldKind::Text {
                return Err(ModelError::TypeKeyNotText {
                    class: class.to_string(),
                    table: name.to_string(),
                    column: field.column_name().to_string(),
                });
            }
            type_key = Some(Arc::clone(field));
        }

        let indexes = fields.iter().filter(|f| f.is_index()).cloned().collect();

        Ok(Self {
            name,
            fields,
            partition_keys,
            clustering_keys,
            type_key,
            indexes,
        })
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldRef] {
        &self.fields
    }

    /// Partition keys in ordinal order.
    #[must_use]
    pub fn partition_key_fields(&self) -> &[FieldRef] {
        &self.partition_keys
    }

    /// Clustering keys in ordinal order.
    #[must_use]
    pub fn clustering_key_fields(&self) -> &[FieldRef] {
        &self.clustering_keys
    }

    #[must_use]
    pub const fn type_key_field(&self) -> Option<&FieldRef> {
        self.type_key.as_ref()
    }

    #[must_use]
    pub fn index_fields(&self) -> &[FieldRef] {
        &self.indexes
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&FieldRef> {
        self.fields.iter().find(|f| f.column_name() == name)
    }

    /// Partition keys followed by clustering keys.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &FieldRef> {
        self.partition_keys.iter().chain(self.clustering_keys.iter())
    }
}

// Collect the fields carrying an ordinal for `role`, sorted and unique.
fn ordered_keys<F>(
    class: &str,
    table: &str,
    fields: &[FieldRef],
    role: KeyRole,
    ordinal: F,
) -> Result<Vec<FieldRef>, ModelError>
where
    F: Fn(&FieldRef) -> Option<u16>,
{
    let mut keys = BTreeMap::new();
    for field in fields {
        let Some(n) = ordinal(field) else {
            continue;
        };
        if keys.insert(n, Arc::clone(field)).is_some() {
            return Err(ModelError::DuplicateKeyOrdinal {
                class: class.to_string(),
                table: table.to_string(),
                role,
                column: field.column_name().to_string(),
                ordinal: n,
            });
        }
    }

    Ok(keys.into_values().collect())
}

///
/// TESTS
///
