use crate::{
    entity::{EntityDescriptor, RootEntityDescriptor, TypeEntityDescriptor},
    model::{FieldModel, TableModel},
};
use serde::Serialize;

///
/// EntitySnapshot
/// Descriptor shape of one root or type entity.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct EntitySnapshot {
    /// Class path (e.g., zoo::Dog)
    pub class: String,

    /// Root class path; equal to `class` for a root
    pub root: String,

    /// Discriminator; `None` for a root
    pub discriminator: Option<String>,

    pub dynamic: bool,

    /// Keyspace name before suffix resolution
    pub keyspace: String,

    pub keyspace_keys: Vec<String>,
    pub tables: Vec<TableSnapshot>,
}

impl EntitySnapshot {
    #[must_use]
    pub fn from_root(root: &RootEntityDescriptor) -> Self {
        let class = root.object_class().path().to_string();

        Self {
            root: class.clone(),
            class,
            ..Self::describe(root)
        }
    }

    #[must_use]
    pub fn from_type(entity: &TypeEntityDescriptor) -> Self {
        Self {
            class: entity.object_class().path().to_string(),
            root: entity.root_path().to_string(),
            discriminator: Some(entity.discriminator().to_string()),
            dynamic: entity.is_dynamic(),
            ..Self::describe(entity)
        }
    }

    fn describe(entity: &EntityDescriptor) -> Self {
        Self {
            keyspace: entity.keyspace_name(),
            keyspace_keys: entity
                .keyspace_key_fields()
                .keys()
                .map(ToString::to_string)
                .collect(),
            tables: entity.tables().iter().map(TableSnapshot::from).collect(),
            ..Self::default()
        }
    }
}

///
/// TableSnapshot
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct TableSnapshot {
    pub name: String,
    pub columns: Vec<ColumnSnapshot>,
}

impl From<&TableModel> for TableSnapshot {
    fn from(table: &TableModel) -> Self {
        Self {
            name: table.name().to_string(),
            columns: table
                .fields()
                .iter()
                .map(|f| ColumnSnapshot::from(&**f))
                .collect(),
        }
    }
}

///
/// ColumnSnapshot
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct ColumnSnapshot {
    pub name: String,
    pub kind: String,
    pub declared_in: String,

    /// Structural roles, e.g. "partition key 0", "mandatory"
    pub roles: Vec<String>,
}

impl From<&FieldModel> for ColumnSnapshot {
    fn from(field: &FieldModel) -> Self {
        let mut roles = Vec::new();
        if let Some(ordinal) = field.partition_key() {
            roles.push(format!("partition key {ordinal}"));
        }
        if let Some((ordinal, order)) = field.clustering_key() {
            roles.push(format!("clustering key {ordinal} {order:?}").to_lowercase());
        }
        if field.is_type_key() {
            roles.push("type key".to_string());
        }
        if field.is_index() {
            roles.push("index".to_string());
        }
        if field.is_mandatory() {
            roles.push("mandatory".to_string());
        }
        if let Some(key) = field.keyspace_key() {
            roles.push(format!("keyspace key {}", key.suffix_type));
        }

        Self {
            name: field.column_name().to_string(),
            kind: field.kind().to_string(),
            declared_in: field.declaring_class().path().to_string(),
            roles,
        }
    }
}
