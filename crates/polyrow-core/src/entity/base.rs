use crate::{
    config::MapperConfig,
    manager::StatementManager,
    model::{
        ClassModel, ClassRef, ConversionError, FieldModel, FieldRef, KeyspaceModel, ModelError,
        TableModel, find_first_annotated,
    },
    row::Row,
    traits::Pojo,
    value::Value,
};
use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

/// Keyspace key values by key name, reported back into decoded objects.
pub type KeyspaceKeys = BTreeMap<String, Value>;

///
/// Boundary
/// Where introspection expects the root-entity marker.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Boundary {
    /// The class itself must carry the marker.
    Root,
    /// The marker must be found on the class or one of its ancestors.
    Type,
}

///
/// EntityDescriptor
///
/// Introspected persistence shape of one class: keyspace, tables, columns
/// and keyspace keys. Decodes rows without any polymorphic dispatch.
///

#[derive(Debug)]
pub struct EntityDescriptor {
    class: ClassRef,
    config: Arc<MapperConfig>,
    keyspace: KeyspaceModel,
    keyspace_holder: ClassRef,
    table_holder: ClassRef,
    tables: Vec<TableModel>,
    columns: Vec<FieldRef>,
    keyspace_keys: BTreeMap<&'static str, FieldRef>,
}

impl EntityDescriptor {
    pub(crate) fn introspect(
        mgr: &StatementManager,
        class: &ClassRef,
        boundary: Boundary,
    ) -> Result<Self, ModelError> {
        let marked = match boundary {
            Boundary::Root => class.is_root_entity(),
            Boundary::Type => class.ancestors().any(ClassModel::is_root_entity),
        };
        if !marked {
            return Err(ModelError::MissingRootEntity {
                class: class.path().to_string(),
            });
        }

        let fields = collect_fields(class);

        let keyspace_holder = find_first_annotated(class, |c| c.keyspace().is_some()).ok_or_else(
            || ModelError::MissingKeyspace {
                class: class.path().to_string(),
            },
        )?;
        let table_holder = find_first_annotated(class, |c| !c.tables().is_empty()).ok_or_else(
            || ModelError::MissingTable {
                class: class.path().to_string(),
            },
        )?;
        let keyspace = keyspace_holder
            .keyspace()
            .cloned()
            .ok_or_else(|| ModelError::MissingKeyspace {
                class: class.path().to_string(),
            })?;

        let mut seen = HashSet::new();
        for field in fields.iter().filter(|f| f.is_column()) {
            if !seen.insert(field.column_name()) {
                return Err(ModelError::DuplicateColumn {
                    class: class.path().to_string(),
                    column: field.column_name().to_string(),
                });
            }
        }

        for decl in class.ancestors().flat_map(|c| c.fields()) {
            if let Some(table) = decl
                .bound_tables()
                .iter()
                .find(|t| !table_holder.tables().iter().any(|h| h == *t))
            {
                return Err(ModelError::UnknownTable {
                    class: class.path().to_string(),
                    column: decl.column_name().unwrap_or(decl.attribute()).to_string(),
                    table: (*table).to_string(),
                });
            }
        }

        let tables = table_holder
            .tables()
            .iter()
            .map(|name| TableModel::build(class.path(), name, &fields))
            .collect::<Result<Vec<_>, _>>()?;

        let mut keyspace_keys = BTreeMap::new();
        for field in fields.iter().filter(|f| f.keyspace_key().is_some()) {
            if keyspace_keys
                .insert(field.column_name(), Arc::clone(field))
                .is_some()
            {
                return Err(ModelError::DuplicateKeyspaceKey {
                    class: class.path().to_string(),
                    key: field.column_name().to_string(),
                });
            }
        }
        for suffix_type in keyspace.suffixes() {
            let covered = keyspace_keys
                .values()
                .any(|f| f.keyspace_key().is_some_and(|k| k.suffix_type == *suffix_type));
            if !covered {
                return Err(ModelError::MissingSuffixKey {
                    class: class.path().to_string(),
                    suffix_type: (*suffix_type).to_string(),
                });
            }
        }

        let columns = fields.into_iter().filter(|f| f.is_column()).collect();

        Ok(Self {
            class: Arc::clone(class),
            config: mgr.shared_config(),
            keyspace,
            keyspace_holder,
            table_holder,
            tables,
            columns,
            keyspace_keys,
        })
    }

    #[must_use]
    pub const fn object_class(&self) -> &ClassRef {
        &self.class
    }

    /// Keyspace name before suffix resolution.
    #[must_use]
    pub fn keyspace_name(&self) -> String {
        self.keyspace.base_name(&self.config.keyspace)
    }

    /// Full keyspace name for the given keyspace key values.
    pub fn resolve_keyspace_name(&self, kkeys: &KeyspaceKeys) -> Result<String, ConversionError> {
        self.keyspace.resolve(&self.config.keyspace, |suffix_type| {
            let Some((name, field)) = self
                .keyspace_keys
                .iter()
                .find(|(_, f)| f.keyspace_key().is_some_and(|k| k.suffix_type == suffix_type))
            else {
                return Err(self.missing_key(suffix_type));
            };

            let value = match kkeys.get(*name) {
                None | Some(Value::Null) => return Err(self.missing_key(name)),
                Some(Value::Text(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
            let excluded = field
                .keyspace_key()
                .is_some_and(|k| k.exclude.iter().any(|e| *e == value));
            if excluded {
                return Err(ConversionError::ExcludedKeyspaceKey {
                    class: self.class.path().to_string(),
                    key: (*name).to_string(),
                    value,
                });
            }

            Ok(value)
        })
    }

    #[must_use]
    pub fn tables(&self) -> &[TableModel] {
        &self.tables
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableModel> {
        self.tables.iter().find(|t| t.name() == name)
    }

    #[must_use]
    pub const fn keyspace_key_fields(&self) -> &BTreeMap<&'static str, FieldRef> {
        &self.keyspace_keys
    }

    /// Every column of every table, root-most declarations first.
    #[must_use]
    pub fn columns(&self) -> &[FieldRef] {
        &self.columns
    }

    /// Nearest class, from this one upwards, carrying the keyspace annotation.
    #[must_use]
    pub const fn keyspace_holder(&self) -> &ClassRef {
        &self.keyspace_holder
    }

    /// Nearest class, from this one upwards, carrying the table annotations.
    #[must_use]
    pub const fn table_holder(&self) -> &ClassRef {
        &self.table_holder
    }

    ///
    /// decode
    ///
    /// Instantiate the described class and fill it from every column present
    /// in `row`, then report the keyspace key values back into it. A keyspace
    /// key with no supplied value is only tolerated when the row carries it.
    ///
    pub fn decode<R>(&self, row: &R, kkeys: &KeyspaceKeys) -> Result<Box<dyn Pojo>, ConversionError>
    where
        R: Row + ?Sized,
    {
        let factory = self
            .class
            .factory()
            .ok_or_else(|| ConversionError::AbstractClass {
                class: self.class.path().to_string(),
            })?;
        let mut object = factory();
        let definitions = row.column_definitions();

        for field in &self.columns {
            let Some(index) = definitions.index_of(field.column_name()) else {
                continue;
            };
            let value = field.decode_value(row, index)?;
            self.assign(object.as_mut(), field, value)?;
        }

        for (name, field) in &self.keyspace_keys {
            match kkeys.get(*name) {
                Some(value) => self.assign(object.as_mut(), field, value.clone())?,
                None if field.is_column() && definitions.index_of(name).is_some() => {}
                None => return Err(self.missing_key(name)),
            }
        }

        Ok(object)
    }

    fn assign(
        &self,
        object: &mut dyn Pojo,
        field: &FieldModel,
        value: Value,
    ) -> Result<(), ConversionError> {
        object
            .set_value(field.attribute(), value)
            .map_err(|source| ConversionError::Attribute {
                class: self.class.path().to_string(),
                column: field.column_name().to_string(),
                source,
            })
    }

    fn missing_key(&self, key: &str) -> ConversionError {
        ConversionError::MissingKeyspaceKey {
            class: self.class.path().to_string(),
            key: key.to_string(),
        }
    }
}

// Bind the declared fields of `class` and all its ancestors, root-most first.
fn collect_fields(class: &ClassRef) -> Vec<FieldRef> {
    let mut lineage = Vec::new();
    let mut current = Some(class);
    while let Some(c) = current {
        lineage.push(c);
        current = c.parent();
    }

    lineage
        .into_iter()
        .rev()
        .flat_map(|c| {
            c.fields()
                .iter()
                .map(move |decl| Arc::new(FieldModel::new(decl.clone(), Arc::clone(c))))
        })
        .collect()
}
