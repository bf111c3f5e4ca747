use crate::{
    config::ValidationMode,
    entity::EntityDescriptor,
    model::{ClassModel, KeyRole, TableModel, Violation, Violations},
};

///
/// cross_validate
///
/// Check that every field steering keyspace resolution, partitioning,
/// clustering, discrimination or indexing of `entity` is visible from
/// `root`, and that its keyspace and table annotations are too.
/// Violations are produced lazily in declaration order; `First` stops at
/// the first one.
///
pub(crate) fn cross_validate(
    entity: &EntityDescriptor,
    root: &ClassModel,
    mode: ValidationMode,
) -> Violations {
    let found = keyspace_keys(entity, root)
        .chain(holders(entity, root))
        .chain(
            entity
                .tables()
                .iter()
                .flat_map(move |table| key_fields(table, root)),
        );

    match mode {
        ValidationMode::All => found.collect(),
        ValidationMode::First => found.take(1).collect(),
    }
}

// Keyspace keys are defined once, by the root class itself.
fn keyspace_keys<'a>(
    entity: &'a EntityDescriptor,
    root: &'a ClassModel,
) -> impl Iterator<Item = Violation> + 'a {
    entity
        .keyspace_key_fields()
        .iter()
        .filter(move |(_, field)| !field.declaring_class().same_class(root))
        .map(move |(key, field)| Violation::KeyspaceKeyOutsideRoot {
            key: (*key).to_string(),
            declared_in: field.declaring_class().path().to_string(),
            root: root.path().to_string(),
        })
}

fn holders<'a>(
    entity: &'a EntityDescriptor,
    root: &'a ClassModel,
) -> impl Iterator<Item = Violation> + 'a {
    let keyspace_holder = entity.keyspace_holder();
    let keyspace = (!keyspace_holder.is_assignable_from(root)).then(|| {
        Violation::KeyspaceOutsideRoot {
            found_in: keyspace_holder.path().to_string(),
            root: root.path().to_string(),
        }
    });

    let table_holder = entity.table_holder();
    let tables = entity
        .tables()
        .iter()
        .filter(move |_| !table_holder.is_assignable_from(root))
        .map(move |table| Violation::TableOutsideRoot {
            table: table.name().to_string(),
            found_in: table_holder.path().to_string(),
            root: root.path().to_string(),
        });

    keyspace.into_iter().chain(tables)
}

fn key_fields<'a>(
    table: &'a TableModel,
    root: &'a ClassModel,
) -> impl Iterator<Item = Violation> + 'a {
    let roles = table
        .partition_key_fields()
        .iter()
        .map(|f| (KeyRole::PartitionKey, f))
        .chain(
            table
                .clustering_key_fields()
                .iter()
                .map(|f| (KeyRole::ClusteringKey, f)),
        )
        .chain(table.type_key_field().map(|f| (KeyRole::TypeKey, f)))
        .chain(table.index_fields().iter().map(|f| (KeyRole::Index, f)));

    roles
        .filter(move |(_, field)| !field.declaring_class().is_assignable_from(root))
        .map(move |(role, field)| Violation::KeyFieldOutsideRoot {
            role,
            table: table.name().to_string(),
            column: field.column_name().to_string(),
            declared_in: field.declaring_class().path().to_string(),
            root: root.path().to_string(),
        })
}
