use crate::{
    entity::{KeyspaceKeys, RootEntityDescriptor},
    manager::StatementManager,
    model::{ClassModel, ClassRef, FieldDecl, KeyspaceModel},
    row::{ResultRow, ResultRowBuilder},
    value::{FieldKind, Value},
};
use std::sync::Arc;

///
/// Zoo
///
/// Test hierarchy: an abstract `Animal` root with `Dog` and `Cat` types,
/// and `Puppy` as a narrower type below `Dog`.
///

pub struct Zoo {
    pub animal: ClassRef,
    pub dog: ClassRef,
    pub puppy: ClassRef,
    pub cat: ClassRef,
}

impl Zoo {
    pub fn new() -> Self {
        let animal = animal_class();
        let dog = ClassModel::concrete::<Dog>()
            .parent(&animal)
            .type_entity("dog")
            .field(FieldDecl::column("good_boy", FieldKind::Bool))
            .build();
        let puppy = ClassModel::concrete::<Puppy>()
            .parent(&dog)
            .type_entity("puppy")
            .field(FieldDecl::column("age_weeks", FieldKind::Uint))
            .build();
        let cat = ClassModel::concrete::<Cat>()
            .parent(&animal)
            .type_entity("cat")
            .field(FieldDecl::column("lives", FieldKind::Uint))
            .build();

        Self {
            animal,
            dog,
            puppy,
            cat,
        }
    }

    /// Root with every zoo type statically declared.
    pub fn root(&self, mgr: &StatementManager) -> Arc<RootEntityDescriptor> {
        mgr.root_entity(
            &self.animal,
            &[
                Arc::clone(&self.dog),
                Arc::clone(&self.puppy),
                Arc::clone(&self.cat),
            ],
        )
        .expect("zoo hierarchy is valid")
    }
}

pub fn animal_class() -> ClassRef {
    ClassModel::abstract_class("zoo::Animal")
        .root_entity()
        .keyspace(KeyspaceModel::new("zoo").suffix("tenant"))
        .table("animals")
        .field(FieldDecl::suffix("tenant", FieldKind::Text, "tenant").exclude(&["system"]))
        .field(FieldDecl::column("id", FieldKind::Uint).partition_key(0))
        .field(FieldDecl::column("kind", FieldKind::Text).type_key())
        .field(FieldDecl::column("name", FieldKind::Text).index())
        .build()
}

/// Keyspace keys selecting the `tenant` keyspace.
pub fn tenant(name: &str) -> KeyspaceKeys {
    KeyspaceKeys::from([("tenant".to_string(), Value::from(name))])
}

/// Row of the `animals` table carrying the shared root columns.
pub fn animal_row(kind: &str, id: u64, name: &str) -> ResultRowBuilder {
    ResultRow::builder("zoo_acme", "animals")
        .column("id", Value::Uint(id))
        .column("kind", kind)
        .column("name", name)
}

///
/// Dog
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dog {
    pub tenant: String,
    pub id: u64,
    pub kind: String,
    pub name: String,
    pub good_boy: bool,
}

crate::impl_pojo!(Dog, "zoo::Dog", { tenant, id, kind, name, good_boy });

///
/// Puppy
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Puppy {
    pub tenant: String,
    pub id: u64,
    pub kind: String,
    pub name: String,
    pub good_boy: bool,
    pub age_weeks: Option<u32>,
}

crate::impl_pojo!(Puppy, "zoo::Puppy", { tenant, id, kind, name, good_boy, age_weeks });

///
/// Cat
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cat {
    pub tenant: String,
    pub id: u64,
    pub kind: String,
    pub name: String,
    pub lives: u8,
}

crate::impl_pojo!(Cat, "zoo::Cat", { tenant, id, kind, name, lives });

// Types carrying only the shared animal columns.
macro_rules! plain_types {
    ( $( $ty:ident => $path:literal ),* $(,)? ) => {
        $(
            #[derive(Clone, Debug, Default, PartialEq)]
            pub struct $ty {
                pub tenant: String,
                pub id: u64,
                pub kind: String,
                pub name: String,
            }

            crate::impl_pojo!($ty, $path, { tenant, id, kind, name });
        )*
    };
}

plain_types!(
    Ferret => "zoo::Ferret",
    Lion => "zoo::Lion",
    Stray => "zoo::Stray",
    Rogue => "zoo::Rogue",
    Nameless => "zoo::Nameless",
    Twin => "zoo::Twin",
    Audited => "zoo::Audited",
    Sharded => "zoo::Sharded",
    Dated => "zoo::Dated",
    Wheat => "farm::Wheat",
    Fern => "garden::Fern",
    Gecko => "pen::Gecko",
);
