//! Core of the polyrow mapper: class metadata, entity descriptors and the
//! polymorphic row-resolution engine for single-table hierarchies.
//!
//! Concrete types sharing a root entity are persisted through the root's
//! tables and told apart on read-back by a discriminator (type key) column.

// public exports are one module level down
pub mod config;
pub mod entity;
pub mod error;
pub mod manager;
pub mod model;
pub mod obs;
pub mod row;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Vocabulary needed to declare a hierarchy and decode rows through it.
///

pub mod prelude {
    pub use crate::{
        entity::{KeyspaceKeys, Resolved, RootEntityDescriptor, TypeEntityDescriptor},
        manager::StatementManager,
        model::{ClassModel, ClassRef, ClusteringOrder, FieldDecl, KeyspaceModel},
        row::{ResultRow, Row},
        traits::{Path, Pojo},
        value::{FieldKind, Value},
    };
}
