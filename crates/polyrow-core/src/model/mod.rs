//! Runtime class metadata.
//!
//! Types in `model` are the explicit stand-ins for what a reflection-based
//! mapper would discover at runtime: class hierarchies, declared fields,
//! table layouts and keyspace annotations. Descriptors in `entity` are built
//! from them once, at registration time.
mod class;
mod error;
mod field;
mod keyspace;
mod table;

// re-exports
pub use class::{Ancestors, ClassBuilder, ClassModel, ClassRef, find_first_annotated};
pub use error::{ConversionError, KeyRole, ModelError, Violation, Violations};
pub use field::{
    ClusteringOrder, FieldDecl, FieldModel, FieldRef, KeyspaceKeyDecl, Persister,
};
pub use keyspace::{KeyspaceModel, sanitize};
pub use table::TableModel;
