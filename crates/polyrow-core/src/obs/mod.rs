//! Diagnostics: serializable views of the descriptors held by a manager.
//!
//! Nothing here feeds back into decoding; snapshots are built on demand.

mod snapshot;

use crate::manager::StatementManager;
use std::iter;

// re-exports
pub use snapshot::{ColumnSnapshot, EntitySnapshot, TableSnapshot};

/// Snapshot every cached root followed by its registered types.
#[must_use]
pub fn registry_report(mgr: &StatementManager) -> Vec<EntitySnapshot> {
    mgr.roots()
        .iter()
        .flat_map(|root| {
            iter::once(EntitySnapshot::from_root(root)).chain(
                root.types()
                    .into_iter()
                    .map(|t| EntitySnapshot::from_type(&t)),
            )
        })
        .collect()
}

///
/// TESTS
///
