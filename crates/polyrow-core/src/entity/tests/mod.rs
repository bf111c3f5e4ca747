mod context;
mod dispatch;
mod property;

use crate::{
    entity::{RootEntityDescriptor, TypeEntityDescriptor},
    manager::StatementManager,
    test_fixtures::Zoo,
};
use std::sync::Arc;

/// Manager, zoo classes and the built zoo root.
fn zoo_root() -> (StatementManager, Zoo, Arc<RootEntityDescriptor>) {
    let mgr = StatementManager::default();
    let zoo = Zoo::new();
    let root = zoo.root(&mgr);

    (mgr, zoo, root)
}

fn lookup(root: &RootEntityDescriptor, discriminator: &str) -> Arc<TypeEntityDescriptor> {
    root.lookup(discriminator)
        .expect("discriminator is registered")
}
