use crate::{
    entity::{
        Boundary, ContextError, EntityDescriptor, KeyspaceKeys, PojoContext, RegistryError,
        Resolved, TypeEntityDescriptor, typed::discover_discriminator,
    },
    error::InternalError,
    manager::StatementManager,
    model::{ClassRef, ConversionError, ModelError},
    row::Row,
    traits::Pojo,
};
use arc_swap::ArcSwap;
use std::{collections::HashMap, ops::Deref, sync::Arc};
use tracing::{debug, trace, warn};

type Registry = HashMap<String, Arc<TypeEntityDescriptor>>;

///
/// RootEntityDescriptor
///
/// Descriptor of the root of a persisted hierarchy. Owns the registry of
/// its type entities keyed by discriminator.
///
/// The registry is an immutable map behind an [`ArcSwap`]: lookups load the
/// current map without locking, registrations publish a modified copy.
///

#[derive(Debug)]
pub struct RootEntityDescriptor {
    base: EntityDescriptor,
    types: ArcSwap<Registry>,
}

impl RootEntityDescriptor {
    /// Build the root of `class` together with its statically declared
    /// `types`. The first type failing construction aborts the whole root.
    pub fn new(
        mgr: &StatementManager,
        class: &ClassRef,
        types: &[ClassRef],
    ) -> Result<Arc<Self>, ModelError> {
        let base = EntityDescriptor::introspect(mgr, class, Boundary::Root)?;
        let root = Arc::new(Self {
            base,
            types: ArcSwap::default(),
        });

        for type_class in types {
            let descriptor = TypeEntityDescriptor::new(mgr, &root, type_class, false)?;
            root.register(Arc::new(descriptor))?;
        }
        debug!(
            root = class.path(),
            keyspace = %root.keyspace_name(),
            types = types.len(),
            "root entity built"
        );

        Ok(root)
    }

    ///
    /// register
    ///
    /// Publish `descriptor` under its discriminator. A colliding
    /// discriminator is replaced; keeping discriminators unique is the
    /// caller's responsibility.
    ///
    pub fn register(&self, descriptor: Arc<TypeEntityDescriptor>) -> Result<(), ModelError> {
        if !descriptor.belongs_to(self) {
            return Err(ModelError::ForeignRoot {
                class: descriptor.object_class().path().to_string(),
                root: self.object_class().path().to_string(),
                registered_root: descriptor.root_path().to_string(),
            });
        }

        let discriminator = descriptor.discriminator();
        let previous = self.types.rcu(|current| {
            let mut next = Registry::clone(current);
            next.insert(discriminator.to_string(), Arc::clone(&descriptor));
            next
        });

        match previous.get(discriminator) {
            Some(replaced) if !Arc::ptr_eq(replaced, &descriptor) => warn!(
                root = self.object_class().path(),
                discriminator,
                replaced = replaced.object_class().path(),
                by = descriptor.object_class().path(),
                "discriminator collision, last registration wins"
            ),
            _ => debug!(
                root = self.object_class().path(),
                discriminator,
                dynamic = descriptor.is_dynamic(),
                "type entity registered"
            ),
        }

        Ok(())
    }

    /// Validate `class` against this root and publish it as a dynamic type.
    pub fn register_dynamic(
        self: &Arc<Self>,
        mgr: &StatementManager,
        class: &ClassRef,
    ) -> Result<Arc<TypeEntityDescriptor>, ModelError> {
        let descriptor = Arc::new(TypeEntityDescriptor::new(mgr, self, class, true)?);
        self.register(Arc::clone(&descriptor))?;

        Ok(descriptor)
    }

    pub fn lookup(&self, discriminator: &str) -> Result<Arc<TypeEntityDescriptor>, RegistryError> {
        self.types
            .load()
            .get(discriminator)
            .cloned()
            .ok_or_else(|| RegistryError::TypeNotFound {
                root: self.object_class().path().to_string(),
                discriminator: discriminator.to_string(),
            })
    }

    /// Registered types ordered by discriminator.
    #[must_use]
    pub fn types(&self) -> Vec<Arc<TypeEntityDescriptor>> {
        let mut types: Vec<_> = self.types.load().values().cloned().collect();
        types.sort_by_key(|t| t.discriminator());

        types
    }

    /// Registered type whose class is exactly the one at `path`.
    #[must_use]
    pub fn type_for_class(&self, path: &str) -> Option<Arc<TypeEntityDescriptor>> {
        self.types
            .load()
            .values()
            .find(|t| t.object_class().path() == path)
            .cloned()
    }

    /// Decode `row` with a known discriminator through the registered type.
    pub fn decode_as<R>(
        &self,
        row: Option<&R>,
        discriminator: &str,
        kkeys: &KeyspaceKeys,
    ) -> Result<Resolved, InternalError>
    where
        R: Row + ?Sized,
    {
        if row.is_none() {
            return Ok(Resolved::Empty);
        }

        self.lookup(discriminator)?
            .decode_as(row, discriminator, kkeys)
    }

    ///
    /// decode
    ///
    /// Decode `row` into whichever registered type its type key column
    /// names. Every registered type descends from the root, so the result is
    /// never `Unrelated`.
    ///
    pub fn decode<R>(&self, row: Option<&R>, kkeys: &KeyspaceKeys) -> Result<Resolved, InternalError>
    where
        R: Row + ?Sized,
    {
        let Some(row) = row else {
            return Ok(Resolved::Empty);
        };

        let discriminator = discover_discriminator(self.tables(), row)?.ok_or_else(|| {
            ConversionError::MissingTypeColumn {
                class: self.object_class().path().to_string(),
            }
        })?;
        trace!(
            root = self.object_class().path(),
            discriminator = %discriminator,
            "dispatching row from root"
        );

        self.lookup(&discriminator)?
            .decode_as(Some(row), &discriminator, kkeys)
    }

    /// Wrap `object` with the descriptor registered for its class.
    pub fn new_context(&self, object: Box<dyn Pojo>) -> Result<PojoContext, ContextError> {
        let Some(descriptor) = self.type_for_class(object.class_path()) else {
            return Err(ContextError::UnregisteredClass {
                root: self.object_class().path().to_string(),
                class: object.class_path().to_string(),
            });
        };

        descriptor.new_context_from_root(object)
    }
}

impl Deref for RootEntityDescriptor {
    type Target = EntityDescriptor;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}
