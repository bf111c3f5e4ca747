use crate::{
    entity::{
        Boundary, ContextError, EntityDescriptor, KeyspaceKeys, PojoContext, Resolved,
        RootEntityDescriptor, validate::cross_validate,
    },
    error::InternalError,
    manager::StatementManager,
    model::{ClassRef, ConversionError, ModelError, TableModel},
    row::Row,
    traits::Pojo,
};
use std::{
    fmt::{self, Display},
    ops::Deref,
    ptr,
    sync::{Arc, Weak},
};
use tracing::{debug, trace};

///
/// TypeEntityDescriptor
///
/// Descriptor of one concrete type of a root entity's hierarchy. Validated
/// against its root once, at construction, and immutable afterwards.
/// Decodes rows tagged with its own discriminator and delegates rows of
/// narrower registered types to their descriptors.
///

#[derive(Debug)]
pub struct TypeEntityDescriptor {
    base: EntityDescriptor,
    root: Weak<RootEntityDescriptor>,
    root_path: &'static str,
    discriminator: &'static str,
    dynamic: bool,
}

impl TypeEntityDescriptor {
    pub(crate) fn new(
        mgr: &StatementManager,
        root: &Arc<RootEntityDescriptor>,
        class: &ClassRef,
        dynamic: bool,
    ) -> Result<Self, ModelError> {
        if class.is_abstract() {
            return Err(ModelError::AbstractTypeEntity {
                class: class.path().to_string(),
            });
        }

        // decoded objects must carry the identity of the class they decode for
        if let Some(factory) = class.factory() {
            let produced = factory().class_path();
            if produced != class.path() {
                return Err(ModelError::FactoryMismatch {
                    class: class.path().to_string(),
                    produced: produced.to_string(),
                });
            }
        }

        let base = EntityDescriptor::introspect(mgr, class, Boundary::Type)?;
        let discriminator = class
            .type_entity()
            .ok_or_else(|| ModelError::MissingTypeEntity {
                class: class.path().to_string(),
            })?;

        let root_class = root.object_class();
        if !root_class.is_assignable_from(class) {
            return Err(ModelError::NotASubtype {
                class: class.path().to_string(),
                root: root_class.path().to_string(),
            });
        }

        let violations = cross_validate(&base, root_class, mgr.config().validation.mode);
        if !violations.is_empty() {
            return Err(ModelError::InvalidTypeEntity {
                class: class.path().to_string(),
                root: root_class.path().to_string(),
                violations,
            });
        }

        debug!(
            class = class.path(),
            root = root_class.path(),
            discriminator,
            dynamic,
            "type entity validated"
        );

        Ok(Self {
            base,
            root: Arc::downgrade(root),
            root_path: root_class.path(),
            discriminator,
            dynamic,
        })
    }

    /// Owning root, unless it has already been dropped.
    #[must_use]
    pub fn root(&self) -> Option<Arc<RootEntityDescriptor>> {
        self.root.upgrade()
    }

    /// Class path of the owning root.
    #[must_use]
    pub const fn root_path(&self) -> &'static str {
        self.root_path
    }

    #[must_use]
    pub const fn discriminator(&self) -> &'static str {
        self.discriminator
    }

    /// Whether this type joined its root after the static declaration set.
    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub(crate) fn belongs_to(&self, root: &RootEntityDescriptor) -> bool {
        ptr::eq(self.root.as_ptr(), root)
    }

    ///
    /// decode_as
    ///
    /// Decode `row` knowing its discriminator. Rows of this type are decoded
    /// here; rows of a registered subtype are handed to that subtype's
    /// descriptor; rows of any other registered type are `Unrelated`.
    /// An unregistered discriminator is a registry error.
    ///
    pub fn decode_as<R>(
        &self,
        row: Option<&R>,
        discriminator: &str,
        kkeys: &KeyspaceKeys,
    ) -> Result<Resolved, InternalError>
    where
        R: Row + ?Sized,
    {
        let Some(row) = row else {
            return Ok(Resolved::Empty);
        };

        self.dispatch(row, discriminator, kkeys)
    }

    ///
    /// decode
    ///
    /// Decode `row`, discovering its discriminator from the first table
    /// whose type key column the row carries.
    ///
    pub fn decode<R>(&self, row: Option<&R>, kkeys: &KeyspaceKeys) -> Result<Resolved, InternalError>
    where
        R: Row + ?Sized,
    {
        let Some(row) = row else {
            return Ok(Resolved::Empty);
        };

        match discover_discriminator(self.tables(), row)? {
            Some(discriminator) => self.dispatch(row, &discriminator, kkeys),
            None => Err(ConversionError::MissingTypeColumn {
                class: self.object_class().path().to_string(),
            }
            .into()),
        }
    }

    fn dispatch<R>(
        &self,
        row: &R,
        discriminator: &str,
        kkeys: &KeyspaceKeys,
    ) -> Result<Resolved, InternalError>
    where
        R: Row + ?Sized,
    {
        if discriminator == self.discriminator {
            return Ok(Resolved::Object(self.base.decode(row, kkeys)?));
        }

        let root = self.root().ok_or_else(|| {
            InternalError::registry_internal(format!(
                "root '{}' of type entity '{}' is no longer available",
                self.root_path, self.discriminator
            ))
        })?;
        let target = root.lookup(discriminator)?;

        if !self.object_class().is_assignable_from(target.object_class()) {
            trace!(
                from = self.discriminator,
                discriminator, "row belongs to an unrelated type"
            );
            return Ok(Resolved::Unrelated {
                discriminator: discriminator.to_string(),
            });
        }
        trace!(
            from = self.discriminator,
            to = target.discriminator,
            "delegating row to subtype"
        );

        // the registry is keyed by discriminator, so this never hops again
        Ok(Resolved::Object(target.base.decode(row, kkeys)?))
    }

    ///
    /// new_context_from_root
    ///
    /// Wrap `object` for statement building. The object must be exactly of
    /// this descriptor's class.
    ///
    pub fn new_context_from_root(
        self: &Arc<Self>,
        object: Box<dyn Pojo>,
    ) -> Result<PojoContext, ContextError> {
        let expected = self.object_class().path();
        if object.class_path() != expected {
            return Err(ContextError::ClassMismatch {
                expected: expected.to_string(),
                found: object.class_path().to_string(),
            });
        }

        Ok(PojoContext::new(Arc::clone(self), object))
    }
}

impl Deref for TypeEntityDescriptor {
    type Target = EntityDescriptor;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl Display for TypeEntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TypeEntityDescriptor[type={},class={},keyspace={},columns=[",
            self.discriminator,
            self.object_class().path(),
            self.keyspace_name()
        )?;
        for (i, column) in self.columns().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", column.column_name())?;
        }
        write!(f, "]]")
    }
}

/// Discriminator of `row` from the first table declaring a type key whose
/// column the row carries from that same table. `None` when no such column
/// exists or its value is null.
pub(crate) fn discover_discriminator<R>(
    tables: &[TableModel],
    row: &R,
) -> Result<Option<String>, ConversionError>
where
    R: Row + ?Sized,
{
    let definitions = row.column_definitions();

    for table in tables {
        let Some(type_key) = table.type_key_field() else {
            continue;
        };
        let Some(index) = definitions.index_of(type_key.column_name()) else {
            continue;
        };
        if definitions.table(index) != Some(table.name()) {
            continue;
        }

        let value = type_key.decode_value(row, index)?;
        return Ok(value.as_text().map(ToString::to_string));
    }

    Ok(None)
}
