//! Entity descriptors.
//!
//! A root entity descriptor owns the registry of the type entity descriptors
//! of its hierarchy. Both are built on the generic [`EntityDescriptor`]
//! introspection of one class; type entities are additionally validated
//! against their root and dispatch rows by discriminator.
mod base;
mod context;
mod error;
mod resolved;
mod root;
mod typed;
mod validate;

#[cfg(test)]
mod tests;

pub(crate) use base::Boundary;

// re-exports
pub use base::{EntityDescriptor, KeyspaceKeys};
pub use context::PojoContext;
pub use error::{ContextError, RegistryError};
pub use resolved::Resolved;
pub use root::RootEntityDescriptor;
pub use typed::TypeEntityDescriptor;
