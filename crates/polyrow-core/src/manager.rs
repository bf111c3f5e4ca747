use crate::{
    config::MapperConfig,
    entity::RootEntityDescriptor,
    model::{ClassRef, ModelError},
};
use arc_swap::ArcSwap;
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

///
/// StatementManager
///
/// Owner of the mapper configuration and of every root entity descriptor
/// built through it. Descriptors keep a handle on the configuration only;
/// the manager is otherwise opaque to them.
///

#[derive(Debug, Default)]
pub struct StatementManager {
    config: Arc<MapperConfig>,
    roots: ArcSwap<HashMap<&'static str, Arc<RootEntityDescriptor>>>,
}

impl StatementManager {
    #[must_use]
    pub fn new(config: MapperConfig) -> Self {
        Self {
            config: Arc::new(config),
            roots: ArcSwap::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub(crate) fn shared_config(&self) -> Arc<MapperConfig> {
        Arc::clone(&self.config)
    }

    ///
    /// root_entity
    ///
    /// Root descriptor of `class`, building it with the statically declared
    /// `types` on first use. Later calls return the cached descriptor and
    /// ignore `types`; use
    /// [`RootEntityDescriptor::register_dynamic`] to grow the set.
    ///
    pub fn root_entity(
        &self,
        class: &ClassRef,
        types: &[ClassRef],
    ) -> Result<Arc<RootEntityDescriptor>, ModelError> {
        if let Some(root) = self.find_root(class.path()) {
            return Ok(root);
        }

        let root = RootEntityDescriptor::new(self, class, types)?;
        let path = class.path();
        let previous = self.roots.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.entry(path).or_insert_with(|| Arc::clone(&root));
            next
        });

        // a concurrent builder may have published first
        if let Some(winner) = previous.get(path) {
            return Ok(Arc::clone(winner));
        }
        debug!(root = path, types = types.len(), "root entity published");

        Ok(root)
    }

    /// Cached root descriptor for the class at `path`.
    #[must_use]
    pub fn find_root(&self, path: &str) -> Option<Arc<RootEntityDescriptor>> {
        self.roots.load().get(path).cloned()
    }

    /// Every cached root, ordered by class path.
    #[must_use]
    pub fn roots(&self) -> Vec<Arc<RootEntityDescriptor>> {
        let mut roots: Vec<_> = self.roots.load().values().cloned().collect();
        roots.sort_by_key(|r| r.object_class().path());

        roots
    }
}
