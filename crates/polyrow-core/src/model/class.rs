use crate::{
    model::{FieldDecl, KeyspaceModel},
    traits::{Factory, Path, Pojo, default_factory},
};
use std::{
    fmt::{self, Debug},
    sync::Arc,
};

pub type ClassRef = Arc<ClassModel>;

///
/// ClassModel
///
/// Explicit class metadata for one type of a persisted hierarchy.
/// Stands in for runtime reflection: the parent link, the annotations and the
/// declared fields are all supplied once through [`ClassBuilder`].
///

pub struct ClassModel {
    path: &'static str,
    parent: Option<ClassRef>,
    factory: Option<Factory>,
    root_entity: bool,
    type_entity: Option<&'static str>,
    keyspace: Option<KeyspaceModel>,
    tables: Vec<&'static str>,
    fields: Vec<FieldDecl>,
}

impl ClassModel {
    /// Start a constructible class backed by the Rust type `T`.
    #[must_use]
    pub fn concrete<T>() -> ClassBuilder
    where
        T: Path + Pojo + Default,
    {
        ClassBuilder::new(T::PATH, Some(default_factory::<T>))
    }

    /// Start a class that cannot be instantiated.
    #[must_use]
    pub fn abstract_class(path: &'static str) -> ClassBuilder {
        ClassBuilder::new(path, None)
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Last path segment, used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.path.rsplit("::").next().unwrap_or(self.path)
    }

    #[must_use]
    pub const fn parent(&self) -> Option<&ClassRef> {
        self.parent.as_ref()
    }

    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.factory.is_none()
    }

    #[must_use]
    pub const fn factory(&self) -> Option<Factory> {
        self.factory
    }

    #[must_use]
    pub const fn is_root_entity(&self) -> bool {
        self.root_entity
    }

    /// Discriminator declared by this class's own type-entity annotation.
    #[must_use]
    pub const fn type_entity(&self) -> Option<&'static str> {
        self.type_entity
    }

    #[must_use]
    pub const fn keyspace(&self) -> Option<&KeyspaceModel> {
        self.keyspace.as_ref()
    }

    #[must_use]
    pub fn tables(&self) -> &[&'static str] {
        &self.tables
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Exact class identity.
    #[must_use]
    pub fn same_class(&self, other: &Self) -> bool {
        self.path == other.path
    }

    /// Whether `other` is this class or one of its descendants.
    #[must_use]
    pub fn is_assignable_from(&self, other: &Self) -> bool {
        other.ancestors().any(|c| c.same_class(self))
    }

    /// This class followed by each parent up to the top of the hierarchy.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }
}

/// Nearest class in `class.ancestors()` matching `pred`, as a shared handle.
pub fn find_first_annotated<P>(class: &ClassRef, pred: P) -> Option<ClassRef>
where
    P: Fn(&ClassModel) -> bool,
{
    let mut current = Some(class);
    while let Some(c) = current {
        if pred(c) {
            return Some(Arc::clone(c));
        }
        current = c.parent();
    }

    None
}

impl Debug for ClassModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassModel")
            .field("path", &self.path)
            .field("parent", &self.parent.as_ref().map(|p| p.path))
            .field("abstract", &self.is_abstract())
            .field("root_entity", &self.root_entity)
            .field("type_entity", &self.type_entity)
            .field("keyspace", &self.keyspace)
            .field("tables", &self.tables)
            .field("fields", &self.fields.len())
            .finish()
    }
}

///
/// Ancestors
///

pub struct Ancestors<'a> {
    next: Option<&'a ClassModel>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ClassModel;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();

        Some(current)
    }
}

///
/// ClassBuilder
///
/// Declarative registration of one class: the annotations a persistence
/// framework would otherwise discover by reflection.
///

#[derive(Debug)]
pub struct ClassBuilder {
    class: ClassModel,
}

impl ClassBuilder {
    const fn new(path: &'static str, factory: Option<Factory>) -> Self {
        Self {
            class: ClassModel {
                path,
                parent: None,
                factory,
                root_entity: false,
                type_entity: None,
                keyspace: None,
                tables: Vec::new(),
                fields: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn parent(mut self, parent: &ClassRef) -> Self {
        self.class.parent = Some(Arc::clone(parent));
        self
    }

    /// Mark the class as the root of a persisted hierarchy.
    #[must_use]
    pub const fn root_entity(mut self) -> Self {
        self.class.root_entity = true;
        self
    }

    /// Mark the class as a type entity with the given discriminator.
    #[must_use]
    pub const fn type_entity(mut self, discriminator: &'static str) -> Self {
        self.class.type_entity = Some(discriminator);
        self
    }

    #[must_use]
    pub fn keyspace(mut self, keyspace: KeyspaceModel) -> Self {
        self.class.keyspace = Some(keyspace);
        self
    }

    #[must_use]
    pub fn table(mut self, name: &'static str) -> Self {
        self.class.tables.push(name);
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.class.fields.push(field);
        self
    }

    #[must_use]
    pub fn build(self) -> ClassRef {
        Arc::new(self.class)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn hierarchy() -> (ClassRef, ClassRef, ClassRef) {
        let base = ClassModel::abstract_class("class_tests::Base")
            .keyspace(KeyspaceModel::new("zoo"))
            .build();
        let root = ClassModel::abstract_class("class_tests::Root")
            .parent(&base)
            .root_entity()
            .table("animals")
            .build();
        let leaf = ClassModel::abstract_class("class_tests::Leaf")
            .parent(&root)
            .type_entity("leaf")
            .build();

        (base, root, leaf)
    }

    #[test]
    fn assignability_follows_parent_links() {
        let (base, root, leaf) = hierarchy();

        assert!(base.is_assignable_from(&root));
        assert!(base.is_assignable_from(&leaf));
        assert!(root.is_assignable_from(&root));
        assert!(!leaf.is_assignable_from(&root));
        assert!(!root.same_class(&leaf));
    }

    #[test]
    fn ancestors_start_with_self() {
        let (_, _, leaf) = hierarchy();
        let paths: Vec<_> = leaf.ancestors().map(ClassModel::path).collect();

        assert_eq!(
            paths,
            ["class_tests::Leaf", "class_tests::Root", "class_tests::Base"]
        );
        assert_eq!(leaf.name(), "Leaf");
    }

    #[test]
    fn nearest_annotation_walks_up() {
        let (_, root, leaf) = hierarchy();

        let keyspace_holder = find_first_annotated(&leaf, |c| c.keyspace().is_some())
            .expect("base declares the keyspace");
        let table_holder = find_first_annotated(&leaf, |c| !c.tables().is_empty())
            .expect("root declares the table");

        assert_eq!(keyspace_holder.path(), "class_tests::Base");
        assert!(Arc::ptr_eq(&table_holder, &root));
        assert!(find_first_annotated(&leaf, |c| c.factory().is_some()).is_none());
    }
}
