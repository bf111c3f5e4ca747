//! Minimal row abstraction required from the storage driver.
//!
//! A row exposes its column definitions (queryable by name, with the source
//! keyspace and table of every column) and typed value extraction by index.
use crate::value::Value;

///
/// Row
///

pub trait Row {
    fn column_definitions(&self) -> &ColumnDefinitions;

    /// Value at `index`, or `None` when the index is out of range.
    fn value(&self, index: usize) -> Option<&Value>;
}

///
/// ColumnDefinition
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnDefinition {
    pub keyspace: String,
    pub table: String,
    pub name: String,
}

///
/// ColumnDefinitions
/// Ordered column metadata of a result row.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColumnDefinitions {
    columns: Vec<ColumnDefinition>,
}

impl ColumnDefinitions {
    #[must_use]
    pub const fn new(columns: Vec<ColumnDefinition>) -> Self {
        Self { columns }
    }

    /// Index of the first column named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Source table of the column at `index`.
    #[must_use]
    pub fn table(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.table.as_str())
    }

    /// Source keyspace of the column at `index`.
    #[must_use]
    pub fn keyspace(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.keyspace.as_str())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter()
    }
}

///
/// ResultRow
///
/// Owned row produced by a driver adapter or by
/// [`PojoContext::to_row`](crate::entity::PojoContext::to_row).
///

#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    definitions: ColumnDefinitions,
    values: Vec<Value>,
}

impl ResultRow {
    /// Start a row whose columns all come from `keyspace.table`.
    #[must_use]
    pub fn builder(keyspace: impl Into<String>, table: impl Into<String>) -> ResultRowBuilder {
        ResultRowBuilder {
            keyspace: keyspace.into(),
            table: table.into(),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of the column named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.definitions
            .index_of(name)
            .and_then(|i| self.values.get(i))
    }
}

impl Row for ResultRow {
    fn column_definitions(&self) -> &ColumnDefinitions {
        &self.definitions
    }

    fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

///
/// ResultRowBuilder
///

#[derive(Debug)]
pub struct ResultRowBuilder {
    keyspace: String,
    table: String,
    columns: Vec<ColumnDefinition>,
    values: Vec<Value>,
}

impl ResultRowBuilder {
    /// Append a column sourced from the builder's table.
    #[must_use]
    pub fn column(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let table = self.table.clone();
        self.column_from(table, name, value)
    }

    /// Append a column sourced from another table of the same keyspace.
    #[must_use]
    pub fn column_from(
        mut self,
        table: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.columns.push(ColumnDefinition {
            keyspace: self.keyspace.clone(),
            table: table.into(),
            name: name.into(),
        });
        self.values.push(value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> ResultRow {
        ResultRow {
            definitions: ColumnDefinitions::new(self.columns),
            values: self.values,
        }
    }
}

///
/// TESTS
///
