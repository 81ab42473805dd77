//! Storage collaborators.
//!
//! The accessor layer never owns persistence. It talks to two traits:
//!
//! - [`AttributeStore`]: read and write the raw integer of one attribute on one record.
//! - [`QueryBuilder`]: restrict a query to records whose raw value is in a set.
//!
//! [`Record`] and [`MemoryTable`] are in-memory implementations, used by the tests
//! and by embedders that have no persistence layer of their own.

use indexmap::IndexMap;
use std::collections::HashMap;

/// Raw attribute access on a single record.
pub trait AttributeStore {
    /// Stored raw value, `None` when unset.
    fn read_attribute(&self, name: &str) -> Option<i64>;

    /// Store a raw value, `None` to unset.
    fn write_attribute(&mut self, name: &str, value: Option<i64>);
}

/// Query-building primitive: filter by attribute membership in a set of raw values.
pub trait QueryBuilder {
    type Output;

    fn where_in(self, attribute: &str, raw_values: &[i64]) -> Self::Output;
}

/// A record held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    attributes: HashMap<String, i64>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw value while building a record.
    pub fn with(mut self, name: &str, value: i64) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }
}

impl AttributeStore for Record {
    fn read_attribute(&self, name: &str) -> Option<i64> {
        self.attributes.get(name).copied()
    }

    fn write_attribute(&mut self, name: &str, value: Option<i64>) {
        match value {
            Some(raw) => {
                self.attributes.insert(name.to_string(), raw);
            }
            None => {
                self.attributes.remove(name);
            }
        }
    }
}

/// An in-memory table of records with column defaults.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    defaults: IndexMap<String, i64>,
    rows: Vec<Record>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a column default applied to records built by [`MemoryTable::build`].
    pub fn with_default(mut self, column: &str, value: i64) -> Self {
        self.defaults.insert(column.to_string(), value);
        self
    }

    /// A new, unsaved record carrying the column defaults.
    pub fn build(&self) -> Record {
        self.defaults
            .iter()
            .fold(Record::new(), |record, (column, value)| record.with(column, *value))
    }

    pub fn insert(&mut self, record: Record) {
        self.rows.push(record);
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Every record, as a chainable relation.
    pub fn all(&self) -> Relation<'_> {
        Relation {
            rows: self.rows.iter().collect(),
        }
    }
}

/// Result of a query over a [`MemoryTable`].
#[derive(Debug, Clone)]
pub struct Relation<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> Relation<'a> {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn first(&self) -> Option<&'a Record> {
        self.rows.first().copied()
    }
}

fn raw_in(record: &Record, attribute: &str, raw_values: &[i64]) -> bool {
    record
        .read_attribute(attribute)
        .is_some_and(|raw| raw_values.contains(&raw))
}

impl<'a> QueryBuilder for &'a MemoryTable {
    type Output = Relation<'a>;

    fn where_in(self, attribute: &str, raw_values: &[i64]) -> Relation<'a> {
        self.all().where_in(attribute, raw_values)
    }
}

impl<'a> QueryBuilder for Relation<'a> {
    type Output = Relation<'a>;

    fn where_in(mut self, attribute: &str, raw_values: &[i64]) -> Relation<'a> {
        self.rows.retain(|record| raw_in(record, attribute, raw_values));
        self
    }
}
