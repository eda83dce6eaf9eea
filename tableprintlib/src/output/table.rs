//! The row tree handed to renderers.
//!
//! The data flow is:
//! 1. Data items (`Value`s) and columns
//! 2. Fingerprinter (walks items against the column path tree)
//! 3. Table (a root RowGroup of Rows, each Row owning nested RowGroups)
//!
//! Renderers walk a Table depth-first: each RowGroup is a table, each Row's
//! children are sub-tables printed beneath that row. Nothing here formats
//! values; cells hold the raw extracted [`Value`].

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::config::Config;
use crate::data::{Value, METHOD_MISSING};

/// The value of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// An extracted (or computed) value, possibly `Value::Null`
    Value(Value),
    /// No member, method or key could be resolved
    MethodMissing,
}

impl CellValue {
    /// Returns `true` if resolution failed for this cell.
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::MethodMissing)
    }

    /// The extracted value, if resolution succeeded.
    pub fn value(&self) -> Option<&Value> {
        match self {
            CellValue::Value(v) => Some(v),
            CellValue::MethodMissing => None,
        }
    }
}

impl From<Value> for CellValue {
    fn from(v: Value) -> Self {
        CellValue::Value(v)
    }
}

impl From<Option<Value>> for CellValue {
    fn from(v: Option<Value>) -> Self {
        match v {
            Some(value) => CellValue::Value(value),
            None => CellValue::MethodMissing,
        }
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Value(Value::from(v))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() respects width and alignment from the formatter
        match self {
            CellValue::Value(v) => f.pad(&v.to_string()),
            CellValue::MethodMissing => f.pad(METHOD_MISSING),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Value(v) => v.serialize(serializer),
            CellValue::MethodMissing => serializer.serialize_str(METHOD_MISSING),
        }
    }
}

/// A keyed cell within a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    /// Column name (namespaced by association path, e.g. `books.title`)
    pub key: String,
    /// Extracted value
    pub value: CellValue,
}

/// One row: cells in column order, plus nested association sub-tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    cells: Vec<Cell>,
    children: Vec<RowGroup>,
}

impl Row {
    /// An empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a cell. Setting an existing key replaces its value, so
    /// keys stay unique within the row.
    pub fn with_cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.cells.iter_mut().find(|c| c.key == key) {
            Some(cell) => cell.value = value,
            None => self.cells.push(Cell { key, value }),
        }
        self
    }

    /// Builder: set several cells
    pub fn with_cells<I, K, V>(self, cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        cells
            .into_iter()
            .fold(self, |row, (k, v)| row.with_cell(k, v))
    }

    /// Builder: attach a nested row group
    pub fn with_child(mut self, group: RowGroup) -> Self {
        self.children.push(group);
        self
    }

    /// Cells in column order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Value of the cell with this key.
    pub fn cell(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|c| c.key == key).map(|c| &c.value)
    }

    /// Nested row groups, one per non-empty association.
    pub fn children(&self) -> &[RowGroup] {
        &self.children
    }

    /// Compare cells as a mapping (order-insensitive) and children in order.
    pub fn data_equal(&self, other: &Row) -> bool {
        self.cells.len() == other.cells.len()
            && self
                .cells
                .iter()
                .all(|c| other.cell(&c.key) == Some(&c.value))
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.data_equal(b))
    }
}

/// The sibling rows for one association (or the table root).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RowGroup {
    rows: Vec<Row>,
}

impl RowGroup {
    /// An empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a row
    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Rows in data order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows directly in this group.
    pub fn child_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the group has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of nested group levels, counting this one (0 when empty).
    pub fn depth(&self) -> usize {
        if self.rows.is_empty() {
            return 0;
        }
        let nested = self
            .rows
            .iter()
            .flat_map(|row| row.children.iter())
            .map(RowGroup::depth)
            .max()
            .unwrap_or(0);
        nested + 1
    }

    /// Rows in this group and every nested group.
    pub fn row_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| 1 + row.children.iter().map(RowGroup::row_count).sum::<usize>())
            .sum()
    }

    /// Compare rows pairwise with [`Row::data_equal`].
    pub fn data_equal(&self, other: &RowGroup) -> bool {
        self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| a.data_equal(b))
    }
}

impl From<Vec<Row>> for RowGroup {
    fn from(rows: Vec<Row>) -> Self {
        RowGroup { rows }
    }
}

/// The lifted table: a root row group plus the caller's config.
///
/// The config is shared, not copied: `Arc::ptr_eq(table.config(), &config)`
/// holds for the `Arc` the fingerprinter was built with.
#[derive(Debug, Clone)]
pub struct Table<C = Config> {
    config: Arc<C>,
    rows: RowGroup,
}

impl<C> Table<C> {
    /// Wrap a root group and a config.
    pub fn new(config: Arc<C>, rows: RowGroup) -> Self {
        Self { config, rows }
    }

    /// The config this table was lifted with.
    pub fn config(&self) -> &Arc<C> {
        &self.config
    }

    /// The root row group.
    pub fn rows(&self) -> &RowGroup {
        &self.rows
    }

    /// Deepest level of nesting (1 for a flat table, 0 when empty).
    pub fn depth(&self) -> usize {
        self.rows.depth()
    }

    /// All rows, at every level.
    pub fn row_count(&self) -> usize {
        self.rows.row_count()
    }

    /// Compare row trees, ignoring config.
    pub fn data_equal<D>(&self, other: &Table<D>) -> bool {
        self.rows.data_equal(&other.rows)
    }
}

impl<C: Serialize> Serialize for Table<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("Table", 2)?;
        out.serialize_field("config", self.config.as_ref())?;
        out.serialize_field("rows", &self.rows)?;
        out.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author_row(name: &str, titles: &[&str]) -> Row {
        let books = titles.iter().fold(RowGroup::new(), |group, title| {
            group.with_row(Row::new().with_cell("books.title", *title))
        });
        let row = Row::new().with_cell("name", name);
        if books.is_empty() {
            row
        } else {
            row.with_child(books)
        }
    }

    #[test]
    fn test_with_cell_keeps_keys_unique() {
        let row = Row::new()
            .with_cell("name", "a")
            .with_cell("title", "t")
            .with_cell("name", "b");
        assert_eq!(row.cells().len(), 2);
        assert_eq!(row.cells()[0].key, "name");
        assert_eq!(row.cell("name"), Some(&CellValue::from("b")));
    }

    #[test]
    fn test_data_equal_ignores_cell_order() {
        let a = Row::new().with_cells([("title", "foobar"), ("author", "bobby")]);
        let b = Row::new().with_cells([("author", "bobby"), ("title", "foobar")]);
        assert!(a.data_equal(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_data_equal_compares_children() {
        let a = author_row("dale", &["one"]);
        assert!(a.data_equal(&author_row("dale", &["one"])));
        assert!(!a.data_equal(&author_row("dale", &["two"])));
        assert!(!a.data_equal(&author_row("dale", &[])));
        assert!(!a.data_equal(&author_row("dale", &["one", "two"])));
    }

    #[test]
    fn test_data_equal_distinguishes_null_from_missing() {
        let null = Row::new().with_cell("name", Value::Null);
        let missing = Row::new().with_cell("name", CellValue::MethodMissing);
        assert!(!null.data_equal(&missing));
    }

    #[test]
    fn test_group_depth_and_row_count() {
        let group = RowGroup::new()
            .with_row(author_row("a", &["x", "y"]))
            .with_row(author_row("b", &[]));
        assert_eq!(group.child_count(), 2);
        assert_eq!(group.depth(), 2);
        assert_eq!(group.row_count(), 4);
        assert_eq!(RowGroup::new().depth(), 0);
    }

    #[test]
    fn test_table_data_equal_ignores_config() {
        let rows = RowGroup::new().with_row(author_row("a", &["x"]));
        let a = Table::new(Arc::new(Config::default()), rows.clone());
        let b = Table::new(Arc::new("something else"), rows);
        assert!(a.data_equal(&b));
        assert_eq!(a.depth(), 2);
        assert_eq!(a.row_count(), 2);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::MethodMissing.to_string(), METHOD_MISSING);
        assert_eq!(CellValue::from(Value::Int(42)).to_string(), "42");
        assert_eq!(CellValue::from(Value::Null).to_string(), "");
        assert_eq!(format!("{:>5}", CellValue::from("ab")), "   ab");
        assert_eq!(format!("{:<5}|", CellValue::from("ab")), "ab   |");
    }

    #[test]
    fn test_cell_from_option() {
        assert!(CellValue::from(None::<Value>).is_missing());
        assert_eq!(
            CellValue::from(Some(Value::from("x"))).value(),
            Some(&Value::from("x"))
        );
    }

    #[test]
    fn test_serialize_table() {
        let rows = RowGroup::new().with_row(
            Row::new()
                .with_cell("name", "dale")
                .with_cell("age", CellValue::MethodMissing),
        );
        let table = Table::new(Arc::new(serde_json::json!({"max_width": 10})), rows);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "config": {"max_width": 10},
                "rows": [{
                    "cells": [
                        {"key": "name", "value": "dale"},
                        {"key": "age", "value": "Method Missing"}
                    ],
                    "children": []
                }]
            })
        );
    }
}
