//! Lifting data items into a row tree.
//!
//! The fingerprinter folds every column's governing path into one
//! [`PathTree`], then walks the data items against it level by level:
//!
//! - leaf keys at a node become cells of the current row
//! - inner keys name associations; each one is fetched from the item and
//!   lifted into a child [`RowGroup`] under the row, one level deeper
//!
//! An association that is null, absent or an empty list produces no rows,
//! and no child group is attached for it. Columns whose display path runs
//! through a null or absent association still get a cell on the containing
//! row, holding the "Method Missing" marker.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace};

use crate::columns::{
    build_tree, handleable_keys, passable_keys, Column, DisplaySource, PathTree,
};
use crate::config::Config;
use crate::data::{fetch, join_path, Value, SEPARATOR};
use crate::error::TablePrintError;
use crate::output::{CellValue, Row, RowGroup, Table};
use crate::Result;

/// Turns data items into a [`Table`] for a fixed set of columns.
///
/// The config is opaque here; it is only attached to the produced table.
#[derive(Debug)]
pub struct Fingerprinter<C = Config> {
    config: Arc<C>,
    columns: Vec<Column>,
    /// Governing path -> index into `columns`. Later columns win.
    by_path: HashMap<String, usize>,
}

impl<C> Fingerprinter<C> {
    /// Create a fingerprinter for the given columns.
    pub fn new(config: Arc<C>, columns: Vec<Column>) -> Self {
        let by_path = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| (column.governing_path().to_string(), idx))
            .collect();
        Self {
            config,
            columns,
            by_path,
        }
    }

    /// The configured columns, in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The config attached to every lifted table.
    pub fn config(&self) -> &Arc<C> {
        &self.config
    }

    /// The traversal plan for the configured columns.
    pub fn path_tree(&self) -> PathTree {
        build_tree(self.columns.iter().map(Column::governing_path))
    }

    /// Lift data items into a table.
    ///
    /// Missing members or keys never fail the lift; they become
    /// [`CellValue::MethodMissing`]. A failing display function aborts it.
    pub fn lift(&self, items: &[Value]) -> Result<Table<C>> {
        let tree = self.path_tree();
        debug!(
            "lifting {} items over {} columns ({} levels)",
            items.len(),
            self.columns.len(),
            tree.depth()
        );

        let rows = self.rows_for_items("", &tree, items)?;
        Ok(Table::new(Arc::clone(&self.config), RowGroup::from(rows)))
    }

    /// Build one row per item in `source`.
    ///
    /// A list is iterated as-is, null means no items, and anything else is
    /// a single item.
    pub fn rows_for(&self, prefix: &str, node: &PathTree, source: &Value) -> Result<Vec<Row>> {
        match source {
            Value::List(items) => self.rows_for_items(prefix, node, items),
            Value::Null => Ok(Vec::new()),
            item => self.rows_for_items(prefix, node, std::slice::from_ref(item)),
        }
    }

    fn rows_for_items(&self, prefix: &str, node: &PathTree, items: &[Value]) -> Result<Vec<Row>> {
        let passable = passable_keys(node);
        items
            .iter()
            .map(|item| -> Result<Row> {
                let mut row = self.populate_row(prefix, node, item)?;
                for key in &passable {
                    let subtree = match node.get(key) {
                        Some(subtree) => subtree,
                        None => continue,
                    };
                    let path = join_path(prefix, key);
                    let association = fetch(item, key).unwrap_or_default();
                    if association.is_null() {
                        row = self.mark_unresolved(row, &path);
                        continue;
                    }
                    if let Some(group) = self.group_for(&path, subtree, &association)? {
                        row = row.with_child(group);
                    }
                }
                Ok(row)
            })
            .collect()
    }

    /// Add a "Method Missing" cell for every display-path column that runs
    /// through the unresolved association at `path`.
    fn mark_unresolved(&self, row: Row, path: &str) -> Row {
        let under = format!("{}{}", path, SEPARATOR);
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| matches!(column.display, Some(DisplaySource::Path(_))))
            .filter(|(_, column)| column.governing_path().starts_with(&under))
            .filter(|(idx, column)| self.by_path.get(column.governing_path()) == Some(idx))
            .fold(row, |row, (_, column)| {
                trace!(
                    "'{}' unresolved at '{}' for column '{}'",
                    column.governing_path(),
                    path,
                    column.name
                );
                row.with_cell(column.name.clone(), CellValue::MethodMissing)
            })
    }

    /// Fill a row with the cells for the leaf keys of `node`.
    ///
    /// The cell key is the name of the column whose governing path is
    /// `prefix.key` (or the path itself when no column claims it).
    pub fn populate_row(&self, prefix: &str, node: &PathTree, item: &Value) -> Result<Row> {
        let mut row = Row::new();
        for key in handleable_keys(node) {
            let path = join_path(prefix, key);
            let column = self.column_for(&path);
            let cell_key = column.map_or_else(|| path.clone(), |c| c.name.clone());

            let value = match column.and_then(|c| c.display.as_ref()) {
                Some(DisplaySource::Func(func)) => {
                    let value = func(item).map_err(|source| TablePrintError::Extractor {
                        column: cell_key.clone(),
                        source,
                    })?;
                    CellValue::Value(value)
                }
                _ => self.extract(item, key),
            };
            row = row.with_cell(cell_key, value);
        }
        Ok(row)
    }

    /// Lift the association `key` of `item` into a child group.
    ///
    /// Returns `None` when the association yields no rows.
    pub fn child_group(
        &self,
        prefix: &str,
        key: &str,
        subtree: &PathTree,
        item: &Value,
    ) -> Result<Option<RowGroup>> {
        let association = fetch(item, key).unwrap_or_default();
        self.group_for(&join_path(prefix, key), subtree, &association)
    }

    fn group_for(
        &self,
        path: &str,
        subtree: &PathTree,
        association: &Value,
    ) -> Result<Option<RowGroup>> {
        let rows = self.rows_for(path, subtree, association)?;
        if rows.is_empty() {
            trace!("association '{}' produced no rows, omitting group", path);
            return Ok(None);
        }
        Ok(Some(RowGroup::from(rows)))
    }

    fn column_for(&self, path: &str) -> Option<&Column> {
        self.by_path.get(path).map(|&idx| &self.columns[idx])
    }

    fn extract(&self, item: &Value, key: &str) -> CellValue {
        match fetch(item, key) {
            Some(value) => CellValue::Value(value),
            None => {
                trace!("no member, method or key '{}' on {}", key, item.type_name());
                CellValue::MethodMissing
            }
        }
    }
}
