//! # tableprintlib
//!
//! Lift heterogeneous records (maps, objects, nested associations) into a
//! tree of rows and row groups, ready to be rendered as nested text tables.
//!
//! ## Overview
//!
//! You describe the output as a list of columns, each a dotted path such as
//! `name` or `books.title`. The library folds those paths into a traversal
//! plan and walks the data along it:
//!
//! - **Leaf attributes** (`name`) become cells of the current row
//! - **Associations** (`books` in `books.title`) become nested row groups
//!   beneath the row, one row per associated item
//!
//! Missing data never fails a lift. An attribute that cannot be resolved
//! yields a `"Method Missing"` cell; an association that is absent or empty
//! simply adds no nested group.
//!
//! ## Features
//!
//! - **Dynamic items**: maps with string or symbolic keys, objects with
//!   members and methods (via [`Record`]), lists and scalars
//! - **Custom extraction**: take a column's value from another path, or
//!   compute it with a function
//! - **Opaque config**: any config type rides along with the table, shared
//!   by `Arc`, never copied
//! - **Pure data out**: the [`Table`] is plain data, serializable with serde
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tableprintlib::{CellValue, Column, Config, Fingerprinter, Object, Value};
//!
//! let author = Object::new("Author")
//!     .with_field("name", "dale carnegie")
//!     .with_field(
//!         "books",
//!         vec![Value::from(Object::new("Book").with_field("title", "how to win friends"))],
//!     );
//!
//! let columns = vec![Column::new("name"), Column::new("books.title")];
//! let config = Arc::new(Config::new());
//! let table = Fingerprinter::new(Arc::clone(&config), columns)
//!     .lift(&[author.into()])
//!     .unwrap();
//!
//! let row = &table.rows().rows()[0];
//! assert_eq!(row.cell("name"), Some(&CellValue::from("dale carnegie")));
//!
//! let book = &row.children()[0].rows()[0];
//! assert_eq!(book.cell("books.title"), Some(&CellValue::from("how to win friends")));
//!
//! // The table carries the very same config
//! assert!(Arc::ptr_eq(table.config(), &config));
//! ```

pub mod columns;
pub mod config;
pub mod data;
pub mod error;
pub mod fingerprinter;
pub mod output;

pub use columns::{
    build_tree, handleable_keys, passable_keys, path_to_tree, Column, DisplaySource, Extractor,
    PathTree,
};
pub use config::Config;
pub use data::{
    fetch, join_path, resolve_path, Key, Method, Object, Record, Value, METHOD_MISSING, SEPARATOR,
};
pub use error::{ExtractorError, TablePrintError};
pub use fingerprinter::Fingerprinter;
pub use output::{Cell, CellValue, Row, RowGroup, Table};

/// Result type for tableprintlib operations
pub type Result<T> = std::result::Result<T, TablePrintError>;
