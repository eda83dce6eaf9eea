//! Output: the row tree produced by a lift.
//!
//! - **Table**: the root [`RowGroup`] plus the caller's config, by identity
//! - **RowGroup**: sibling rows for one association (or the root)
//! - **Row**: ordered cells plus nested row groups
//! - **CellValue**: an extracted value, or the "Method Missing" marker
//!
//! Rendering (column widths, borders, value formatting) is left to the
//! consumer of the table.

pub mod table;

pub use table::{Cell, CellValue, Row, RowGroup, Table};
