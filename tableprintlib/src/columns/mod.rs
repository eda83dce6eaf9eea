//! Columns and the traversal plan built from them.
//!
//! - **Column**: a dotted name plus an optional [`DisplaySource`]
//! - **PathTree**: column paths grouped by shared prefixes, with
//!   [`handleable_keys`] / [`passable_keys`] splitting each node into
//!   attributes read here and associations to descend into

pub mod column;
pub mod tree;

pub use column::{Column, DisplaySource, Extractor};
pub use tree::{build_tree, handleable_keys, passable_keys, path_to_tree, PathTree};
