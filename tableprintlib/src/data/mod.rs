//! Input data: the items being lifted.
//!
//! Data items are dynamic [`Value`]s: maps keyed by string or symbolic
//! [`Key`]s, objects implementing [`Record`], lists of either, and scalars.
//! The [`access`] module resolves names and dotted paths against them.

pub mod access;
pub mod record;
pub mod value;

pub use access::{fetch, join_path, resolve_path, METHOD_MISSING, SEPARATOR};
pub use record::{Method, Object, Record};
pub use value::{Key, Value};
