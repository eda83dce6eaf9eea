//! Attribute resolution against dynamic values.
//!
//! A name is resolved against an item by trying, in order:
//!
//! 1. member access ([`Record::field`](super::Record::field))
//! 2. method invocation ([`Record::call`](super::Record::call))
//! 3. string-key lookup (`Key::Str`)
//! 4. symbolic-key lookup (`Key::Sym`)
//!
//! The first strategy that resolves wins. Scalars, lists and null resolve
//! nothing.

use super::value::{Key, Value};

/// Separator between segments of a dotted path.
pub const SEPARATOR: char = '.';

/// Cell text used when a member, method or key cannot be found.
pub const METHOD_MISSING: &str = "Method Missing";

/// Resolve a single name against an item.
pub fn fetch(item: &Value, name: &str) -> Option<Value> {
    match item {
        Value::Object(record) => record.field(name).or_else(|| record.call(name)),
        Value::Map(map) => map
            .get(&Key::str(name))
            .or_else(|| map.get(&Key::sym(name)))
            .cloned(),
        _ => None,
    }
}

/// Resolve a dotted path against an item, one segment at a time.
///
/// Each segment is resolved against the result of the previous one; the
/// whole chain fails as soon as any segment does.
pub fn resolve_path(item: &Value, path: &str) -> Option<Value> {
    let mut segments = path.split(SEPARATOR);
    let first = segments.next()?;
    let mut current = fetch(item, first)?;
    for segment in segments {
        current = fetch(&current, segment)?;
    }
    Some(current)
}

/// Join a prefix and a key into a dotted path.
pub fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", prefix, SEPARATOR, key)
    }
}
