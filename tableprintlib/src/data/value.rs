//! Dynamic values for the data items being lifted.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::record::Record;
use crate::error::TablePrintError;

/// A key in a [`Value::Map`].
///
/// The same logical field can be stored under a string key or a symbolic
/// key. Attribute resolution tries both, so callers never need to know which
/// one a given map uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A plain string key (what JSON objects produce)
    Str(String),
    /// A symbolic / enumerated key
    Sym(String),
}

impl Key {
    /// Create a string key
    pub fn str(name: impl Into<String>) -> Self {
        Key::Str(name.into())
    }

    /// Create a symbolic key
    pub fn sym(name: impl Into<String>) -> Self {
        Key::Sym(name.into())
    }

    /// The bare name, whichever flavour of key this is
    pub fn name(&self) -> &str {
        match self {
            Key::Str(name) | Key::Sym(name) => name,
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Str(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Str(name)
    }
}

/// A dynamic value: a scalar, a collection, or an object exposing members.
///
/// Data items handed to the fingerprinter are `Value`s. Nested associations
/// are just values reachable from an item: a `List` of items, a single
/// `Map`/`Object`, or `Null` when the association is absent.
///
/// # Example
///
/// ```
/// use tableprintlib::{Key, Value};
///
/// let author = Value::map([
///     (Key::str("name"), Value::from("dale carnegie")),
///     (Key::sym("born"), Value::from(1888)),
/// ]);
/// assert!(matches!(author, Value::Map(_)));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Null / absent value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Str(String),
    /// Ordered sequence of values
    List(Vec<Value>),
    /// Key/value map, keyed by string or symbolic keys
    Map(HashMap<Key, Value>),
    /// An object with named members and methods
    Object(Arc<dyn Record>),
}

impl Value {
    /// Build a map value from key/value pairs.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a list value.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Parse JSON text into a value.
    pub fn from_json_str(text: &str) -> Result<Self, TablePrintError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Value::from(json))
    }

    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(record) => record.type_name(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Objects have identity, not structure
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Map entries sorted by key name, for stable display and serialization.
fn sorted_entries(map: &HashMap<Key, Value>) -> Vec<(&Key, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.name().cmp(b.name()));
    entries
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in sorted_entries(map).into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key.name(), value)?;
                }
                f.write_str("}")
            }
            Value::Object(record) => write!(f, "#<{}>", record.type_name()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in sorted_entries(map) {
                    out.serialize_entry(key.name(), value)?;
                }
                out.end()
            }
            Value::Object(record) => {
                serializer.serialize_str(&format!("#<{}>", record.type_name()))
            }
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Key::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Object;

    #[test]
    fn test_from_json_object_uses_string_keys() {
        let value = Value::from_json_str(r#"{"title": "foobar", "pages": 12}"#).unwrap();
        match value {
            Value::Map(map) => {
                assert_eq!(map.get(&Key::str("title")), Some(&Value::from("foobar")));
                assert_eq!(map.get(&Key::str("pages")), Some(&Value::Int(12)));
                assert!(map.get(&Key::sym("title")).is_none());
            }
            other => panic!("expected a map, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from_json_str("3").unwrap(), Value::Int(3));
        assert_eq!(Value::from_json_str("2.5").unwrap(), Value::Float(2.5));
        assert_eq!(Value::from_json_str("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        let err = Value::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, TablePrintError::Json(_)));
    }

    #[test]
    fn test_objects_compare_by_identity() {
        let a = Value::from(Object::new("Book").with_field("title", "x"));
        let b = Value::from(Object::new("Book").with_field("title", "x"));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::list([1, 2]).to_string(), "[1, 2]");
        assert_eq!(
            Value::map([(Key::sym("b"), 2), (Key::str("a"), 1)]).to_string(),
            "{a: 1, b: 2}"
        );
        assert_eq!(Value::from(Object::new("Author")).to_string(), "#<Author>");
    }

    #[test]
    fn test_serialize() {
        let value = Value::map([
            (Key::str("title"), Value::from("x")),
            (Key::sym("tags"), Value::list(["a", "b"])),
            (Key::str("missing"), Value::Null),
        ]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "x", "tags": ["a", "b"], "missing": null})
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
