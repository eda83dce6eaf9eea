//! Objects exposing named members and methods.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::value::Value;

/// An object that exposes named members and zero-argument methods.
///
/// Implement this for your own types to lift them without first converting
/// them to maps. Returning `None` means "no such member" (or method), which
/// lets attribute resolution fall through to the next strategy.
///
/// ```
/// use tableprintlib::{Record, Value};
///
/// #[derive(Debug)]
/// struct Book {
///     title: String,
/// }
///
/// impl Record for Book {
///     fn type_name(&self) -> &str {
///         "Book"
///     }
///
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "title" => Some(Value::from(self.title.as_str())),
///             _ => None,
///         }
///     }
///
///     fn call(&self, name: &str) -> Option<Value> {
///         match name {
///             "shouty_title" => Some(Value::from(self.title.to_uppercase())),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record: fmt::Debug + Send + Sync {
    /// Name shown when the object itself ends up in a cell
    fn type_name(&self) -> &str {
        "object"
    }

    /// Named member / property access
    fn field(&self, name: &str) -> Option<Value>;

    /// Zero-argument method invocation by name
    fn call(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// A computed member of an [`Object`].
pub type Method = Arc<dyn Fn(&Object) -> Value + Send + Sync>;

/// An open record: named fields plus named methods computed from the object.
///
/// Handy for ad-hoc data and for tests, where declaring a struct and a
/// [`Record`] impl would be noise.
///
/// # Example
///
/// ```
/// use tableprintlib::{Object, Record, Value};
///
/// let author = Object::new("Author")
///     .with_field("first", "dale")
///     .with_field("last", "carnegie")
///     .with_method("full_name", |o| {
///         let first = o.field("first").unwrap_or_default();
///         let last = o.field("last").unwrap_or_default();
///         Value::from(format!("{} {}", first, last))
///     });
///
/// assert_eq!(author.call("full_name"), Some(Value::from("dale carnegie")));
/// ```
#[derive(Clone, Default)]
pub struct Object {
    type_name: String,
    fields: HashMap<String, Value>,
    methods: HashMap<String, Method>,
}

impl Object {
    /// Creates an empty object with the given type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Builder: set a field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Builder: add a method
    pub fn with_method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Object) -> Value + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&String> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("Object")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("methods", &methods)
            .finish()
    }
}

impl Record for Object {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn call(&self, name: &str) -> Option<Value> {
        self.methods.get(name).map(|method| method(self))
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(Arc::new(object))
    }
}
