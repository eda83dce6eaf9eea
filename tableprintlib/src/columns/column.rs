//! Column specifications.

use std::fmt;
use std::sync::Arc;

use crate::data::Value;
use crate::error::ExtractorError;

/// A caller-supplied display function: current-level item in, cell value out.
pub type Extractor = Arc<dyn Fn(&Value) -> Result<Value, ExtractorError> + Send + Sync>;

/// Where a column's value comes from, when not from its own name.
#[derive(Clone)]
pub enum DisplaySource {
    /// A dotted path, placed in the traversal plan instead of the column name
    Path(String),
    /// A function called with the item; its result is used verbatim
    Func(Extractor),
}

impl fmt::Debug for DisplaySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplaySource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            DisplaySource::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// One column of the output: a dotted name plus an optional display source.
///
/// The name is always the cell key. The display source only changes how the
/// value is obtained.
///
/// # Example
///
/// ```
/// use tableprintlib::{Column, Value};
///
/// let plain = Column::new("books.title");
/// let renamed = Column::new("name of work").display_path("title");
/// let computed = Column::new("name").display_fn(|item| match item {
///     Value::Map(_) => Value::from("a map"),
///     _ => Value::Null,
/// });
///
/// assert_eq!(plain.governing_path(), "books.title");
/// assert_eq!(renamed.governing_path(), "title");
/// assert_eq!(computed.governing_path(), "name");
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    /// Dotted name; the cell key for this column
    pub name: String,
    /// Optional custom source for the value
    pub display: Option<DisplaySource>,
}

impl Column {
    /// Create a plain column, extracted by its own name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display: None,
        }
    }

    /// Builder: extract the value from a dotted path instead of the name
    pub fn display_path(mut self, path: impl Into<String>) -> Self {
        self.display = Some(DisplaySource::Path(path.into()));
        self
    }

    /// Builder: compute the value with an infallible function
    pub fn display_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.display = Some(DisplaySource::Func(Arc::new(move |item| Ok(f(item)))));
        self
    }

    /// Builder: compute the value with a function that may fail.
    ///
    /// A failure aborts the whole lift.
    pub fn try_display_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, ExtractorError> + Send + Sync + 'static,
    {
        self.display = Some(DisplaySource::Func(Arc::new(f)));
        self
    }

    /// Parse a command-line column spec.
    ///
    /// `"books.title"` is a plain column; `"Title=books.title"` names the
    /// column `Title` and takes its value from `books.title`.
    pub fn parse(spec: &str) -> Self {
        match spec.split_once('=') {
            Some((name, path)) => Column::new(name).display_path(path),
            None => Column::new(spec),
        }
    }

    /// The path that places this column in the traversal plan: the display
    /// path if there is one, otherwise the name.
    pub fn governing_path(&self) -> &str {
        match &self.display {
            Some(DisplaySource::Path(path)) => path,
            _ => &self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let column = Column::parse("books.title");
        assert_eq!(column.name, "books.title");
        assert!(column.display.is_none());
    }

    #[test]
    fn test_parse_with_display_path() {
        let column = Column::parse("name of work=title");
        assert_eq!(column.name, "name of work");
        assert_eq!(column.governing_path(), "title");
        assert!(matches!(column.display, Some(DisplaySource::Path(ref p)) if p == "title"));
    }

    #[test]
    fn test_parse_empty_name_is_accepted() {
        let column = Column::parse("");
        assert_eq!(column.name, "");
        assert_eq!(column.governing_path(), "");
    }

    #[test]
    fn test_computed_column_keeps_name_as_governing_path() {
        let column = Column::new("name").display_fn(|_| Value::Null);
        assert!(matches!(column.display, Some(DisplaySource::Func(_))));
        assert_eq!(column.governing_path(), "name");
        assert_eq!(format!("{:?}", column.display), "Some(Func(..))");
    }

    #[test]
    fn test_try_display_fn_passes_errors_through() {
        let column = Column::new("name").try_display_fn(|_| Err("boom".into()));
        match column.display {
            Some(DisplaySource::Func(f)) => {
                let err = f(&Value::Null).unwrap_err();
                assert_eq!(err.to_string(), "boom");
            }
            other => panic!("expected a function, got {:?}", other),
        }
    }
}
