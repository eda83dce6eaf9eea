//! Renderer configuration carried alongside a lifted table.
//!
//! The fingerprinter never looks inside the config. It only hands the same
//! `Arc` to the [`Table`](crate::Table), so renderers (and anything else
//! holding the `Arc`) see one shared instance. Any type can stand in for
//! `Config`; this one covers what the bundled CLI needs.

use serde::{Deserialize, Serialize};

/// Presentation options for rendering a lifted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Widest a cell may get before it is truncated
    pub max_width: usize,
    /// Whether column headers are capitalized
    pub capitalize_headers: bool,
    /// Text placed between cells
    pub separator: String,
    /// Measure cell width in terminal columns, so wide characters count double
    pub multibyte: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_width: 30,
            capitalize_headers: true,
            separator: "|".to_string(),
            multibyte: false,
        }
    }
}

impl Config {
    /// Create a config with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON text; missing fields take their defaults.
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builder: set max cell width
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Builder: set header capitalization
    pub fn with_capitalize_headers(mut self, capitalize: bool) -> Self {
        self.capitalize_headers = capitalize;
        self
    }

    /// Builder: set cell separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Builder: measure cell width in terminal columns
    pub fn with_multibyte(mut self, multibyte: bool) -> Self {
        self.multibyte = multibyte;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.max_width, 30);
        assert_eq!(config.separator, "|");
        assert!(config.capitalize_headers);
        assert!(!config.multibyte);
    }

    #[test]
    fn test_builders() {
        let config = Config::new()
            .with_max_width(12)
            .with_separator(" / ")
            .with_capitalize_headers(false)
            .with_multibyte(true);
        assert_eq!(config.max_width, 12);
        assert_eq!(config.separator, " / ");
        assert!(!config.capitalize_headers);
        assert!(config.multibyte);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = Config::from_json_str(r#"{"max_width": 8}"#).unwrap();
        assert_eq!(config, Config::new().with_max_width(8));
    }

    #[test]
    fn test_invalid_json() {
        assert!(Config::from_json_str(r#"{"max_width": "wide"}"#).is_err());
    }
}
