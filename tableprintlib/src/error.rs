//! Error types for tableprintlib

use thiserror::Error;

/// Boxed error returned by a caller-supplied display function.
pub type ExtractorError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while lifting data into a table.
///
/// A missing member, method or key is *not* an error: it shows up as
/// [`CellValue::MethodMissing`](crate::CellValue::MethodMissing) in the cell.
#[derive(Error, Debug)]
pub enum TablePrintError {
    /// A display function attached to a column failed
    #[error("display function for column '{column}' failed: {source}")]
    Extractor {
        column: String,
        source: ExtractorError,
    },

    /// Input text was not valid JSON
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}
