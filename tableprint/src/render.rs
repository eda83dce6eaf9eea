//! Text output for lifted tables.
//!
//! The outline is a debugging view of the row tree: one line per row,
//! nested groups indented beneath their row. It does not align columns.

use console::style;
use tableprintlib::{Config, RowGroup, Table};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Indentation per nesting level
const INDENT: &str = "  ";

/// Printed when the root group has no rows
const NO_DATA: &str = "No data.";

/// Width of a character: terminal columns when `multibyte`, else one.
fn char_width(c: char, multibyte: bool) -> usize {
    if multibyte {
        c.width().unwrap_or(0)
    } else {
        1
    }
}

fn text_width(text: &str, multibyte: bool) -> usize {
    if multibyte {
        text.width()
    } else {
        text.chars().count()
    }
}

/// Longest prefix of `text` that fits in `max_width`.
fn take_width(text: &str, max_width: usize, multibyte: bool) -> String {
    let mut width = 0;
    text.chars()
        .take_while(|&c| {
            width += char_width(c, multibyte);
            width <= max_width
        })
        .collect()
}

/// Truncate text to `max_width`, marking the cut with "...".
///
/// With `multibyte` set, width is measured in terminal columns, so wide
/// characters count double.
fn truncate_value(text: &str, max_width: usize, multibyte: bool) -> String {
    if text_width(text, multibyte) <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return take_width(text, max_width, multibyte);
    }
    format!("{}...", take_width(text, max_width - 3, multibyte))
}

fn header(key: &str, config: &Config) -> String {
    if config.capitalize_headers {
        key.to_uppercase()
    } else {
        key.to_string()
    }
}

fn render_group(group: &RowGroup, config: &Config, depth: usize, out: &mut String) {
    let separator = format!(" {} ", config.separator);
    for row in group.rows() {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .map(|cell| {
                let text = cell.value.to_string();
                let value = truncate_value(&text, config.max_width, config.multibyte);
                format!("{}: {}", style(header(&cell.key, config)).bold(), value)
            })
            .collect();

        out.push_str(&INDENT.repeat(depth));
        out.push_str(&cells.join(&separator));
        out.push('\n');

        for child in row.children() {
            render_group(child, config, depth + 1, out);
        }
    }
}

/// Render a table as an indented outline.
pub fn render_outline(table: &Table) -> String {
    if table.rows().is_empty() {
        return format!("{}\n", NO_DATA);
    }
    let mut out = String::new();
    render_group(table.rows(), table.config(), 0, &mut out);
    out
}

/// Render a table (rows and config) as pretty JSON.
pub fn render_json(table: &Table) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(table)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tableprintlib::{CellValue, Row};

    fn table(config: Config) -> Table {
        let title = "how to win friends and influence people";
        let books = RowGroup::new().with_row(Row::new().with_cell("books.title", title));
        let rows = RowGroup::new().with_row(
            Row::new()
                .with_cell("name", "dale")
                .with_cell("age", CellValue::MethodMissing)
                .with_child(books),
        );
        Table::new(Arc::new(config), rows)
    }

    #[test]
    fn test_truncate_value() {
        assert_eq!(truncate_value("short", 10, false), "short");
        assert_eq!(truncate_value("exactly10!", 10, false), "exactly10!");
        assert_eq!(truncate_value("a bit too long", 10, false), "a bit t...");
        assert_eq!(truncate_value("abcdef", 2, false), "ab");
        assert_eq!(truncate_value("ééééé", 4, false), "é...");
    }

    #[test]
    fn test_truncate_value_multibyte_counts_display_width() {
        // Each of these takes two terminal columns.
        let wide = "日本語の本";
        assert_eq!(truncate_value(wide, 5, false), wide);
        assert_eq!(truncate_value(wide, 5, true), "日...");
        assert_eq!(truncate_value(wide, 10, true), wide);
        assert_eq!(truncate_value(wide, 3, true), "日");
        assert_eq!(truncate_value("plain text", 7, true), "plai...");
    }

    #[test]
    fn test_outline_honours_multibyte() {
        console::set_colors_enabled(false);
        let rows = RowGroup::new().with_row(Row::new().with_cell("title", "日本語の本"));
        let config = Config::new()
            .with_capitalize_headers(false)
            .with_max_width(6)
            .with_multibyte(true);
        let out = render_outline(&Table::new(Arc::new(config), rows));
        assert_eq!(out, "title: 日...\n");
    }

    #[test]
    fn test_outline_nests_children() {
        console::set_colors_enabled(false);
        let config = Config::new().with_capitalize_headers(false).with_max_width(20);
        let out = render_outline(&table(config));
        assert_eq!(
            out,
            "name: dale | age: Method Missing\n  books.title: how to win friend...\n"
        );
    }

    #[test]
    fn test_outline_capitalizes_and_uses_separator() {
        console::set_colors_enabled(false);
        let config = Config::new().with_separator(";").with_max_width(100);
        let out = render_outline(&table(config));
        assert!(out.starts_with("NAME: dale ; AGE: Method Missing\n"));
        assert!(out.contains("  BOOKS.TITLE: how to win friends and influence people\n"));
    }

    #[test]
    fn test_outline_empty_table() {
        let empty = Table::new(Arc::new(Config::new()), RowGroup::new());
        assert_eq!(render_outline(&empty), "No data.\n");
    }

    #[test]
    fn test_json_includes_config() {
        let json = render_json(&table(Config::new().with_max_width(7))).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["config"]["max_width"], 7);
        assert_eq!(parsed["rows"][0]["cells"][1]["value"], "Method Missing");
        assert_eq!(
            parsed["rows"][0]["children"][0][0]["cells"][0]["key"],
            "books.title"
        );
    }
}
