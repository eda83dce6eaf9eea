//! # tableprint
//!
//! A CLI for lifting nested JSON records into a tree of rows.
//!
//! ## Overview
//!
//! tableprint is built on top of tableprintlib. It reads JSON data items,
//! lifts them against the columns given with `--column`, and prints the
//! resulting row tree either as an indented outline or as JSON.
//!
//! ## Usage
//!
//! ```bash
//! # One row per author, one nested row per book
//! tableprint authors.json -c name -c books.title
//!
//! # Rename a column while reading its value from elsewhere
//! tableprint authors.json -c "Title=title"
//!
//! # Items nested inside the document, read from stdin
//! cat response.json | tableprint --items data.authors -c name
//!
//! # Full row tree (with config) as JSON
//! tableprint authors.json -c name -c books.title --output json
//! ```

mod render;

use std::fs;
use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{debug, info, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use tableprintlib::{resolve_path, Column, Config, Fingerprinter, Value};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("tableprint")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Lift nested JSON records into a tree of rows")
        .arg(
            Arg::new("file")
                .help("JSON file to read (defaults to stdin; '-' also reads stdin)")
                .default_value("-"),
        )
        .arg(
            Arg::new("column")
                .short('c')
                .long("column")
                .action(ArgAction::Append)
                .required(true)
                .help(
                    "Column to print, as a dotted path or NAME=PATH \
                     (can be specified multiple times)",
                ),
        )
        .arg(
            Arg::new("items")
                .long("items")
                .help("Dotted path to the list of items inside the document"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["outline", "json"])
                .default_value("outline")
                .help("Output format"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON file with rendering options"),
        )
        .arg(
            Arg::new("max-width")
                .long("max-width")
                .value_parser(value_parser!(usize))
                .help("Truncate cell values longer than this"),
        )
        .arg(
            Arg::new("separator")
                .long("separator")
                .help("Text placed between cells"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more (-v info, -vv debug, -vvv trace)"),
        )
}

/// Map -v occurrences to a log level
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(matches: &ArgMatches) {
    let level = level_for(matches.get_count("verbose"));
    // A logger may already be installed
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Build the config from --config, then apply flag overrides
fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path))?;
            Config::from_json_str(&text).with_context(|| format!("invalid config '{}'", path))?
        }
        None => Config::new(),
    };

    if let Some(max_width) = matches.get_one::<usize>("max-width") {
        config = config.with_max_width(*max_width);
    }
    if let Some(separator) = matches.get_one::<String>("separator") {
        config = config.with_separator(separator.as_str());
    }
    Ok(config)
}

/// Read the JSON document from a file or stdin
fn read_document(file: &str) -> anyhow::Result<Value> {
    let text = if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        text
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read '{}'", file))?
    };
    Ok(Value::from_json_str(&text)?)
}

/// Pick the items out of the document: a list is the items, null is none,
/// anything else is a single item
fn extract_items(document: Value, items_path: Option<&str>) -> anyhow::Result<Vec<Value>> {
    let source = match items_path {
        Some(path) => resolve_path(&document, path)
            .ok_or_else(|| anyhow!("no value at items path '{}'", path))?,
        None => document,
    };
    Ok(match source {
        Value::List(items) => items,
        Value::Null => Vec::new(),
        item => vec![item],
    })
}

/// Extract columns from matches
fn extract_columns(matches: &ArgMatches) -> Vec<Column> {
    matches
        .get_many::<String>("column")
        .map(|v| v.map(|spec| Column::parse(spec)).collect())
        .unwrap_or_default()
}

fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let config = Arc::new(load_config(matches)?);
    let columns = extract_columns(matches);
    let file = matches
        .get_one::<String>("file")
        .map(|s| s.as_str())
        .unwrap_or("-");

    let document = read_document(file)?;
    let items = extract_items(document, matches.get_one::<String>("items").map(|s| s.as_str()))?;
    info!("read {} items from {}", items.len(), file);

    let fingerprinter = Fingerprinter::new(config, columns);
    let table = fingerprinter.lift(&items)?;
    debug!(
        "lifted {} rows over {} columns, {} levels deep",
        table.row_count(),
        fingerprinter.columns().len(),
        table.depth()
    );

    match matches.get_one::<String>("output").map(|s| s.as_str()) {
        Some("json") => Ok(render::render_json(&table)?),
        _ => Ok(render::render_outline(&table)),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(&matches);

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
