//! Rendering of command results.

use serde::Serialize;
use tabled::{Table, Tabled};
use tabled::settings::Style;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Writes rows as a table or a JSON array.
pub fn print_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table if rows.is_empty() => println!("(none)"),
        OutputFormat::Table => println!("{}", Table::new(rows).with(Style::rounded())),
        OutputFormat::Json => match serde_json::to_string_pretty(rows) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to render JSON: {e}"),
        },
    }
}

/// Reports a completed action on stderr so stdout stays machine-readable.
pub fn print_done(msg: &str) {
    eprintln!("✓ {msg}");
}
