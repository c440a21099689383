use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io;

/// Pretty-printed JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// CSV on stdout, with a header row taken from the record's field names.
pub fn write_csv<T: Serialize>(records: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Non-fatal warning on stderr, colored when attached to a terminal.
pub fn warn(message: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{} {}", "Warning:".yellow().bold(), message);
    } else {
        eprintln!("Warning: {}", message);
    }
}

/// Section title above a plain table.
pub fn title(text: &str) {
    if io::stdout().is_terminal() {
        println!("{}", text.bold());
    } else {
        println!("{}", text);
    }
}

/// Seconds with millisecond precision, the way the logs print them.
pub fn seconds(value: f64) -> String {
    format!("{:.3}", value)
}

/// Optional cell rendered with a dash placeholder.
pub fn dash<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}
