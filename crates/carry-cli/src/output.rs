//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;
use crate::config::AppConfig;

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration.
    pub config: AppConfig,
    /// Output format.
    pub format: OutputFormat,
    /// Suppress headers and status messages.
    pub quiet: bool,
}

impl Context {
    /// Prints a section header in table mode.
    pub fn header(&self, title: &str) {
        if self.format == OutputFormat::Table && !self.quiet {
            print_header(title);
        }
    }

    /// Prints an informational line in table mode.
    pub fn info(&self, message: &str) {
        if self.format == OutputFormat::Table && !self.quiet {
            print_info(message);
        }
    }
}

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints a metric/value report.
///
/// Table and CSV render `rows`; JSON renders `data`; minimal prints
/// `headline` alone.
pub fn print_report<T: Serialize>(
    ctx: &Context,
    title: &str,
    rows: &[KeyValue],
    data: &T,
    headline: &str,
) -> anyhow::Result<()> {
    match ctx.format {
        OutputFormat::Table => {
            ctx.header(title);
            print_table(rows)
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
            Ok(())
        }
        OutputFormat::Csv => print_csv(rows),
        OutputFormat::Minimal => {
            println!("{headline}");
            Ok(())
        }
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints the first row as compact JSON.
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Formats a decimal rate as a percentage string.
pub fn format_percent(rate: f64, precision: usize) -> String {
    format!("{:.precision$}%", rate * 100.0)
}

/// Prints an informational message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a float at fixed precision.
    pub fn from_f64(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self::new(key, format!("{value:.precision$}"))
    }

    /// Creates a key-value pair from a rounded decimal, as stored.
    pub fn from_decimal(key: impl Into<String>, value: Decimal) -> Self {
        Self::new(key, value.to_string())
    }

    /// Creates a key-value pair formatted as a percentage.
    pub fn from_percent(key: impl Into<String>, rate: f64) -> Self {
        Self::new(key, format_percent(rate, 4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_key_value_formatting() {
        assert_eq!(KeyValue::from_f64("Clean", 101.58134714, 6).value, "101.581347");
        assert_eq!(KeyValue::from_percent("Yield", 0.0725450552).value, "7.2545%");

        let bnc = Decimal::from_str("-4.04460481").unwrap();
        assert_eq!(KeyValue::from_decimal("BNC", bnc).value, "-4.04460481");
    }
}
