use std::io::Write;

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::error::Result;
use crate::types::SprintState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Print a table or JSON depending on output mode
pub fn print_table<T, R, F>(
    out: &mut dyn Write,
    format: OutputFormat,
    items: &[T],
    to_row: F,
) -> Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    match format {
        OutputFormat::Json => write_json(out, items),
        OutputFormat::Table => {
            let rows: Vec<R> = items.iter().map(to_row).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            writeln!(out, "{table}")?;
            Ok(())
        }
    }
}

/// Print a single item or JSON depending on output mode
pub fn print_item<T: Serialize>(
    out: &mut dyn Write,
    format: OutputFormat,
    item: &T,
    display: impl FnOnce(&mut dyn Write, &T) -> std::io::Result<()>,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, item),
        OutputFormat::Table => Ok(display(out, item)?),
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    writeln!(out, "{json}")?;
    Ok(())
}

/// Format sprint state with color
pub fn state_colored(state: SprintState) -> String {
    let label = state.to_string();
    match state {
        SprintState::Active => label.green().bold().to_string(),
        SprintState::Future => label.blue().to_string(),
        SprintState::Closed => label.bright_black().to_string(),
    }
}

/// Format an optional timestamp as date only
pub fn format_date_only(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_only() {
        let date: DateTime<Utc> = "2024-06-03T15:00:00.000Z".parse().unwrap();
        assert_eq!(format_date_only(Some(&date)), "2024-06-03");
        assert_eq!(format_date_only(None), "-");
    }

    #[test]
    fn test_state_colored_keeps_label() {
        colored::control::set_override(false);
        assert_eq!(state_colored(SprintState::Active), "active");
        assert_eq!(state_colored(SprintState::Closed), "closed");
    }
}
