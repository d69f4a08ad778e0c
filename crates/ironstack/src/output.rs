//! Output formatting: table, JSON, YAML.
//!
//! Table views are hand-laid detail blocks followed by `tabled` tables;
//! structured formats serialize the underlying report with serde.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a report in the chosen format. `table_fn` builds the table
/// view; the structured formats serialize `data` as is.
pub fn render<T>(
    format: &OutputFormat,
    data: &T,
    table_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(table_fn(data)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Table helpers ────────────────────────────────────────────────────

pub fn table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// `value` or `-` when absent.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

/// Join non-empty sections with a blank line.
pub fn sections(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Sample {
        unit: u32,
    }

    #[test]
    fn structured_formats_serialize_the_data() {
        let data = Sample { unit: 3 };
        let compact = render(&OutputFormat::JsonCompact, &data, |_| String::new()).unwrap();
        assert_eq!(compact, r#"{"unit":3}"#);
        let yaml = render(&OutputFormat::Yaml, &data, |_| String::new()).unwrap();
        assert_eq!(yaml.trim(), "unit: 3");
        let table = render(&OutputFormat::Table, &data, |d| format!("Unit: {}", d.unit)).unwrap();
        assert_eq!(table, "Unit: 3");
    }

    #[test]
    fn empty_sections_are_skipped() {
        assert_eq!(
            sections(&["a".into(), String::new(), "b".into()]),
            "a\n\nb"
        );
        assert_eq!(or_dash(None::<u32>), "-");
        assert_eq!(or_dash(Some(4)), "4");
    }
}
