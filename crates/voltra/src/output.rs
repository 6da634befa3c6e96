//! Output formatting: table, JSON, YAML, plain.
//!
//! Every list rendering funnels through the core table renderer (columns +
//! row template); this module only dresses the rows up in the format picked
//! by `--output`. Table uses `tabled`, structured formats use serde, plain
//! emits one id per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use voltra_core::{Resource, render_rows};

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a resource list in the chosen format.
///
/// - `table`: an ID column plus the resource's own columns and rows
/// - `json` / `json-compact` / `yaml`: serializes the records via serde
/// - `plain`: one id per line
pub fn render_list<R>(format: &OutputFormat, items: &[R]) -> String
where
    R: Resource + serde::Serialize,
{
    match format {
        OutputFormat::Table => render_table(items),
        OutputFormat::Json => render_json(items, false),
        OutputFormat::JsonCompact => render_json(items, true),
        OutputFormat::Yaml => render_yaml(items),
        OutputFormat::Plain => items
            .iter()
            .map(|r| r.id().to_string())
            .collect::<Vec<_>>()
            .join("\n"),
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

/// Print a short action confirmation ("unit created") to stderr.
pub fn print_feedback(message: &str, quiet: bool, color: bool) {
    if quiet {
        return;
    }
    if color {
        eprintln!("{}", message.green());
    } else {
        eprintln!("{message}");
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Resource>(items: &[R]) -> String {
    if items.is_empty() {
        return "(no records)".into();
    }
    let mut builder = Builder::default();
    let mut header = vec!["ID".to_string()];
    header.extend(R::columns().iter().map(ToString::to_string));
    builder.push_record(header);
    for (item, row) in items.iter().zip(render_rows(items)) {
        let mut cells = vec![item.id().to_string()];
        cells.extend(row);
        builder.push_record(cells);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.unwrap_or_else(|e| format!("serialization failed: {e}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("serialization failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltra_core::{Address, Unit};

    fn unit() -> Unit {
        Unit {
            id: 1,
            name: "Bloco A".into(),
            access_code: "123".into(),
            address: Address {
                postal_code: "12345678".into(),
                number: "10".into(),
                ..Address::default()
            },
        }
    }

    #[test]
    fn table_has_header_and_one_row_per_record() {
        let rendered = render_table(&[unit()]);
        assert!(rendered.contains("Bloco A"));
        assert!(rendered.contains("Access code"));
        assert!(rendered.contains("12345678"));
    }

    #[test]
    fn plain_is_one_id_per_line() {
        let mut second = unit();
        second.id = 2;
        let out = render_list(&OutputFormat::Plain, &[unit(), second]);
        assert_eq!(out, "1\n2");
    }

    #[test]
    fn json_round_trips_through_serde() {
        let out = render_list(&OutputFormat::JsonCompact, &[unit()]);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "Bloco A");
    }
}
