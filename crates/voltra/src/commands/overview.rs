//! Dashboard overview: counts plus the weekly consumption series.

use owo_colors::OwoColorize;

use voltra_core::Workspace;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{print_output, should_color};

pub async fn handle(workspace: &Workspace, global: &GlobalOpts) -> Result<(), CliError> {
    workspace.load_all().await?;

    let stats = workspace.overview();
    let series = workspace.energy_series();

    let rendered = match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => {
            let doc = serde_json::json!({
                "units": stats.units,
                "rooms": stats.rooms,
                "devices": stats.devices,
                "energy": series,
            });
            match global.output {
                OutputFormat::Json => serde_json::to_string_pretty(&doc)
                    .map_err(|e| CliError::Internal(e.to_string()))?,
                OutputFormat::JsonCompact => {
                    serde_json::to_string(&doc).map_err(|e| CliError::Internal(e.to_string()))?
                }
                _ => serde_yaml::to_string(&doc).map_err(|e| CliError::Internal(e.to_string()))?,
            }
        }
        OutputFormat::Table | OutputFormat::Plain => {
            render_text(workspace, should_color(&global.color))
        }
    };

    print_output(&rendered, global.quiet);
    Ok(())
}

fn render_text(workspace: &Workspace, color: bool) -> String {
    let stats = workspace.overview();
    let series = workspace.energy_series();

    let device_line = if color {
        format!(
            "devices: {} ({} active, {} inactive)",
            stats.devices.total,
            stats.devices.active.green(),
            stats.devices.inactive.red(),
        )
    } else {
        format!(
            "devices: {} ({} active, {} inactive)",
            stats.devices.total, stats.devices.active, stats.devices.inactive,
        )
    };

    let mut lines = vec![
        format!("units:   {}", stats.units),
        format!("rooms:   {}", stats.rooms),
        device_line,
        String::new(),
        "weekly consumption (kWh)".to_string(),
    ];

    let max = series.max().max(1.0);
    for (label, value) in series.labels.iter().zip(&series.values) {
        // A coarse horizontal bar; the TUI draws the real chart.
        let width = ((value / max) * 32.0).round() as usize;
        lines.push(format!("  {label}  {value:>6.0}  {}", "▇".repeat(width)));
    }
    lines.push(format!(
        "  total {:.0} kWh, daily average {:.1} kWh",
        series.total(),
        series.average()
    ));

    lines.join("\n")
}
