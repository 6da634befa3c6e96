//! Postal-code address lookup.

use crate::cli::{AddressArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::print_output;

use voltra_core::Workspace;

pub async fn handle(
    workspace: &Workspace,
    args: &AddressArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let addr = workspace.lookup_postal_code(&args.postal_code).await?;

    let rendered = match global.output {
        OutputFormat::Json => serde_json::to_string_pretty(&addr)
            .map_err(|e| CliError::Internal(e.to_string()))?,
        OutputFormat::JsonCompact => {
            serde_json::to_string(&addr).map_err(|e| CliError::Internal(e.to_string()))?
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&addr).map_err(|e| CliError::Internal(e.to_string()))?
        }
        OutputFormat::Table | OutputFormat::Plain => {
            let line = |label: &str, value: &Option<String>| {
                format!("{label:<10} {}", value.as_deref().unwrap_or("-"))
            };
            [
                line("street:", &addr.logradouro),
                line("district:", &addr.bairro),
                line("city:", &addr.cidade),
                line("state:", &addr.estado),
            ]
            .join("\n")
        }
    };

    print_output(&rendered, global.quiet);
    Ok(())
}
