//! Unit command handlers.

use voltra_core::{UnitDraft, Workspace};

use crate::cli::{GlobalOpts, UnitsArgs, UnitsCommand};
use crate::error::CliError;
use crate::output::{print_feedback, print_output, render_list, should_color};

use super::util;

pub async fn handle(
    workspace: &Workspace,
    args: UnitsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = should_color(&global.color);

    match args.command {
        UnitsCommand::List => {
            workspace.units.load().await?;
            let items = workspace.units.items();
            print_output(&render_list(&global.output, &items), global.quiet);
            Ok(())
        }

        UnitsCommand::Add {
            name,
            code,
            cep,
            number,
            no_lookup,
        } => {
            // Echo the resolved address so typos in the postal code are
            // visible before the record lands. Lookup failures are not
            // fatal -- the address can be fixed later.
            if !no_lookup {
                match workspace.lookup_postal_code(&cep).await {
                    Ok(addr) => {
                        let street = addr.logradouro.as_deref().unwrap_or("-");
                        let city = addr.cidade.as_deref().unwrap_or("-");
                        print_feedback(
                            &format!("address: {street}, {city}"),
                            global.quiet,
                            color,
                        );
                    }
                    Err(e) => tracing::warn!(error = %e, "address lookup failed"),
                }
            }

            workspace.units.open_create();
            workspace
                .units
                .save(UnitDraft {
                    name,
                    access_code: code,
                    postal_code: cep,
                    number,
                })
                .await?;
            print_feedback("unit created", global.quiet, color);
            Ok(())
        }

        UnitsCommand::Edit {
            id,
            name,
            code,
            cep,
            number,
        } => {
            workspace.units.load().await?;
            let current = workspace
                .units
                .open_edit(id)
                .ok_or_else(|| util::not_found("unit", id, "units list"))?;

            let draft = UnitDraft {
                name: name.unwrap_or(current.name),
                access_code: code.unwrap_or(current.access_code),
                postal_code: cep.unwrap_or(current.address.postal_code),
                number: number.unwrap_or(current.address.number),
            };
            workspace.units.save(draft).await?;
            print_feedback("unit updated", global.quiet, color);
            Ok(())
        }

        UnitsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete unit {id}?"), global.yes)? {
                return Ok(());
            }
            workspace.units.request_delete(id);
            workspace.units.confirm_delete().await?;
            print_feedback("unit deleted", global.quiet, color);
            Ok(())
        }
    }
}
