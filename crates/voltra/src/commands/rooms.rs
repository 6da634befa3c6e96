//! Room command handlers.

use voltra_core::{RoomDraft, Workspace};

use crate::cli::{GlobalOpts, RoomsArgs, RoomsCommand};
use crate::error::CliError;
use crate::output::{print_feedback, print_output, render_list, should_color};

use super::util;

pub async fn handle(
    workspace: &Workspace,
    args: RoomsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = should_color(&global.color);

    match args.command {
        RoomsCommand::List => {
            workspace.rooms.load().await?;
            let items = workspace.rooms.items();
            print_output(&render_list(&global.output, &items), global.quiet);
            Ok(())
        }

        RoomsCommand::Add {
            name,
            description,
            unit,
        } => {
            workspace.open_room_editor().await;
            workspace
                .rooms
                .save(RoomDraft {
                    name,
                    description,
                    unit_id: unit,
                })
                .await?;
            print_feedback("room created", global.quiet, color);
            Ok(())
        }

        RoomsCommand::Edit {
            id,
            name,
            description,
            unit,
        } => {
            workspace.rooms.load().await?;
            let current = workspace
                .edit_room(id)
                .await
                .ok_or_else(|| util::not_found("room", id, "rooms list"))?;

            let draft = RoomDraft {
                name: name.unwrap_or(current.name),
                description: description.or(current.description),
                unit_id: unit.or(current.unit_id),
            };
            workspace.rooms.save(draft).await?;
            print_feedback("room updated", global.quiet, color);
            Ok(())
        }

        RoomsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete room {id}?"), global.yes)? {
                return Ok(());
            }
            workspace.rooms.request_delete(id);
            workspace.rooms.confirm_delete().await?;
            print_feedback("room deleted", global.quiet, color);
            Ok(())
        }
    }
}
