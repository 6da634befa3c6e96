//! Device command handlers.

use voltra_core::{DeviceDraft, Workspace};

use crate::cli::{DeviceStatus, DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{print_feedback, print_output, render_list, should_color};

use super::util;

pub async fn handle(
    workspace: &Workspace,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = should_color(&global.color);

    match args.command {
        DevicesCommand::List => {
            workspace.devices.load().await?;
            let items = workspace.devices.items();
            print_output(&render_list(&global.output, &items), global.quiet);
            Ok(())
        }

        DevicesCommand::Add {
            name,
            kind,
            power,
            status,
            room,
        } => {
            workspace.open_device_editor().await;
            workspace
                .devices
                .save(DeviceDraft {
                    name,
                    kind,
                    power_watts: power,
                    active: status.is_active(),
                    room_id: room,
                })
                .await?;
            print_feedback("device created", global.quiet, color);
            Ok(())
        }

        DevicesCommand::Edit {
            id,
            name,
            kind,
            power,
            status,
            room,
        } => {
            workspace.devices.load().await?;
            let current = workspace
                .edit_device(id)
                .await
                .ok_or_else(|| util::not_found("device", id, "devices list"))?;

            let draft = DeviceDraft {
                name: name.unwrap_or(current.name),
                kind: kind.unwrap_or(current.kind),
                power_watts: power.unwrap_or(current.power_watts),
                active: status.map_or(current.active, DeviceStatus::is_active),
                room_id: room.or(current.room_id),
            };
            workspace.devices.save(draft).await?;
            print_feedback("device updated", global.quiet, color);
            Ok(())
        }

        DevicesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete device {id}?"), global.yes)? {
                return Ok(());
            }
            workspace.devices.request_delete(id);
            workspace.devices.confirm_delete().await?;
            print_feedback("device deleted", global.quiet, color);
            Ok(())
        }
    }
}
