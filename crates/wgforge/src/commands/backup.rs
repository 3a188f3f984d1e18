//! Backup command handlers.

use std::path::Path;

use wgforge_config::{export_backup_file, import_backup_file};
use wgforge_core::RestoreOutcome;

use crate::cli::{BackupArgs, BackupCommand};
use crate::commands::Context;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(args: BackupArgs, ctx: &Context) -> Result<(), CliError> {
    match args.command {
        BackupCommand::Export { file, stdout } => {
            let registry = util::load_registry(ctx);
            if stdout {
                output::print_output(&registry.export_all()?, false);
                return Ok(());
            }
            export_backup_file(&registry, &file)?;
            output::status(
                &format!(
                    "Exported {} location(s) to {}",
                    registry.locations().len(),
                    file.display()
                ),
                ctx.color,
                ctx.quiet,
            );
            Ok(())
        }

        BackupCommand::Restore { file, check } => {
            if check {
                let contents = read_backup(&file).await?;
                let locations = import_backup_file(&contents)?;
                output::status(
                    &format!("{} is a valid backup of {} location(s)", file.display(), locations.len()),
                    ctx.color,
                    ctx.quiet,
                );
                return Ok(());
            }

            if !util::confirm(
                &format!("Replace every stored location with the contents of {}?", file.display()),
                "backup restore",
                ctx.yes,
            )? {
                return Ok(());
            }

            // A restore is started from the IP editor and returns to the main view.
            let mut session = util::open_session(ctx);
            session.open_ip_editor()?;
            let ticket = session.begin_restore()?;
            let contents = read_backup(&file).await?;

            match session.finish_restore(ticket, &contents)? {
                RestoreOutcome::Applied { count } => output::status(
                    &format!("Restored {count} location(s) from {}", file.display()),
                    ctx.color,
                    ctx.quiet,
                ),
                RestoreOutcome::Stale => {
                    output::warn("backup read finished after the session moved on; nothing changed", ctx.color);
                }
            }
            Ok(())
        }
    }
}

async fn read_backup(path: &Path) -> Result<String, CliError> {
    let contents = tokio::fs::read_to_string(path).await?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "read backup file");
    Ok(contents)
}
