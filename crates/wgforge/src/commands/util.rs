//! Shared helpers for command handlers.

use wgforge_core::{Controller, LocationRegistry};

use crate::commands::Context;
use crate::config::FileStore;
use crate::error::CliError;

/// Load the location catalog from the store in effect.
pub fn load_registry(ctx: &Context) -> LocationRegistry<FileStore> {
    LocationRegistry::load(FileStore::new(&ctx.store_path))
}

/// Start a session over the stored catalog, seeded from the config.
///
/// The configured default location is selected when it exists; otherwise
/// the session stays on the first location with a warning.
pub fn open_session(ctx: &Context) -> Controller<FileStore> {
    let mut session = Controller::new(load_registry(ctx), &ctx.config.tunnel);
    session.set_config_name(ctx.config.config_name.clone());
    if let Some(name) = ctx.config.default_location.as_deref() {
        if let Err(e) = session.select_location(name) {
            tracing::warn!(location = name, error = %e, "configured default location unavailable");
        }
    }
    session
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|_| CliError::NonInteractiveRequiresYes {
            action: action.into(),
        })
}
