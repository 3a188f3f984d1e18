//! Command handlers and dispatch.

pub mod backup;
pub mod config_cmd;
pub mod generate;
pub mod keys;
pub mod locations;
pub mod man;
pub mod presets;
pub mod util;

use std::path::PathBuf;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

/// Everything a handler needs, resolved once from flags, env, and config.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub store_path: PathBuf,
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl Context {
    pub fn resolve(global: &GlobalOpts) -> Self {
        let config = config::load(global);
        Self {
            store_path: config::store_path(global, &config),
            format: config::output_format(global, &config),
            color: output::should_color(config::color_mode(global, &config)),
            quiet: global.quiet,
            yes: global.yes,
            config,
        }
    }
}

/// Route a command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Context) -> Result<(), CliError> {
    match cmd {
        Command::Locations(args) => locations::handle(args, ctx),
        Command::Generate(args) => generate::handle(*args, ctx),
        Command::Keys(args) => keys::handle(args, ctx),
        Command::Backup(args) => backup::handle(args, ctx).await,
        Command::Dns(args) => presets::handle_dns(args, ctx),
        Command::Addresses(args) => presets::handle_addresses(args, ctx),
        // Handled before a context exists
        Command::Config(_) | Command::Completions(_) | Command::Man(_) => Ok(()),
    }
}
