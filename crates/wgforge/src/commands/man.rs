//! Man page rendering.

use std::path::Path;

use clap::CommandFactory;

use crate::cli::{Cli, ManArgs};
use crate::error::CliError;

pub fn handle(args: &ManArgs) -> Result<(), CliError> {
    let cmd = Cli::command();
    let Some(dir) = &args.out_dir else {
        clap_mangen::Man::new(cmd).render(&mut std::io::stdout().lock())?;
        return Ok(());
    };

    std::fs::create_dir_all(dir)?;
    let pages = write_pages(&cmd, dir)?;
    tracing::info!(dir = %dir.display(), pages, "wrote man pages");
    Ok(())
}

/// Write `<name>.1` for a command, then recurse as `<name>-<sub>.1`.
fn write_pages(cmd: &clap::Command, dir: &Path) -> Result<usize, CliError> {
    let name = cmd.get_name().to_owned();
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buf)?;
    std::fs::write(dir.join(format!("{name}.1")), buf)?;

    let mut pages = 1;
    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        pages += write_pages(&sub, dir)?;
    }
    Ok(pages)
}
