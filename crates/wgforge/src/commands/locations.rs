//! Location command handlers.

use tabled::Tabled;
use wgforge_core::{CoreError, ServerLocation};

use crate::cli::{LocationsArgs, LocationsCommand};
use crate::commands::Context;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LocationRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Port")]
    port: u16,
    #[tabled(rename = "IPs")]
    ips: String,
    #[tabled(rename = "Public Key")]
    public_key: String,
}

impl From<&ServerLocation> for LocationRow {
    fn from(l: &ServerLocation) -> Self {
        Self {
            name: l.name.clone(),
            country: l.country_code.clone(),
            port: l.port,
            ips: if l.ips.is_empty() {
                "(manual)".into()
            } else {
                l.ips.join(", ")
            },
            public_key: l.server_public_key.clone(),
        }
    }
}

fn detail(l: &ServerLocation, color: bool) -> String {
    let ips = if l.ips.is_empty() {
        "(none, endpoint must be entered manually)".to_owned()
    } else {
        l.ips.join("\n             ")
    };
    [
        output::detail_line("Name", &l.name, color),
        output::detail_line("Country", &l.country_code, color),
        output::detail_line("Port", &l.port.to_string(), color),
        output::detail_line("Public Key", &l.server_public_key, color),
        output::detail_line("IPs", &ips, color),
    ]
    .join("\n")
}

fn not_found(name: &str) -> CliError {
    CoreError::LocationNotFound { name: name.into() }.into()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: LocationsArgs, ctx: &Context) -> Result<(), CliError> {
    match args.command {
        LocationsCommand::List => {
            let registry = util::load_registry(ctx);
            let out = output::render_list(
                ctx.format,
                registry.locations(),
                |l| LocationRow::from(l),
                |l| l.name.clone(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        LocationsCommand::Show { name } => {
            let registry = util::load_registry(ctx);
            let location = registry.get(&name).ok_or_else(|| not_found(&name))?;
            let out = output::render_single(
                ctx.format,
                location,
                |l| detail(l, ctx.color),
                |l| l.ips.join("\n"),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        LocationsCommand::SetIps { name, ips } => {
            let mut registry = util::load_registry(ctx);
            let updated = registry.update_ip_pool(&name, &ips)?;
            output::status(
                &format!("{} now has {} IP(s)", updated.name, updated.ips.len()),
                ctx.color,
                ctx.quiet,
            );
            Ok(())
        }

        LocationsCommand::Edit { name } => {
            let mut session = util::open_session(ctx);
            session.select_location(&name)?;
            let draft = session.open_ip_editor()?.to_owned();

            let edited = dialoguer::Editor::new()
                .extension(".txt")
                .edit(&draft)
                .map_err(|e| CliError::Editor {
                    reason: e.to_string(),
                })?;

            match edited {
                Some(text) => {
                    session.set_draft(text)?;
                    let saved = session.save_ip_editor()?;
                    output::status(
                        &format!("{} now has {} IP(s)", saved.name, saved.ips.len()),
                        ctx.color,
                        ctx.quiet,
                    );
                }
                None => {
                    session.cancel_ip_editor()?;
                    output::status("Editor closed without saving; nothing changed", ctx.color, ctx.quiet);
                }
            }
            Ok(())
        }
    }
}
