//! Key command handlers.

use std::io::Read;

use secrecy::ExposeSecret;
use serde::Serialize;
use wgforge_core::OsKeyMaterial;
use wgforge_core::keys::{derive_public_key, generate_key_pair, generate_preshared_key};

use crate::cli::{KeysArgs, KeysCommand};
use crate::commands::Context;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct GeneratedKeys {
    private_key: String,
    public_key: String,
    preshared_key: String,
}

#[derive(Serialize)]
struct DerivedKey {
    public_key: String,
}

pub fn handle(args: KeysArgs, ctx: &Context) -> Result<(), CliError> {
    match args.command {
        KeysCommand::Generate => {
            let source = OsKeyMaterial;
            let pair = generate_key_pair(&source)?;
            let psk = generate_preshared_key(&source)?;
            let keys = GeneratedKeys {
                private_key: pair.private_key.expose_secret().to_owned(),
                public_key: pair.public_key,
                preshared_key: psk.expose_secret().to_owned(),
            };
            let out = output::render_single(
                ctx.format,
                &keys,
                |k| {
                    [
                        output::detail_line("Private Key", &k.private_key, ctx.color),
                        output::detail_line("Public Key", &k.public_key, ctx.color),
                        output::detail_line("Preshared", &k.preshared_key, ctx.color),
                    ]
                    .join("\n")
                },
                |k| format!("{}\n{}\n{}", k.private_key, k.public_key, k.preshared_key),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        KeysCommand::Pubkey => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            let derived = DerivedKey {
                public_key: derive_public_key(&input)?,
            };
            let out = output::render_single(
                ctx.format,
                &derived,
                |d| d.public_key.clone(),
                |d| d.public_key.clone(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}
