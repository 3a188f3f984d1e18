//! DNS and interface address preset listings.

use serde::Serialize;
use tabled::Tabled;
use wgforge_core::catalog::{DNS_PRESETS, IPV4_ADDRESS_PRESETS, IPV6_ADDRESS_PRESETS};

use crate::cli::{AddressesArgs, AddressesCommand, DnsArgs, DnsCommand};
use crate::commands::Context;
use crate::error::CliError;
use crate::output;

#[derive(Clone, Copy, Serialize, Tabled)]
struct DnsPreset {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Servers")]
    servers: &'static str,
}

#[derive(Clone, Copy, Serialize, Tabled)]
struct AddressPreset {
    #[tabled(rename = "Family")]
    family: &'static str,
    #[tabled(rename = "Address")]
    address: &'static str,
}

pub fn handle_dns(args: DnsArgs, ctx: &Context) -> Result<(), CliError> {
    match args.command {
        DnsCommand::Presets => {
            let presets: Vec<DnsPreset> = DNS_PRESETS
                .iter()
                .map(|&(name, servers)| DnsPreset { name, servers })
                .collect();
            let out = output::render_list(
                ctx.format,
                &presets,
                |p| *p,
                |p| format!("{}\t{}", p.name, p.servers),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}

pub fn handle_addresses(args: AddressesArgs, ctx: &Context) -> Result<(), CliError> {
    match args.command {
        AddressesCommand::Presets => {
            let v4 = IPV4_ADDRESS_PRESETS.iter().map(|&address| AddressPreset {
                family: "ipv4",
                address,
            });
            let v6 = IPV6_ADDRESS_PRESETS.iter().map(|&address| AddressPreset {
                family: "ipv6",
                address,
            });
            let presets: Vec<AddressPreset> = v4.chain(v6).collect();
            let out = output::render_list(
                ctx.format,
                &presets,
                |p| *p,
                |p| p.address.to_owned(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}
