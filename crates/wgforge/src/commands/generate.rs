//! Tunnel configuration generation.

use std::io::Write;
use std::path::Path;

use secrecy::ExposeSecret;
use serde::Serialize;
use wgforge_core::{Field, MANUAL_ENDPOINT, Mode};

use crate::cli::GenerateArgs;
use crate::commands::Context;
use crate::error::CliError;
use crate::output;

use super::util;

impl GenerateArgs {
    /// Direct field overrides, in the order they are applied.
    fn field_overrides(&self) -> Vec<(Field, &str)> {
        [
            (Field::PrivateKey, &self.private_key),
            (Field::Ipv4, &self.ipv4),
            (Field::Ipv6, &self.ipv6),
            (Field::Dns, &self.dns),
            (Field::Mtu, &self.mtu),
            (Field::PeerPublicKey, &self.peer_public_key),
            (Field::PresharedKey, &self.preshared_key),
            (Field::EndpointIp, &self.endpoint_ip),
            (Field::EndpointPort, &self.endpoint_port),
            (Field::AllowedIps, &self.allowed_ips),
            (Field::PersistentKeepalive, &self.keepalive),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }

    /// Whether anything beyond location and name was asked for.
    fn needs_advanced(&self) -> bool {
        self.advanced
            || self.dns_preset.is_some()
            || self.self_server
            || self.no_preshared_key
            || self.no_keepalive
            || !self.field_overrides().is_empty()
    }
}

// ── Summary ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateSummary {
    file: String,
    location: String,
    endpoint: String,
    client_public_key: String,
}

fn detail(s: &GenerateSummary, color: bool) -> String {
    [
        output::detail_line("File", &s.file, color),
        output::detail_line("Location", &s.location, color),
        output::detail_line("Endpoint", &s.endpoint, color),
        output::detail_line("Public Key", &s.client_public_key, color),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: GenerateArgs, ctx: &Context) -> Result<(), CliError> {
    let mut session = util::open_session(ctx);

    if let Some(ref name) = args.location {
        session.select_location(name)?;
    }
    if args.random_name {
        session.randomize_config_name();
    } else if let Some(ref name) = args.name {
        session.set_config_name(name.clone());
    }

    if args.needs_advanced() {
        session.set_mode(Mode::Advanced);
    }
    if let Some(ref preset) = args.dns_preset {
        session.apply_dns_preset(preset)?;
    }
    for (field, value) in args.field_overrides() {
        session.edit(field, value)?;
    }
    if args.no_preshared_key {
        session.edit(Field::PresharedKey, "")?;
    }
    if args.no_keepalive {
        session.set_keepalive_enabled(false)?;
    } else if args.keepalive.is_some() {
        session.set_keepalive_enabled(true)?;
    }
    if args.private_key.is_some() && session.client_public_key().is_empty() {
        output::warn("--private-key is not a valid X25519 key; no public key derived", ctx.color);
    }

    let peer_private_key = if args.self_server {
        Some(session.generate_peer_keys()?.expose_secret().to_owned())
    } else {
        None
    };

    let exported = session.export()?;

    if session.params().peer.endpoint_ip == MANUAL_ENDPOINT {
        output::warn(
            "location has no IPs; Endpoint omitted (pass --endpoint-ip to set one)",
            ctx.color,
        );
    }
    if let Some(ref secret) = peer_private_key {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "Peer private key (configure it on your server, keep it secret):");
        let _ = writeln!(stderr, "{secret}");
    }

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", exported.contents)?;
        return Ok(());
    }

    let path = args.out_dir.join(&exported.file_name);
    if path.exists() && !args.force {
        return Err(CliError::FileExists {
            path: path.display().to_string(),
        });
    }
    write_private_file(&path, &exported.contents)?;
    tracing::info!(path = %path.display(), "wrote tunnel configuration");

    let summary = GenerateSummary {
        file: path.display().to_string(),
        location: session
            .selected_location()
            .map(|l| l.name.clone())
            .unwrap_or_default(),
        endpoint: format!(
            "{}:{}",
            session.params().peer.endpoint_ip,
            session.params().peer.endpoint_port
        ),
        client_public_key: session.client_public_key().to_owned(),
    };
    let out = output::render_single(
        ctx.format,
        &summary,
        |s| detail(s, ctx.color),
        |s| s.file.clone(),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

/// Write `contents` readable by the owner only, since it holds a private key.
fn write_private_file(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format!("{contents}\n"))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}
