// ── Configuration assembler ──
//
// Pure mapping from tunnel parameters to a wg-quick document. Optional
// lines appear only when their inputs are present; nothing is random here.

use crate::catalog::DEFAULT_CONFIG_NAME;
use crate::error::CoreError;
use crate::model::TunnelParameters;

/// Placeholder endpoint used when the selected location has no IPs.
pub const MANUAL_ENDPOINT: &str = "ENTER_IP_IN_GOD_MODE";

/// Extension of exported documents.
pub const CONFIG_EXTENSION: &str = "conf";

/// Render `params` as a tunnel configuration document.
///
/// Fails with [`CoreError::MissingField`] when the interface private key or
/// the peer public key is empty.
pub fn render(params: &TunnelParameters) -> Result<String, CoreError> {
    let iface = &params.interface;
    let peer = &params.peer;

    let private_key = present(&iface.private_key).ok_or(CoreError::MissingField {
        field: "PrivateKey",
    })?;
    let public_key = present(&peer.public_key).ok_or(CoreError::MissingField {
        field: "PublicKey",
    })?;

    let mut interface = vec![
        "[Interface]".to_owned(),
        format!("PrivateKey = {private_key}"),
    ];
    let addresses: Vec<&str> = [iface.ipv4.as_str(), iface.ipv6.as_str()]
        .into_iter()
        .filter_map(present)
        .collect();
    if !addresses.is_empty() {
        interface.push(format!("Address = {}", addresses.join(", ")));
    }
    if let Some(dns) = present(&iface.dns) {
        interface.push(format!("DNS = {dns}"));
    }
    if let Some(mtu) = present(&iface.mtu) {
        interface.push(format!("MTU = {mtu}"));
    }

    let mut peer_lines = vec!["[Peer]".to_owned(), format!("PublicKey = {public_key}")];
    if let Some(psk) = present(&peer.preshared_key) {
        peer_lines.push(format!("PresharedKey = {psk}"));
    }
    let endpoint_ip = present(&peer.endpoint_ip).filter(|ip| *ip != MANUAL_ENDPOINT);
    if let (Some(ip), Some(port)) = (endpoint_ip, present(&peer.endpoint_port)) {
        peer_lines.push(format!("Endpoint = {ip}:{port}"));
    }
    if let Some(allowed) = present(&peer.allowed_ips) {
        peer_lines.push(format!("AllowedIPs = {allowed}"));
    }
    if let Some(secs) = keepalive_interval(params) {
        peer_lines.push(format!("PersistentKeepalive = {secs}"));
    }

    let doc = format!("{}\n\n{}", interface.join("\n"), peer_lines.join("\n"));
    Ok(doc.trim().to_owned())
}

/// The keepalive interval that would be emitted, if any.
///
/// Requires the toggle to be on and the stored value to parse as a
/// positive integer number of seconds. The trimmed value is emitted as
/// typed.
pub fn keepalive_interval(params: &TunnelParameters) -> Option<&str> {
    if !params.peer.keepalive_enabled {
        return None;
    }
    present(&params.peer.persistent_keepalive)
        .filter(|value| value.parse::<u64>().is_ok_and(|secs| secs > 0))
}

/// Download filename for a configuration name: whitespace runs become `-`.
///
/// Path separators also become `-`, so the result is always a single path
/// component.
pub fn config_file_name(config_name: &str) -> String {
    let words: Vec<&str> = config_name.split_whitespace().collect();
    let stem = if words.is_empty() {
        DEFAULT_CONFIG_NAME.to_owned()
    } else {
        let mut stem = words.join("-");
        if config_name.starts_with(char::is_whitespace) {
            stem.insert(0, '-');
        }
        if config_name.ends_with(char::is_whitespace) {
            stem.push('-');
        }
        stem.replace(['/', '\\'], "-")
    };
    format!("{stem}.{CONFIG_EXTENSION}")
}

fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Field, InterfaceSettings, PeerSettings};
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn full() -> TunnelParameters {
        TunnelParameters {
            interface: InterfaceSettings {
                private_key: "PRIV=".into(),
                ipv4: "10.8.0.2/24".into(),
                ipv6: "fd00::2/64".into(),
                dns: "1.1.1.1, 1.0.0.1".into(),
                mtu: "1420".into(),
            },
            peer: PeerSettings {
                public_key: "PUBKEY=".into(),
                preshared_key: "PSK=".into(),
                endpoint_ip: "9.9.9.9".into(),
                endpoint_port: "51820".into(),
                allowed_ips: "0.0.0.0/0, ::/0".into(),
                keepalive_enabled: true,
                persistent_keepalive: "25".into(),
            },
        }
    }

    /// Output line a field solely controls, if any.
    fn line_prefix(field: Field) -> Option<&'static str> {
        match field {
            Field::PrivateKey | Field::PeerPublicKey | Field::Ipv4 | Field::Ipv6 => None,
            Field::Dns => Some("DNS = "),
            Field::Mtu => Some("MTU = "),
            Field::PresharedKey => Some("PresharedKey = "),
            Field::EndpointIp | Field::EndpointPort => Some("Endpoint = "),
            Field::AllowedIps => Some("AllowedIPs = "),
            Field::PersistentKeepalive => Some("PersistentKeepalive = "),
        }
    }

    #[test]
    fn renders_reference_scenario() {
        let mut params = full();
        params.interface.ipv6.clear();
        params.peer.preshared_key.clear();
        let expected = "\
[Interface]
PrivateKey = PRIV=
Address = 10.8.0.2/24
DNS = 1.1.1.1, 1.0.0.1
MTU = 1420

[Peer]
PublicKey = PUBKEY=
Endpoint = 9.9.9.9:51820
AllowedIPs = 0.0.0.0/0, ::/0
PersistentKeepalive = 25";
        assert_eq!(render(&params).unwrap(), expected);
    }

    #[test]
    fn headers_appear_once_in_order() {
        let doc = render(&full()).unwrap();
        assert_eq!(doc.matches("[Interface]").count(), 1);
        assert_eq!(doc.matches("[Peer]").count(), 1);
        assert!(doc.find("[Interface]").unwrap() < doc.find("[Peer]").unwrap());
        assert!(doc.starts_with("[Interface]"));
    }

    #[test]
    fn minimal_document_has_only_keys() {
        let mut params = TunnelParameters::default();
        params.interface.private_key = "PRIV=".into();
        params.peer.public_key = "PUB=".into();
        assert_eq!(
            render(&params).unwrap(),
            "[Interface]\nPrivateKey = PRIV=\n\n[Peer]\nPublicKey = PUB="
        );
    }

    #[test]
    fn missing_keys_are_preconditions() {
        let mut params = full();
        params.interface.private_key = "   ".into();
        assert!(matches!(
            render(&params),
            Err(CoreError::MissingField { field: "PrivateKey" })
        ));

        let mut params = full();
        params.peer.public_key.clear();
        assert!(matches!(
            render(&params),
            Err(CoreError::MissingField { field: "PublicKey" })
        ));
    }

    #[test]
    fn omitting_a_field_removes_only_its_line() {
        let base = render(&full()).unwrap();
        for field in Field::iter() {
            let Some(prefix) = line_prefix(field) else {
                continue;
            };
            let mut params = full();
            params.set(field, String::new());
            let expected: Vec<&str> = base.lines().filter(|l| !l.starts_with(prefix)).collect();
            assert_eq!(render(&params).unwrap(), expected.join("\n"), "omitting {field}");
        }
    }

    #[test]
    fn one_empty_address_keeps_the_other() {
        let mut params = full();
        params.interface.ipv4.clear();
        let doc = render(&params).unwrap();
        assert!(doc.contains("\nAddress = fd00::2/64\n"), "{doc}");

        let mut params = full();
        params.interface.ipv6.clear();
        let doc = render(&params).unwrap();
        assert!(doc.contains("\nAddress = 10.8.0.2/24\n"), "{doc}");
    }

    #[test]
    fn both_addresses_empty_drops_address_line() {
        let mut params = full();
        params.interface.ipv4.clear();
        params.interface.ipv6.clear();
        assert!(!render(&params).unwrap().contains("Address"));
    }

    #[test]
    fn keepalive_requires_toggle_and_positive_value() {
        let mut params = full();
        for (value, shown) in [
            ("25", true),
            ("70000", true),
            ("0", false),
            ("-5", false),
            ("abc", false),
            ("", false),
        ] {
            params.peer.persistent_keepalive = value.into();
            assert_eq!(
                render(&params).unwrap().contains("PersistentKeepalive"),
                shown,
                "value {value:?}"
            );
        }

        params.peer.persistent_keepalive = " 70000 ".into();
        assert!(render(&params).unwrap().ends_with("\nPersistentKeepalive = 70000"));
        params.peer.persistent_keepalive = "025".into();
        assert!(render(&params).unwrap().ends_with("\nPersistentKeepalive = 025"));

        let mut params = full();
        let enabled = render(&params).unwrap();
        params.peer.keepalive_enabled = false;
        assert!(!render(&params).unwrap().contains("PersistentKeepalive"));
        params.peer.keepalive_enabled = true;
        assert_eq!(render(&params).unwrap(), enabled);
    }

    #[test]
    fn manual_endpoint_placeholder_is_not_emitted() {
        let mut params = full();
        params.peer.endpoint_ip = MANUAL_ENDPOINT.into();
        assert!(!render(&params).unwrap().contains("Endpoint"));
    }

    #[test]
    fn render_is_deterministic() {
        let params = full();
        assert_eq!(render(&params).unwrap(), render(&params).unwrap());
    }

    #[test]
    fn file_name_collapses_whitespace() {
        assert_eq!(config_file_name("My-WireGuard-Config"), "My-WireGuard-Config.conf");
        assert_eq!(config_file_name("home  office\tvpn"), "home-office-vpn.conf");
        assert_eq!(config_file_name(" edge "), "-edge-.conf");
        assert_eq!(config_file_name("   "), "My-WireGuard-Config.conf");
    }

    #[test]
    fn file_name_never_leaves_its_directory() {
        assert_eq!(config_file_name("../../x"), "..-..-x.conf");
        assert_eq!(config_file_name("/etc/wireguard/wg0"), "-etc-wireguard-wg0.conf");
        assert_eq!(config_file_name(r"..\evil"), "..-evil.conf");
        for name in ["../../x", "/abs", r"a\b", "a / b"] {
            let file = config_file_name(name);
            assert_eq!(std::path::Path::new(&file).components().count(), 1, "{file}");
        }
    }
}
