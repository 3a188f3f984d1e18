// ── Tunnel parameter domain types ──
//
// Every value is kept as the string the user typed. Presence is the
// only check applied before emission; syntax is the user's business.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// `[Interface]` section inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSettings {
    /// Base64 private key. Required for export.
    pub private_key: String,
    pub ipv4: String,
    pub ipv6: String,
    /// Comma-separated server list, emitted verbatim.
    pub dns: String,
    pub mtu: String,
}

/// `[Peer]` section inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerSettings {
    /// Base64 public key. Required for export.
    pub public_key: String,
    pub preshared_key: String,
    pub endpoint_ip: String,
    pub endpoint_port: String,
    /// Comma-separated CIDR list, emitted verbatim.
    pub allowed_ips: String,
    pub keepalive_enabled: bool,
    /// Seconds. Retained while keepalive is disabled.
    pub persistent_keepalive: String,
}

/// The full mutable working set that becomes one exported document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelParameters {
    pub interface: InterfaceSettings,
    pub peer: PeerSettings,
}

impl TunnelParameters {
    /// Seed the location-independent fields from configured defaults.
    pub fn from_defaults(defaults: &TunnelDefaults) -> Self {
        Self {
            interface: InterfaceSettings {
                private_key: String::new(),
                ipv4: defaults.ipv4.clone(),
                ipv6: defaults.ipv6.clone(),
                dns: defaults.dns.clone(),
                mtu: defaults.mtu.clone(),
            },
            peer: PeerSettings {
                allowed_ips: defaults.allowed_ips.clone(),
                keepalive_enabled: defaults.keepalive_enabled,
                persistent_keepalive: defaults.keepalive.clone(),
                ..PeerSettings::default()
            },
        }
    }

    /// Read a single editable field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::PrivateKey => &self.interface.private_key,
            Field::Ipv4 => &self.interface.ipv4,
            Field::Ipv6 => &self.interface.ipv6,
            Field::Dns => &self.interface.dns,
            Field::Mtu => &self.interface.mtu,
            Field::PeerPublicKey => &self.peer.public_key,
            Field::PresharedKey => &self.peer.preshared_key,
            Field::EndpointIp => &self.peer.endpoint_ip,
            Field::EndpointPort => &self.peer.endpoint_port,
            Field::AllowedIps => &self.peer.allowed_ips,
            Field::PersistentKeepalive => &self.peer.persistent_keepalive,
        }
    }

    /// Overwrite a single editable field; nothing else changes.
    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::PrivateKey => &mut self.interface.private_key,
            Field::Ipv4 => &mut self.interface.ipv4,
            Field::Ipv6 => &mut self.interface.ipv6,
            Field::Dns => &mut self.interface.dns,
            Field::Mtu => &mut self.interface.mtu,
            Field::PeerPublicKey => &mut self.peer.public_key,
            Field::PresharedKey => &mut self.peer.preshared_key,
            Field::EndpointIp => &mut self.peer.endpoint_ip,
            Field::EndpointPort => &mut self.peer.endpoint_port,
            Field::AllowedIps => &mut self.peer.allowed_ips,
            Field::PersistentKeepalive => &mut self.peer.persistent_keepalive,
        };
        *slot = value;
    }
}

/// Identifies one directly editable string field of [`TunnelParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Field {
    PrivateKey,
    Ipv4,
    Ipv6,
    Dns,
    Mtu,
    PeerPublicKey,
    PresharedKey,
    EndpointIp,
    EndpointPort,
    AllowedIps,
    PersistentKeepalive,
}

/// Seed values for the fields a location does not supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelDefaults {
    #[serde(default = "default_ipv4")]
    pub ipv4: String,
    #[serde(default = "default_ipv6")]
    pub ipv6: String,
    #[serde(default = "default_dns")]
    pub dns: String,
    #[serde(default = "default_allowed_ips")]
    pub allowed_ips: String,
    #[serde(default = "default_mtu")]
    pub mtu: String,
    #[serde(default = "default_keepalive_enabled")]
    pub keepalive_enabled: bool,
    #[serde(default = "default_keepalive")]
    pub keepalive: String,
}

impl Default for TunnelDefaults {
    fn default() -> Self {
        Self {
            ipv4: default_ipv4(),
            ipv6: default_ipv6(),
            dns: default_dns(),
            allowed_ips: default_allowed_ips(),
            mtu: default_mtu(),
            keepalive_enabled: default_keepalive_enabled(),
            keepalive: default_keepalive(),
        }
    }
}

fn default_ipv4() -> String {
    "10.8.0.2/24".into()
}
fn default_ipv6() -> String {
    "fddd:2c4:2c4:2c4::2/64".into()
}
fn default_dns() -> String {
    "1.1.1.1, 1.0.0.1".into()
}
fn default_allowed_ips() -> String {
    "0.0.0.0/0, ::/0".into()
}
fn default_mtu() -> String {
    "1420".into()
}
fn default_keepalive_enabled() -> bool {
    true
}
fn default_keepalive() -> String {
    "25".into()
}
