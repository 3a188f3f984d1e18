// ── Server location domain type ──

use serde::{Deserialize, Serialize};

/// WireGuard's conventional listen port, used when a restored location omits one.
pub const DEFAULT_PORT: u16 = 51820;

/// One selectable VPN exit.
///
/// Field names serialize in camelCase so the persisted catalog and backup
/// files keep the `countryCode` / `serverPublicKey` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerLocation {
    /// Unique within a registry; the registry enforces it, not this type.
    pub name: String,
    /// Two-letter country code, display only.
    pub country_code: String,
    /// Candidate endpoint IPs, in user order. May be empty and may repeat.
    pub ips: Vec<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base64 public key used as the default peer key.
    #[serde(default)]
    pub server_public_key: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl ServerLocation {
    pub fn new(
        name: impl Into<String>,
        country_code: impl Into<String>,
        ips: Vec<String>,
        port: u16,
        server_public_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            country_code: country_code.into(),
            ips,
            port,
            server_public_key: server_public_key.into(),
        }
    }
}
