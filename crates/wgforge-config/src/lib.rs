//! Shared configuration and on-device persistence for wgforge.
//!
//! TOML config with environment overrides, platform paths, the
//! file-backed [`FileStore`] that the location registry persists into,
//! and backup file helpers.

mod backup;
mod store;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use wgforge_core::catalog::DEFAULT_CONFIG_NAME;
use wgforge_core::{CoreError, TunnelDefaults};

pub use backup::{BACKUP_FILE_NAME, export_backup_file, import_backup_file};
pub use store::FileStore;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Name the exported file is derived from.
    #[serde(default = "default_config_name")]
    pub config_name: String,

    /// Location selected when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_location: Option<String>,

    /// Override for the key-value store file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Output defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Seed values for the tunnel fields a location does not supply.
    #[serde(default)]
    pub tunnel: TunnelDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_name: default_config_name(),
            default_location: None,
            store_path: None,
            defaults: Defaults::default(),
            tunnel: TunnelDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_config_name() -> String {
    DEFAULT_CONFIG_NAME.into()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "wgforge", "wgforge")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("wgforge");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default location of the key-value store file.
pub fn default_store_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("store.json"),
        |dirs| dirs.data_dir().join("store.json"),
    )
}

impl Config {
    /// The store file: the configured override or the platform default.
    pub fn store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(default_store_path)
    }
}

// ── Config loading ──────────────────────────────────────────────────

/// Load Config from `path` + `WGFORGE_` environment variables.
///
/// Nested keys use a double underscore: `WGFORGE_TUNNEL__MTU=1280`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WGFORGE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    tracing::info!(path = %path.display(), "saved config");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.config_name, DEFAULT_CONFIG_NAME);
        assert_eq!(cfg.tunnel, TunnelDefaults::default());
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
config_name = "laptop"
default_location = "Germany"

[tunnel]
mtu = "1280"
keepalive_enabled = false
"#,
        )
        .unwrap();
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.config_name, "laptop");
        assert_eq!(cfg.default_location.as_deref(), Some("Germany"));
        assert_eq!(cfg.tunnel.mtu, "1280");
        assert!(!cfg.tunnel.keepalive_enabled);
        assert_eq!(cfg.tunnel.dns, TunnelDefaults::default().dns);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.tunnel.allowed_ips = "10.0.0.0/8".into();
        cfg.store_path = Some(dir.path().join("store.json"));
        save_config_to(&cfg, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn malformed_file_is_a_figment_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "config_name = [").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Figment(_))));
    }

    #[test]
    fn store_path_prefers_override() {
        let cfg = Config {
            store_path: Some(PathBuf::from("/tmp/x.json")),
            ..Config::default()
        };
        assert_eq!(cfg.store_path(), PathBuf::from("/tmp/x.json"));
        assert_eq!(Config::default().store_path(), default_store_path());
    }
}
