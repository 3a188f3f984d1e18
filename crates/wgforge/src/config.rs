//! CLI configuration: thin wrapper around `wgforge_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--config, --store, --output, --color).

use std::path::PathBuf;

use clap::ValueEnum;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

// ── Re-exports from shared crate ────────────────────────────────────

pub use wgforge_config::{Config, FileStore, load_config_from, save_config_to};

// ── CLI-specific helpers ────────────────────────────────────────────

/// The config file in effect: `--config` or the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(wgforge_config::config_path)
}

/// Load the config, falling back to defaults with a warning.
pub fn load(global: &GlobalOpts) -> Config {
    let path = config_file(global);
    load_config_from(&path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
        Config::default()
    })
}

/// The store file in effect: `--store` > config `store_path` > platform default.
pub fn store_path(global: &GlobalOpts, config: &Config) -> PathBuf {
    global.store.clone().unwrap_or_else(|| config.store_path())
}

/// Output format: flag/env first, then the configured default.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global
        .output
        .unwrap_or_else(|| parse_or(&config.defaults.output, "output", OutputFormat::Table))
}

/// Color mode: flag first, then the configured default.
pub fn color_mode(global: &GlobalOpts, config: &Config) -> ColorMode {
    global
        .color
        .unwrap_or_else(|| parse_or(&config.defaults.color, "color", ColorMode::Auto))
}

fn parse_or<T: ValueEnum>(raw: &str, key: &str, fallback: T) -> T {
    T::from_str(raw, true).unwrap_or_else(|_| {
        tracing::warn!(key, value = raw, "unrecognized config default, ignoring");
        fallback
    })
}
