//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use wgforge_config::ConfigError;
use wgforge_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    #[allow(dead_code)]
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const PRECONDITION: i32 = 5;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(wgforge::not_found),
        help("Run: wgforge {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{path} already exists")]
    #[diagnostic(
        code(wgforge::file_exists),
        help("Pass --force to overwrite it, or choose another name.")
    )]
    FileExists { path: String },

    // ── Preconditions ────────────────────────────────────────────────
    #[error("Key generation is unavailable: {reason}")]
    #[diagnostic(
        code(wgforge::keygen_unavailable),
        help(
            "The operating system did not provide randomness.\n\
             Pass --private-key and --preshared-key to supply keys yourself."
        )
    )]
    KeyGenUnavailable { reason: String },

    #[error("Cannot export: {field} is missing")]
    #[diagnostic(
        code(wgforge::export_blocked),
        help(
            "A PrivateKey and a peer PublicKey are both required.\n\
             Pass --private-key / --peer-public-key, or set serverPublicKey on the location."
        )
    )]
    ExportBlocked { field: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wgforge::validation))]
    Validation { field: String, reason: String },

    #[error("'{field}' can only be changed in advanced mode")]
    #[diagnostic(code(wgforge::advanced_mode), help("Pass --advanced to unlock every field."))]
    AdvancedModeRequired { field: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(wgforge::config),
        help("Check the config file and WGFORGE_* environment variables.")
    )]
    Config(Box<figment::Error>),

    #[error("Failed to serialize config: {0}")]
    #[diagnostic(code(wgforge::config_serialize))]
    ConfigSerialize(#[from] toml::ser::Error),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(wgforge::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Interactive editor failed: {reason}")]
    #[diagnostic(
        code(wgforge::editor),
        help("Set $VISUAL or $EDITOR, or use: wgforge locations set-ips <name> <ip>...")
    )]
    Editor { reason: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(wgforge::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(wgforge::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(wgforge::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::FileExists { .. } => exit_code::CONFLICT,
            Self::KeyGenUnavailable { .. } | Self::ExportBlocked { .. } => {
                exit_code::PRECONDITION
            }
            Self::Validation { .. }
            | Self::AdvancedModeRequired { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::Json(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::KeyGenerationUnavailable { reason } => CliError::KeyGenUnavailable { reason },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::MissingField { field } => CliError::ExportBlocked {
                field: field.into(),
            },

            CoreError::LocationNotFound { name } => CliError::NotFound {
                resource_type: "location".into(),
                identifier: name,
                list_command: "locations list".into(),
            },

            CoreError::AdvancedModeRequired { field } => CliError::AdvancedModeRequired { field },

            CoreError::InvalidView { expected } => {
                CliError::Internal(format!("session is not in the {expected} view"))
            }

            CoreError::Serialization(e) => CliError::Json(e),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Serialization(e) => CliError::ConfigSerialize(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Core(e) => e.into(),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
