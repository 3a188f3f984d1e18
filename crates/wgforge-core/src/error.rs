// ── Core error types ──
//
// User-facing errors from wgforge-core. Store failures are deliberately
// absent: the registry downgrades them to warnings and never returns them.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Fatal preconditions ──────────────────────────────────────────
    #[error("Key generation unavailable: {reason}")]
    KeyGenerationUnavailable { reason: String },

    // ── Validation errors ────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Render preconditions ─────────────────────────────────────────
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Location not found: {name}")]
    LocationNotFound { name: String },

    // ── State machine errors ─────────────────────────────────────────
    #[error("Field '{field}' can only be edited in advanced mode")]
    AdvancedModeRequired { field: String },

    #[error("Action requires the {expected} view")]
    InvalidView { expected: &'static str },

    // ── Serialization ────────────────────────────────────────────────
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
