//! Tunnel configuration assembly and location management for wgforge.
//!
//! This crate owns the domain model and every rule with real invariants:
//!
//! - **[`LocationRegistry`]**: The catalog of server locations, each with
//!   a pool of candidate endpoint IPs. Writes through to a
//!   [`KeyValueStore`] on every mutation and falls back to the built-in
//!   [`catalog`] when nothing usable is persisted. Backup import is
//!   validated by [`import_all`] before anything is replaced.
//!
//! - **[`Controller`]**: One session's working state: the selected
//!   location, the [`TunnelParameters`], the basic/advanced [`Mode`] and
//!   the current [`View`]. Selecting a location re-derives the endpoint and
//!   peer key; direct edits change a single field.
//!
//! - **[`render`]**: Pure mapping from parameters to a wg-quick document,
//!   emitting optional lines only when their inputs are present.
//!
//! - **[`keys`]**: Base64 key material from an external [`KeyMaterial`]
//!   source; [`OsKeyMaterial`] uses X25519 and the OS RNG.

pub mod assembler;
pub mod catalog;
pub mod controller;
pub mod error;
pub mod keys;
pub mod model;
pub mod registry;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use assembler::{CONFIG_EXTENSION, MANUAL_ENDPOINT, config_file_name, render};
pub use controller::{Controller, ExportedConfig, Mode, RestoreOutcome, RestoreTicket, View};
pub use error::CoreError;
pub use keys::{KeyMaterial, KeyPair, OsKeyMaterial};
pub use model::{
    DEFAULT_PORT, Field, InterfaceSettings, PeerSettings, ServerLocation, TunnelDefaults,
    TunnelParameters,
};
pub use registry::{LOCATIONS_KEY, LocationRegistry, import_all};
pub use store::{KeyValueStore, MemoryStore, StoreError};
