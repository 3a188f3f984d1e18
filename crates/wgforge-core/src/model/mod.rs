// ── Domain model ──
//
// Locations are the persisted catalog entries; tunnel parameters are
// the mutable working set that the assembler turns into a document.

mod location;
mod tunnel;

pub use location::{DEFAULT_PORT, ServerLocation};
pub use tunnel::{Field, InterfaceSettings, PeerSettings, TunnelDefaults, TunnelParameters};
