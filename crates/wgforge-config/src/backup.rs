// ── Backup files ──
//
// Parsing and validation belong to the registry; this side only moves
// bytes between the registry and the filesystem.

use std::path::Path;

use wgforge_core::{CoreError, KeyValueStore, LocationRegistry, ServerLocation, import_all};

use crate::ConfigError;

/// File name offered for backups.
pub const BACKUP_FILE_NAME: &str = "wireguard-ips-backup.json";

/// Write the registry's pretty-printed catalog to `path`.
pub fn export_backup_file<S: KeyValueStore>(
    registry: &LocationRegistry<S>,
    path: &Path,
) -> Result<(), ConfigError> {
    let json = registry.export_all()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "wrote backup");
    Ok(())
}

/// Validate backup file contents without applying them.
pub fn import_backup_file(contents: &str) -> Result<Vec<ServerLocation>, CoreError> {
    import_all(contents)
}
