// ── File-backed key-value store ──
//
// One JSON object per file, string values by key. Writes replace the
// whole file through a sibling temp file and rename.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use wgforge_core::{KeyValueStore, StoreError};

/// A [`KeyValueStore`] persisted as a JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable store file is kept before being replaced.
    pub fn corrupt_path(&self) -> PathBuf {
        self.path.with_extension("json.corrupt")
    }

    fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Corrupt(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(StoreError::Corrupt(format!("{}: {e}", self.path.display()))),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.read_map()?;
        match map.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(StoreError::Corrupt(format!("value for '{key}' is not a string"))),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StoreError::Corrupt(reason)) => {
                let aside = self.corrupt_path();
                tracing::warn!(%reason, aside = %aside.display(), "moving unreadable store aside");
                std::fs::rename(&self.path, &aside)?;
                Map::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_owned(), Value::String(value));

        let body = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
