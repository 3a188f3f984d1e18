// ── Location registry ──
//
// Single owner of the location catalog. Every mutation writes through to
// the key-value store; store failures are logged and swallowed so the
// session keeps working on the in-memory copy.

use std::collections::HashSet;

use serde_json::Value;

use crate::catalog;
use crate::error::CoreError;
use crate::model::ServerLocation;
use crate::store::KeyValueStore;

/// Store key holding the JSON location array.
pub const LOCATIONS_KEY: &str = "wireguard-locations";

/// The catalog of server locations plus the store it persists to.
pub struct LocationRegistry<S> {
    store: S,
    locations: Vec<ServerLocation>,
}

impl<S: KeyValueStore> LocationRegistry<S> {
    /// Read the catalog from `store`, falling back to the built-in defaults
    /// when the entry is missing, unreadable, or fails validation.
    pub fn load(store: S) -> Self {
        let locations = match store.get(LOCATIONS_KEY) {
            Ok(Some(raw)) => match import_all(&raw) {
                Ok(locations) => {
                    tracing::debug!(count = locations.len(), "loaded persisted locations");
                    locations
                }
                Err(e) => {
                    tracing::warn!(error = %e, "persisted locations are malformed, using defaults");
                    catalog::default_locations()
                }
            },
            Ok(None) => {
                tracing::debug!("no persisted locations, using defaults");
                catalog::default_locations()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted locations, using defaults");
                catalog::default_locations()
            }
        };
        Self { store, locations }
    }

    pub fn locations(&self) -> &[ServerLocation] {
        &self.locations
    }

    pub fn get(&self, name: &str) -> Option<&ServerLocation> {
        self.locations.iter().find(|l| l.name == name)
    }

    pub fn first(&self) -> Option<&ServerLocation> {
        self.locations.first()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Best-effort write of the full catalog.
    pub fn save(&mut self) {
        let json = match serde_json::to_string(&self.locations) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize locations");
                return;
            }
        };
        match self.store.set(LOCATIONS_KEY, json) {
            Ok(()) => tracing::debug!(count = self.locations.len(), "saved locations"),
            Err(e) => tracing::warn!(error = %e, "failed to save locations"),
        }
    }

    /// Replace the IP pool of `name`.
    ///
    /// Entries are trimmed and blank ones dropped. Order is kept and
    /// duplicates are left alone.
    pub fn update_ip_pool<I, T>(&mut self, name: &str, ips: I) -> Result<&ServerLocation, CoreError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let pool: Vec<String> = ips
            .into_iter()
            .map(|ip| ip.as_ref().trim().to_owned())
            .filter(|ip| !ip.is_empty())
            .collect();

        let idx = self
            .locations
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| CoreError::LocationNotFound { name: name.into() })?;

        tracing::info!(location = name, count = pool.len(), "updating IP pool");
        if let Some(location) = self.locations.get_mut(idx) {
            location.ips = pool;
        }
        self.save();
        self.locations
            .get(idx)
            .ok_or_else(|| CoreError::LocationNotFound { name: name.into() })
    }

    /// Pretty-printed JSON of the full catalog, for backup.
    pub fn export_all(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(&self.locations)?)
    }

    /// Validate `json` and, only if it passes, replace the whole catalog.
    pub fn restore(&mut self, json: &str) -> Result<&[ServerLocation], CoreError> {
        let locations = import_all(json)?;
        tracing::info!(count = locations.len(), "restoring locations from backup");
        self.locations = locations;
        self.save();
        Ok(&self.locations)
    }
}

/// Parse and validate a backup document without touching any registry.
///
/// The document must be a non-empty array whose every element carries a
/// non-empty string `name`, a non-empty string `countryCode`, and an array
/// `ips`. Names must be unique. `port` and `serverPublicKey` are optional.
pub fn import_all(json: &str) -> Result<Vec<ServerLocation>, CoreError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| CoreError::validation(format!("not valid JSON: {e}")))?;

    let Value::Array(items) = value else {
        return Err(CoreError::validation("expected a JSON array of locations"));
    };
    if items.is_empty() {
        return Err(CoreError::validation("backup contains no locations"));
    }

    let mut seen = HashSet::new();
    let mut locations = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        check_shape(idx, &item)?;
        let location: ServerLocation = serde_json::from_value(item)
            .map_err(|e| CoreError::validation(format!("location #{idx}: {e}")))?;
        if !seen.insert(location.name.clone()) {
            return Err(CoreError::validation(format!(
                "location #{idx}: duplicate name '{}'",
                location.name
            )));
        }
        locations.push(location);
    }
    Ok(locations)
}

fn check_shape(idx: usize, item: &Value) -> Result<(), CoreError> {
    let non_empty = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
    };
    if !non_empty("name") {
        return Err(CoreError::validation(format!(
            "location #{idx}: missing or empty 'name'"
        )));
    }
    if !non_empty("countryCode") {
        return Err(CoreError::validation(format!(
            "location #{idx}: missing or empty 'countryCode'"
        )));
    }
    if !item.get("ips").is_some_and(Value::is_array) {
        return Err(CoreError::validation(format!(
            "location #{idx}: 'ips' must be an array"
        )));
    }
    Ok(())
}
