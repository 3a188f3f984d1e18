// ── Field derivation controller ──
//
// Owns the registry and the working tunnel parameters. Selecting a
// location always resets the derived peer fields; direct edits touch one
// field; view transitions bump a generation counter so a backup read that
// completes after the user navigated away lands as a no-op.

use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use strum::Display;

use crate::assembler::{self, MANUAL_ENDPOINT};
use crate::catalog::{self, DEFAULT_CONFIG_NAME, RANDOM_NAME_PREFIX};
use crate::error::CoreError;
use crate::keys::{self, KeyMaterial, OsKeyMaterial};
use crate::model::{Field, ServerLocation, TunnelDefaults, TunnelParameters};
use crate::registry::LocationRegistry;
use crate::store::KeyValueStore;

/// Which fields the user may edit directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Derived defaults plus key generation only.
    #[default]
    Basic,
    /// Every tunnel parameter is editable.
    Advanced,
}

/// The screen the session is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Main,
    /// Editing the IP pool of `location`; `draft` holds one IP per line.
    EditIps { location: String, draft: String },
}

/// Handle for a backup read started from the IP editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct RestoreTicket {
    generation: u64,
}

/// What happened when a backup read completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The catalog was replaced with `count` locations.
    Applied { count: usize },
    /// The session moved on before the read finished; nothing changed.
    Stale,
}

/// A rendered document and the file name to offer it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedConfig {
    pub file_name: String,
    pub contents: String,
}

/// One user's tunnel-building session.
pub struct Controller<S> {
    registry: LocationRegistry<S>,
    keys: Box<dyn KeyMaterial>,
    rng: Box<dyn RngCore>,
    params: TunnelParameters,
    config_name: String,
    selected: Option<String>,
    mode: Mode,
    view: View,
    client_public_key: String,
    peer_private_key: Option<SecretString>,
    generation: u64,
}

impl<S: KeyValueStore> Controller<S> {
    /// Start a session backed by OS randomness and X25519 keys.
    pub fn new(registry: LocationRegistry<S>, defaults: &TunnelDefaults) -> Self {
        Self::with_sources(
            registry,
            defaults,
            Box::new(OsKeyMaterial),
            Box::new(rand::thread_rng()),
        )
    }

    /// Start a session with explicit key and randomness sources.
    ///
    /// Selects the first location and generates client keys. A missing key
    /// primitive is logged and leaves the key fields empty.
    pub fn with_sources(
        registry: LocationRegistry<S>,
        defaults: &TunnelDefaults,
        keys: Box<dyn KeyMaterial>,
        rng: Box<dyn RngCore>,
    ) -> Self {
        let mut controller = Self {
            registry,
            keys,
            rng,
            params: TunnelParameters::from_defaults(defaults),
            config_name: DEFAULT_CONFIG_NAME.to_owned(),
            selected: None,
            mode: Mode::Basic,
            view: View::Main,
            client_public_key: String::new(),
            peer_private_key: None,
            generation: 0,
        };
        if let Some(first) = controller.registry.first().cloned() {
            controller.reseed(&first);
        }
        // Failure is already logged and leaves the key fields empty.
        let _ = controller.generate_client_keys();
        controller
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn registry(&self) -> &LocationRegistry<S> {
        &self.registry
    }

    pub fn params(&self) -> &TunnelParameters {
        &self.params
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn config_name(&self) -> &str {
        &self.config_name
    }

    pub fn client_public_key(&self) -> &str {
        &self.client_public_key
    }

    /// Private half of a generated peer key pair. Never emitted.
    pub fn peer_private_key(&self) -> Option<&SecretString> {
        self.peer_private_key.as_ref()
    }

    pub fn selected_location(&self) -> Option<&ServerLocation> {
        self.selected.as_deref().and_then(|name| self.registry.get(name))
    }

    /// Whether both keys the assembler requires are present.
    pub fn can_export(&self) -> bool {
        !self.params.interface.private_key.trim().is_empty()
            && !self.params.peer.public_key.trim().is_empty()
    }

    // ── Location selection ───────────────────────────────────────────

    /// Select `name` and reset every location-derived field.
    pub fn select_location(&mut self, name: &str) -> Result<&TunnelParameters, CoreError> {
        let location = self
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::LocationNotFound { name: name.into() })?;
        self.reseed(&location);
        Ok(&self.params)
    }

    fn reseed(&mut self, location: &ServerLocation) {
        let endpoint = location
            .ips
            .choose(self.rng.as_mut())
            .cloned()
            .unwrap_or_else(|| MANUAL_ENDPOINT.to_owned());
        tracing::debug!(location = %location.name, endpoint = %endpoint, "selected location");

        self.params.peer.endpoint_ip = endpoint;
        self.params.peer.endpoint_port = location.port.to_string();
        self.params.peer.public_key.clone_from(&location.server_public_key);
        self.peer_private_key = None;
        self.selected = Some(location.name.clone());
    }

    // ── Mode and direct edits ────────────────────────────────────────

    pub fn set_mode(&mut self, mode: Mode) {
        tracing::debug!(%mode, "mode changed");
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> Mode {
        let next = match self.mode {
            Mode::Basic => Mode::Advanced,
            Mode::Advanced => Mode::Basic,
        };
        self.set_mode(next);
        next
    }

    fn require_advanced(&self, field: impl ToString) -> Result<(), CoreError> {
        match self.mode {
            Mode::Advanced => Ok(()),
            Mode::Basic => Err(CoreError::AdvancedModeRequired {
                field: field.to_string(),
            }),
        }
    }

    /// Overwrite one field. Advanced mode only.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> Result<(), CoreError> {
        self.require_advanced(field)?;
        let value = value.into();
        match field {
            Field::PeerPublicKey => {
                // A hand-edited key no longer matches the generated secret.
                self.peer_private_key = None;
            }
            Field::PrivateKey => {
                self.client_public_key = keys::derive_public_key(&value).unwrap_or_default();
            }
            _ => {}
        }
        self.params.set(field, value);
        Ok(())
    }

    /// Gate keepalive emission. The stored interval is kept either way.
    pub fn set_keepalive_enabled(&mut self, enabled: bool) -> Result<(), CoreError> {
        self.require_advanced("keepalive")?;
        self.params.peer.keepalive_enabled = enabled;
        Ok(())
    }

    /// Replace the DNS field with a named preset. Advanced mode only.
    pub fn apply_dns_preset(&mut self, preset: &str) -> Result<(), CoreError> {
        self.require_advanced(Field::Dns)?;
        let servers = catalog::dns_preset(preset)
            .ok_or_else(|| CoreError::validation(format!("unknown DNS preset '{preset}'")))?;
        self.params.interface.dns = servers.to_owned();
        Ok(())
    }

    pub fn set_config_name(&mut self, name: impl Into<String>) {
        self.config_name = name.into();
    }

    /// Replace the configuration name with `Empress_` and six random
    /// alphanumerics.
    pub fn randomize_config_name(&mut self) -> &str {
        let suffix: String = (0..6)
            .map(|_| char::from(self.rng.sample(Alphanumeric)))
            .collect();
        self.config_name = format!("{RANDOM_NAME_PREFIX}{suffix}");
        &self.config_name
    }

    // ── Key generation ───────────────────────────────────────────────

    /// Generate the client key pair and a preshared key.
    ///
    /// On failure the client keys are cleared so export stays blocked.
    pub fn generate_client_keys(&mut self) -> Result<(), CoreError> {
        let generated = keys::generate_key_pair(self.keys.as_ref()).and_then(|pair| {
            let psk = keys::generate_preshared_key(self.keys.as_ref())?;
            Ok((pair, psk))
        });
        match generated {
            Ok((pair, psk)) => {
                self.params.interface.private_key = pair.private_key.expose_secret().to_owned();
                self.client_public_key = pair.public_key;
                self.params.peer.preshared_key = psk.expose_secret().to_owned();
                tracing::debug!("generated client keys");
                Ok(())
            }
            Err(e) => {
                self.params.interface.private_key.clear();
                self.client_public_key.clear();
                self.params.peer.preshared_key.clear();
                Err(e)
            }
        }
    }

    /// Generate a peer key pair for operating your own server.
    ///
    /// The public half becomes the peer key; the private half is only
    /// retained for display. Advanced mode only.
    pub fn generate_peer_keys(&mut self) -> Result<&SecretString, CoreError> {
        self.require_advanced(Field::PeerPublicKey)?;
        let pair = keys::generate_key_pair(self.keys.as_ref())?;
        self.params.peer.public_key = pair.public_key;
        tracing::debug!("generated peer keys");
        Ok(self.peer_private_key.insert(pair.private_key))
    }

    // ── IP editor view ───────────────────────────────────────────────

    /// Enter the IP editor for the selected location.
    pub fn open_ip_editor(&mut self) -> Result<&str, CoreError> {
        if self.view != View::Main {
            return Err(CoreError::InvalidView { expected: "main" });
        }
        let location = self
            .selected_location()
            .ok_or_else(|| CoreError::LocationNotFound {
                name: self.selected.clone().unwrap_or_default(),
            })?;
        let name = location.name.clone();
        let draft = location.ips.join("\n");
        self.navigate(View::EditIps {
            location: name,
            draft,
        });
        self.draft()
    }

    /// Current editor text.
    pub fn draft(&self) -> Result<&str, CoreError> {
        match &self.view {
            View::EditIps { draft, .. } => Ok(draft),
            View::Main => Err(CoreError::InvalidView { expected: "edit" }),
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) -> Result<(), CoreError> {
        match &mut self.view {
            View::EditIps { draft, .. } => {
                *draft = text.into();
                Ok(())
            }
            View::Main => Err(CoreError::InvalidView { expected: "edit" }),
        }
    }

    /// Commit the draft as the location's pool and return to the main view.
    ///
    /// Saving the selected location re-selects it, so the endpoint is drawn
    /// again from the new pool.
    pub fn save_ip_editor(&mut self) -> Result<&ServerLocation, CoreError> {
        let View::EditIps { location, draft } = &self.view else {
            return Err(CoreError::InvalidView { expected: "edit" });
        };
        let name = location.clone();
        let lines: Vec<String> = draft.lines().map(str::to_owned).collect();

        let updated = self.registry.update_ip_pool(&name, lines)?.clone();
        if self.selected.as_deref() == Some(name.as_str()) {
            self.reseed(&updated);
        }
        self.navigate(View::Main);
        self.registry
            .get(&name)
            .ok_or(CoreError::LocationNotFound { name })
    }

    /// Leave the editor without saving.
    pub fn cancel_ip_editor(&mut self) -> Result<(), CoreError> {
        if matches!(self.view, View::Main) {
            return Err(CoreError::InvalidView { expected: "edit" });
        }
        self.navigate(View::Main);
        Ok(())
    }

    fn navigate(&mut self, view: View) {
        self.generation = self.generation.wrapping_add(1);
        self.view = view;
    }

    // ── Backup restore ───────────────────────────────────────────────

    /// Note that a backup read is starting. Only valid from the editor.
    pub fn begin_restore(&self) -> Result<RestoreTicket, CoreError> {
        match self.view {
            View::EditIps { .. } => Ok(RestoreTicket {
                generation: self.generation,
            }),
            View::Main => Err(CoreError::InvalidView { expected: "edit" }),
        }
    }

    /// Apply the contents of a backup read started with `ticket`.
    ///
    /// A ticket from before the latest navigation yields
    /// [`RestoreOutcome::Stale`]. Invalid contents fail and change nothing.
    /// On success the selection is kept if its name survived, otherwise the
    /// first location is selected, and the view returns to main.
    pub fn finish_restore(
        &mut self,
        ticket: RestoreTicket,
        contents: &str,
    ) -> Result<RestoreOutcome, CoreError> {
        if ticket.generation != self.generation || matches!(self.view, View::Main) {
            tracing::debug!("discarding stale backup read");
            return Ok(RestoreOutcome::Stale);
        }

        let count = self.registry.restore(contents)?.len();
        let next = self
            .selected
            .as_deref()
            .and_then(|name| self.registry.get(name))
            .or_else(|| self.registry.first())
            .cloned();
        if let Some(location) = next {
            self.reseed(&location);
        }
        self.navigate(View::Main);
        Ok(RestoreOutcome::Applied { count })
    }

    // ── Export ───────────────────────────────────────────────────────

    /// Render the current parameters under the sanitized configuration name.
    pub fn export(&self) -> Result<ExportedConfig, CoreError> {
        let contents = assembler::render(&self.params)?;
        Ok(ExportedConfig {
            file_name: assembler::config_file_name(&self.config_name),
            contents,
        })
    }
}
