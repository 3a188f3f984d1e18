// ── Key material ──
//
// The only cryptography here is delegated: an X25519 key pair and a
// block of OS randomness. This module Base64-encodes what comes back and
// refuses loudly when the source cannot produce anything.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use rand::rngs::OsRng;
use secrecy::SecretString;
use x25519_dalek::{PublicKey, StaticSecret};

use crate::error::CoreError;

/// Length in bytes of WireGuard keys and preshared keys.
pub const KEY_LEN: usize = 32;

/// Raw output of a key-pair primitive.
pub struct RawKeyPair {
    pub secret_key: [u8; KEY_LEN],
    pub public_key: [u8; KEY_LEN],
}

/// An external source of key pairs and cryptographic randomness.
pub trait KeyMaterial {
    /// Produce a fresh asymmetric key pair.
    fn key_pair(&self) -> Result<RawKeyPair, CoreError>;

    /// Produce `n` cryptographically random bytes.
    fn random_bytes(&self, n: usize) -> Result<Vec<u8>, CoreError>;
}

/// Base64-encoded key pair ready for display or emission.
#[derive(Debug)]
pub struct KeyPair {
    pub private_key: SecretString,
    pub public_key: String,
}

/// X25519 keys backed by the operating system's RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsKeyMaterial;

impl KeyMaterial for OsKeyMaterial {
    fn key_pair(&self) -> Result<RawKeyPair, CoreError> {
        let mut secret = [0u8; KEY_LEN];
        fill(&mut secret)?;
        // Clamp the scalar the way `wg genkey` does.
        secret[0] &= 248;
        secret[31] &= 127;
        secret[31] |= 64;

        let public = PublicKey::from(&StaticSecret::from(secret));
        Ok(RawKeyPair {
            secret_key: secret,
            public_key: public.to_bytes(),
        })
    }

    fn random_bytes(&self, n: usize) -> Result<Vec<u8>, CoreError> {
        let mut buf = vec![0u8; n];
        fill(&mut buf)?;
        Ok(buf)
    }
}

fn fill(buf: &mut [u8]) -> Result<(), CoreError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CoreError::KeyGenerationUnavailable {
            reason: e.to_string(),
        })
}

/// Generate a key pair and encode both halves.
pub fn generate_key_pair(source: &dyn KeyMaterial) -> Result<KeyPair, CoreError> {
    let raw = source.key_pair().inspect_err(|e| {
        tracing::error!(error = %e, "key pair generation failed");
    })?;
    Ok(KeyPair {
        private_key: SecretString::from(STANDARD.encode(raw.secret_key)),
        public_key: STANDARD.encode(raw.public_key),
    })
}

/// Generate a Base64 preshared key.
pub fn generate_preshared_key(source: &dyn KeyMaterial) -> Result<SecretString, CoreError> {
    let bytes = source.random_bytes(KEY_LEN).inspect_err(|e| {
        tracing::error!(error = %e, "random byte generation failed");
    })?;
    Ok(SecretString::from(STANDARD.encode(bytes)))
}

/// Derive the Base64 public key for a Base64 X25519 private key.
pub fn derive_public_key(private_key: &str) -> Result<String, CoreError> {
    let bytes = STANDARD
        .decode(private_key.trim())
        .map_err(|e| CoreError::validation(format!("private key is not valid Base64: {e}")))?;
    let secret: [u8; KEY_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
        CoreError::validation(format!(
            "private key must decode to {KEY_LEN} bytes, got {}",
            b.len()
        ))
    })?;
    let public = PublicKey::from(&StaticSecret::from(secret));
    Ok(STANDARD.encode(public.as_bytes()))
}
