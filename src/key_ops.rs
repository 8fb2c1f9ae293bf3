// src/key_ops.rs
//! Master key parsing, generation, fingerprinting and representation
//!
//! The key is the only secret the codec depends on. It is parsed once at
//! startup, lives inside a zeroize-on-drop secure-gate buffer, and is never
//! printed: `Debug` shows only the key id.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::aliases::KeyBytes32;
use crate::consts::{KEY_ID_CONTEXT, KEY_ID_LEN, KEY_LEN};
use crate::error::{CoreError, Result};

/// Prefix selecting a 64-char hex key spec
pub const HEX_PREFIX: &str = "hex:";
/// Prefix selecting a standard-alphabet base64 key spec
pub const BASE64_PREFIX: &str = "base64:";

/// A 256-bit AES key plus its public fingerprint
pub struct MasterKey {
    bytes: KeyBytes32,
    id: KeyId,
}

impl MasterKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        let id = KeyId::derive(&bytes);
        Self {
            bytes: KeyBytes32::new(bytes),
            id,
        }
    }

    /// Accepts exactly 32 bytes, anything else is an `InvalidKey` error
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidKey("key must be exactly 32 bytes"))?;
        let arr = Zeroizing::new(arr);
        Ok(Self::from_bytes(*arr))
    }

    /// Parse a key spec as found in config or the environment.
    ///
    /// Accepted forms:
    /// - `hex:` followed by 64 hex characters
    /// - `base64:` followed by standard base64 of 32 bytes
    /// - any other string whose UTF-8 encoding is exactly 32 bytes, used as-is
    pub fn parse(spec: &str) -> Result<Self> {
        if let Some(encoded) = spec.strip_prefix(HEX_PREFIX) {
            let decoded = Zeroizing::new(
                hex::decode(encoded.trim())
                    .map_err(|_| CoreError::InvalidKey("hex key is not valid hex"))?,
            );
            return Self::from_slice(&decoded);
        }

        if let Some(encoded) = spec.strip_prefix(BASE64_PREFIX) {
            let decoded = Zeroizing::new(
                STANDARD
                    .decode(encoded.trim())
                    .map_err(|_| CoreError::InvalidKey("base64 key is not valid base64"))?,
            );
            return Self::from_slice(&decoded);
        }

        if spec.is_empty() {
            return Err(CoreError::InvalidKey("key is empty"));
        }
        Self::from_slice(spec.as_bytes())
    }

    /// Generate a new random 256-bit key from the thread CSPRNG
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        rand::rng().fill_bytes(&mut bytes[..]);
        Self::from_bytes(*bytes)
    }

    #[inline]
    pub fn id(&self) -> KeyId {
        self.id
    }

    pub(crate) fn expose(&self) -> &[u8; KEY_LEN] {
        self.bytes.expose_secret()
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterKey")
            .field("id", &self.id)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Short one-way fingerprint naming a key epoch.
///
/// Stored next to every envelope so a store can tell which key sealed it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyId([u8; KEY_ID_LEN]);

impl KeyId {
    fn derive(key: &[u8; KEY_LEN]) -> Self {
        let digest = blake3::derive_key(KEY_ID_CONTEXT, key);
        let mut id = [0u8; KEY_ID_LEN];
        id.copy_from_slice(&digest[..KEY_ID_LEN]);
        KeyId(id)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId({})", self.to_hex())
    }
}

impl FromStr for KeyId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let mut id = [0u8; KEY_ID_LEN];
        hex::decode_to_slice(s, &mut id).map_err(|source| CoreError::Encoding {
            field: "key_id",
            source,
        })?;
        Ok(KeyId(id))
    }
}

/// String forms of a key for operators moving it into a secret store.
///
/// Contains the key itself: never log it, drop it as soon as it is shown.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyRepr {
    pub hex: String,
    pub base64: String,
    pub base64url_no_pad: String,
}

impl KeyRepr {
    /// The `hex:` form accepted by [`MasterKey::parse`], wiped on drop
    pub fn spec(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("{HEX_PREFIX}{}", self.hex))
    }
}

pub fn key_representations(key: &MasterKey) -> KeyRepr {
    let bytes = key.expose();
    KeyRepr {
        hex: hex::encode(bytes),
        base64: STANDARD.encode(bytes),
        base64url_no_pad: URL_SAFE_NO_PAD.encode(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_id_is_stable_and_hex_round_trips() {
        let a = MasterKey::from_bytes([7u8; KEY_LEN]);
        let b = MasterKey::from_bytes([7u8; KEY_LEN]);
        assert_eq!(a.id(), b.id());
        assert_eq!(a.id().to_hex().len(), KEY_ID_LEN * 2);
        assert_eq!(a.id().to_hex().parse::<KeyId>().unwrap(), a.id());
    }

    #[test]
    fn key_id_does_not_reveal_key_prefix() {
        let key = MasterKey::from_bytes([0x42; KEY_LEN]);
        assert!(!key.id().to_hex().starts_with("4242"));
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = MasterKey::from_bytes([0x42; KEY_LEN]);
        let printed = format!("{key:?}");
        assert!(printed.contains("[REDACTED]"));
        assert!(!printed.contains("4242"));
        assert!(!printed.contains("66, 66"));
    }
}
