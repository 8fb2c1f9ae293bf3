// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the #[derive(...)] enums that represent
//! persisted or user-visible choices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{CBC_IV_LEN, GCM_NONCE_LEN};
use crate::error::CoreError;

/// Cipher construction that sealed an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum EnvelopeScheme {
    /// AES-256-CBC + PKCS#7, 16-byte IV, no tag. Format of pre-existing envelopes.
    #[default]
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
    /// AES-256-GCM, 12-byte nonce in `iv`, 16-byte `tag`.
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
}

impl EnvelopeScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256Cbc => "aes-256-cbc",
            Self::Aes256Gcm => "aes-256-gcm",
        }
    }

    /// Length of the per-encryption random value stored in `iv`
    pub fn iv_len(&self) -> usize {
        match self {
            Self::Aes256Cbc => CBC_IV_LEN,
            Self::Aes256Gcm => GCM_NONCE_LEN,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Aes256Gcm)
    }
}

impl fmt::Display for EnvelopeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvelopeScheme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes-256-cbc" => Ok(Self::Aes256Cbc),
            "aes-256-gcm" => Ok(Self::Aes256Gcm),
            other => Err(CoreError::Config(format!("unknown envelope scheme `{other}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_names_round_trip_through_from_str() {
        for scheme in [EnvelopeScheme::Aes256Cbc, EnvelopeScheme::Aes256Gcm] {
            assert_eq!(scheme.as_str().parse::<EnvelopeScheme>().unwrap(), scheme);
        }
        assert!("des-cbc".parse::<EnvelopeScheme>().is_err());
    }

    #[test]
    fn default_scheme_is_cbc() {
        assert_eq!(EnvelopeScheme::default(), EnvelopeScheme::Aes256Cbc);
        assert_eq!(EnvelopeScheme::Aes256Cbc.iv_len(), 16);
        assert_eq!(EnvelopeScheme::Aes256Gcm.iv_len(), 12);
    }
}
