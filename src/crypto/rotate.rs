// src/crypto/rotate.rs
use crate::enums::EnvelopeScheme;
use crate::envelope::SecretEnvelope;
use crate::error::Result;
use crate::key_ops::MasterKey;

use super::{decrypt, encrypt_with};

/// Pure in-memory re-encryption: open under `old`, seal under `new`
///
/// Always draws a fresh IV, so the result never shares one with the input
/// even when `old` and `new` are the same key.
pub fn reencrypt(
    envelope: &SecretEnvelope,
    old: &MasterKey,
    new: &MasterKey,
    scheme: EnvelopeScheme,
) -> Result<SecretEnvelope> {
    let plaintext = decrypt(envelope, old)?;
    encrypt_with(plaintext.expose_secret(), new, scheme)
}
