// src/crypto/encrypt.rs
use aes::Aes256;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use cbc::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::consts::{CBC_IV_LEN, GCM_NONCE_LEN};
use crate::enums::EnvelopeScheme;
use crate::envelope::SecretEnvelope;
use crate::error::{CoreError, Result};
use crate::key_ops::MasterKey;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;

/// Encrypt a secret → AES-256-CBC envelope with a fresh random IV
pub fn encrypt(plaintext: &str, key: &MasterKey) -> Result<SecretEnvelope> {
    encrypt_with(plaintext, key, EnvelopeScheme::Aes256Cbc)
}

/// Encrypt a secret under an explicitly chosen scheme
pub fn encrypt_with(
    plaintext: &str,
    key: &MasterKey,
    scheme: EnvelopeScheme,
) -> Result<SecretEnvelope> {
    match scheme {
        EnvelopeScheme::Aes256Cbc => seal_cbc(plaintext.as_bytes(), key),
        EnvelopeScheme::Aes256Gcm => seal_gcm(plaintext.as_bytes(), key),
    }
}

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut out = [0u8; N];
    rand::rng().fill_bytes(&mut out);
    out
}

fn seal_cbc(plaintext: &[u8], key: &MasterKey) -> Result<SecretEnvelope> {
    let iv: [u8; CBC_IV_LEN] = random_bytes();
    let cipher = Aes256CbcEnc::new_from_slices(key.expose(), &iv)
        .map_err(|_| CoreError::InvalidKey("key must be exactly 32 bytes"))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    Ok(SecretEnvelope {
        ciphertext: hex::encode(ciphertext),
        iv: hex::encode(iv),
        tag: None,
        scheme: EnvelopeScheme::Aes256Cbc,
    })
}

fn seal_gcm(plaintext: &[u8], key: &MasterKey) -> Result<SecretEnvelope> {
    let nonce: [u8; GCM_NONCE_LEN] = random_bytes();
    let cipher = Aes256Gcm::new_from_slice(key.expose())
        .map_err(|_| CoreError::InvalidKey("key must be exactly 32 bytes"))?;

    // In-place so the only plaintext copy is one we zeroize
    let mut buf = Zeroizing::new(plaintext.to_vec());
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut buf[..])
        .map_err(|_| CoreError::Encryption("plaintext too long for AES-GCM"))?;

    Ok(SecretEnvelope {
        ciphertext: hex::encode(&buf[..]),
        iv: hex::encode(nonce),
        tag: Some(hex::encode(tag)),
        scheme: EnvelopeScheme::Aes256Gcm,
    })
}
