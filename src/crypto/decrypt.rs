// src/crypto/decrypt.rs
use aes::Aes256;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use zeroize::Zeroizing;

use crate::aliases::PlainSecret;
use crate::consts::{BLOCK_LEN, GCM_TAG_LEN};
use crate::enums::EnvelopeScheme;
use crate::envelope::SecretEnvelope;
use crate::error::{CoreError, DecryptFailure, Result};
use crate::key_ops::MasterKey;

type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Decrypt an envelope → the original secret
///
/// Either the exact plaintext comes back or an error does; rejected
/// intermediate buffers are zeroized before returning.
pub fn decrypt(envelope: &SecretEnvelope, key: &MasterKey) -> Result<PlainSecret> {
    let iv = envelope.iv_bytes()?;
    let expected = envelope.scheme.iv_len();
    if iv.len() != expected {
        return Err(DecryptFailure::IvLength {
            expected,
            actual: iv.len(),
        }
        .into());
    }

    let ciphertext = envelope.ciphertext_bytes()?;
    let plaintext = match envelope.scheme {
        EnvelopeScheme::Aes256Cbc => open_cbc(&ciphertext, &iv, key)?,
        EnvelopeScheme::Aes256Gcm => {
            let tag = envelope.tag_bytes()?.ok_or(DecryptFailure::MissingTag)?;
            open_gcm(&ciphertext, &iv, &tag, key)?
        }
    };

    let text = std::str::from_utf8(&plaintext).map_err(|_| DecryptFailure::Utf8)?;
    Ok(PlainSecret::new(text.to_owned()))
}

fn open_cbc(ciphertext: &[u8], iv: &[u8], key: &MasterKey) -> Result<Zeroizing<Vec<u8>>> {
    // PKCS#7 always emits at least one block
    if ciphertext.is_empty() || !ciphertext.len().is_multiple_of(BLOCK_LEN) {
        return Err(DecryptFailure::BlockAlignment(ciphertext.len()).into());
    }

    let cipher = Aes256CbcDec::new_from_slices(key.expose(), iv)
        .map_err(|_| CoreError::InvalidKey("key must be exactly 32 bytes"))?;

    let mut buf = Zeroizing::new(ciphertext.to_vec());
    let len = cipher
        .decrypt_padded_mut::<Pkcs7>(&mut buf[..])
        .map_err(|_| DecryptFailure::Padding)?
        .len();
    buf.truncate(len);
    Ok(buf)
}

fn open_gcm(
    ciphertext: &[u8],
    nonce: &[u8],
    tag: &[u8],
    key: &MasterKey,
) -> Result<Zeroizing<Vec<u8>>> {
    if tag.len() != GCM_TAG_LEN {
        return Err(DecryptFailure::TagLength {
            expected: GCM_TAG_LEN,
            actual: tag.len(),
        }
        .into());
    }

    let cipher = Aes256Gcm::new_from_slice(key.expose())
        .map_err(|_| CoreError::InvalidKey("key must be exactly 32 bytes"))?;

    let mut buf = Zeroizing::new(ciphertext.to_vec());
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(nonce),
            b"",
            &mut buf[..],
            Tag::from_slice(tag),
        )
        .map_err(|_| DecryptFailure::Authentication)?;
    Ok(buf)
}
