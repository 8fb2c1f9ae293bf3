// src/consts.rs
//! Shared constants: cipher parameters and defaults

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

/// AES block size; CBC IVs and ciphertexts are multiples of this
pub const BLOCK_LEN: usize = 16;

/// CBC initialization vector length
pub const CBC_IV_LEN: usize = 16;

/// AES-GCM nonce length (96 bits)
pub const GCM_NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length (128 bits)
pub const GCM_TAG_LEN: usize = 16;

/// Number of fingerprint bytes kept in a key id (16 hex chars)
pub const KEY_ID_LEN: usize = 8;

/// blake3 derive_key context for key fingerprints
pub const KEY_ID_CONTEXT: &str = "credential-vault 2024-06 master key fingerprint";

/// Username stored when the caller gives none
pub const DEFAULT_USERNAME: &str = "Nothing";

/// Default config file name, overridable with `CV_CONFIG`
pub const DEFAULT_CONFIG_FILE: &str = "credential-vault.toml";

/// Upper bound for generated passwords
pub const MAX_GENERATED_LEN: usize = 256;
