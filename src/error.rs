// src/error.rs
//! Public error type for the entire crate
//!
//! No variant ever carries plaintext, key bytes, or intermediate buffers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid encryption key: {0}")]
    InvalidKey(&'static str),

    #[error("encryption failed: {0}")]
    Encryption(&'static str),

    #[error("decryption failed: {0}")]
    Decryption(DecryptFailure),

    #[error("envelope field `{field}` is not valid hex: {source}")]
    Encoding {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid envelope JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("credential {0} not found")]
    NotFound(i64),

    #[error("invalid credential: {0}")]
    InvalidRecord(&'static str),

    #[error("invalid generator options: {0}")]
    InvalidOptions(&'static str),
}

impl CoreError {
    /// True when a stored secret could not be turned back into plaintext,
    /// whether the envelope was malformed or failed to open.
    pub fn is_unreadable_secret(&self) -> bool {
        matches!(self, Self::Decryption(_) | Self::Encoding { .. })
    }
}

impl From<DecryptFailure> for CoreError {
    fn from(failure: DecryptFailure) -> Self {
        CoreError::Decryption(failure)
    }
}

/// Why an envelope was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecryptFailure {
    #[error("iv must be {expected} bytes, got {actual}")]
    IvLength { expected: usize, actual: usize },

    #[error("ciphertext length {0} is not a positive multiple of the block size")]
    BlockAlignment(usize),

    #[error("invalid padding (wrong key or tampered data)")]
    Padding,

    #[error("authentication tag mismatch (wrong key or tampered data)")]
    Authentication,

    #[error("authenticated envelope has no tag")]
    MissingTag,

    #[error("tag must be {expected} bytes, got {actual}")]
    TagLength { expected: usize, actual: usize },

    #[error("decrypted bytes are not valid UTF-8")]
    Utf8,

    #[error("envelope names a scheme this build does not know")]
    UnknownScheme,

    #[error("envelope was sealed under key {stored}, current key is {current}")]
    KeyMismatch {
        stored: crate::key_ops::KeyId,
        current: crate::key_ops::KeyId,
    },
}
