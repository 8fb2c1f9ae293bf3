// src/lib.rs
//! credential-vault: envelope encryption for stored site credentials
//!
//! Features:
//! - AES-256-CBC secret codec (hex `ciphertext` + `iv` envelope), AES-256-GCM opt-in
//! - Explicitly injected master key with atomic swap
//! - SQLite credential store: encrypt first, persist second
//! - All-or-nothing re-encryption sweep for key rotation
//! - Password strength rating and generation

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod db;
pub mod enums;
pub mod envelope;
pub mod error;
pub mod generator;
pub mod key_handle;
pub mod key_ops;
pub mod strength;

// Re-export everything users need at the crate root
pub use aliases::PlainSecret;
pub use config::{load as load_config, Config};
pub use crypto::{decrypt, encrypt, encrypt_with, reencrypt};
pub use db::{CredentialRecord, CredentialStore, CredentialUpdate, NewCredential, RotationReport};
pub use enums::EnvelopeScheme;
pub use envelope::SecretEnvelope;
pub use error::{CoreError, DecryptFailure, Result};
pub use generator::{generate as generate_password, GeneratorOptions};
pub use key_handle::KeyHandle;
pub use key_ops::{key_representations, KeyId, KeyRepr, MasterKey};
pub use strength::{check as check_strength, Strength};
