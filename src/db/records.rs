// src/db/records.rs
//! Credential row types
//!
//! A record only ever holds the sealed envelope. Plaintext enters through
//! [`NewCredential`] / `update_secret` and leaves through `reveal`.

use chrono::{DateTime, Utc};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::DEFAULT_USERNAME;
use crate::envelope::SecretEnvelope;
use crate::key_ops::KeyId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: i64,
    pub owner_id: String,
    pub username: String,
    pub site_url: String,
    pub email: String,
    pub secret: SecretEnvelope,
    /// Fingerprint of the key that sealed `secret`
    pub key_id: KeyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`crate::db::CredentialStore::add`]; wiped on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct NewCredential {
    pub owner_id: String,
    pub site_url: String,
    pub email: String,
    pub username: Option<String>,
    pub password: String,
}

impl NewCredential {
    pub fn new(
        owner_id: impl Into<String>,
        site_url: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            site_url: site_url.into(),
            email: email.into(),
            username: None,
            password: password.into(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub(crate) fn username_or_default(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_USERNAME,
        }
    }
}

/// Partial metadata update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialUpdate {
    pub username: Option<String>,
    pub site_url: Option<String>,
    pub email: Option<String>,
}

/// Outcome of a bulk re-encryption sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationReport {
    pub from: KeyId,
    pub to: KeyId,
    /// Envelopes re-sealed under the new key
    pub rotated: usize,
    /// Rows sealed under some other key, left untouched
    pub skipped: usize,
}
