// src/db/credential_db_ops.rs
//! Credential CRUD and key-rotation workflows
//!
//! Every operation is scoped by owner id: a row belonging to someone else is
//! reported as `NotFound`, exactly like a missing row.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use tracing::{debug, info, warn};

use crate::aliases::PlainSecret;
use crate::config::Config;
use crate::consts::DEFAULT_USERNAME;
use crate::crypto::{decrypt, encrypt_with, reencrypt};
use crate::enums::EnvelopeScheme;
use crate::envelope::SecretEnvelope;
use crate::error::{CoreError, DecryptFailure, Result};
use crate::key_handle::KeyHandle;
use crate::key_ops::{KeyId, MasterKey};

use super::credential_db_conn::{open_credential_db, open_in_memory_db};
use super::records::{CredentialRecord, CredentialUpdate, NewCredential, RotationReport};

const RECORD_COLUMNS: &str = "id, owner_id, username, site_url, email, \
     secret_ciphertext, secret_iv, secret_tag, scheme, key_id, created_at, updated_at";

pub struct CredentialStore {
    conn: Connection,
    keys: Arc<KeyHandle>,
    scheme: EnvelopeScheme,
}

impl CredentialStore {
    pub fn new(conn: Connection, keys: Arc<KeyHandle>) -> Self {
        Self {
            conn,
            keys,
            scheme: EnvelopeScheme::default(),
        }
    }

    pub fn open<P: AsRef<Path>>(path: P, keys: Arc<KeyHandle>) -> Result<Self> {
        Ok(Self::new(open_credential_db(path.as_ref())?, keys))
    }

    pub fn open_in_memory(keys: Arc<KeyHandle>) -> Result<Self> {
        Ok(Self::new(open_in_memory_db()?, keys))
    }

    /// Open the database named by `config`, writing with its configured scheme
    pub fn from_config(config: &Config, keys: Arc<KeyHandle>) -> Result<Self> {
        Ok(Self::open(&config.paths.credential_db, keys)?.with_scheme(config.codec.scheme))
    }

    /// Scheme used for new and re-sealed envelopes; existing rows keep theirs until rewritten
    pub fn with_scheme(mut self, scheme: EnvelopeScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn scheme(&self) -> EnvelopeScheme {
        self.scheme
    }

    pub fn keys(&self) -> &Arc<KeyHandle> {
        &self.keys
    }

    /// Encrypt the secret, then insert the row
    pub fn add(&self, new: &NewCredential) -> Result<CredentialRecord> {
        require(&new.owner_id, "owner id is required")?;
        require(&new.site_url, "site url is required")?;
        require(&new.email, "email is required")?;

        let key = self.keys.current();
        let secret = encrypt_with(&new.password, &key, self.scheme)?;
        let now = Utc::now();

        self.conn.execute(
            "INSERT INTO credentials (
                owner_id, username, site_url, email,
                secret_ciphertext, secret_iv, secret_tag, scheme, key_id,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
            params![
                new.owner_id,
                new.username_or_default(),
                new.site_url,
                new.email,
                secret.ciphertext,
                secret.iv,
                secret.tag,
                secret.scheme.as_str(),
                key.id().to_hex(),
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(credential_id = id, owner_id = %new.owner_id, key_id = %key.id(), "stored credential");

        Ok(CredentialRecord {
            id,
            owner_id: new.owner_id.clone(),
            username: new.username_or_default().to_owned(),
            site_url: new.site_url.clone(),
            email: new.email.clone(),
            secret,
            key_id: key.id(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get(&self, owner_id: &str, id: i64) -> Result<CredentialRecord> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "SELECT {RECORD_COLUMNS} FROM credentials WHERE id = ?1 AND owner_id = ?2"
                ),
                params![id, owner_id],
                StoredRow::from_row,
            )
            .optional()?;
        row.ok_or(CoreError::NotFound(id))?.into_record()
    }

    /// All of one owner's readable credentials, oldest first.
    ///
    /// A row whose envelope metadata cannot be interpreted (unknown scheme,
    /// malformed key id) is left out with a warning; `get` on its id still
    /// reports the unreadable-secret error.
    pub fn list(&self, owner_id: &str) -> Result<Vec<CredentialRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM credentials WHERE owner_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
            .query_map([owner_id], StoredRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id;
            match row.into_record() {
                Ok(record) => records.push(record),
                Err(e) if e.is_unreadable_secret() => {
                    warn!(credential_id = id, owner_id, error = %e, "skipping unreadable credential");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }

    /// Fetch, then decrypt under the current key
    pub fn reveal(&self, owner_id: &str, id: i64) -> Result<PlainSecret> {
        let record = self.get(owner_id, id)?;
        let key = self.keys.current();
        if record.key_id != key.id() {
            return Err(DecryptFailure::KeyMismatch {
                stored: record.key_id,
                current: key.id(),
            }
            .into());
        }
        decrypt(&record.secret, &key)
    }

    /// Replace the secret: fresh IV, fresh ciphertext, current key
    pub fn update_secret(&self, owner_id: &str, id: i64, plaintext: &str) -> Result<CredentialRecord> {
        // Ownership check before spending entropy
        self.get(owner_id, id)?;

        let key = self.keys.current();
        let secret = encrypt_with(plaintext, &key, self.scheme)?;
        let changed = self.conn.execute(
            "UPDATE credentials
             SET secret_ciphertext = ?1, secret_iv = ?2, secret_tag = ?3,
                 scheme = ?4, key_id = ?5, updated_at = ?6
             WHERE id = ?7 AND owner_id = ?8",
            params![
                secret.ciphertext,
                secret.iv,
                secret.tag,
                secret.scheme.as_str(),
                key.id().to_hex(),
                Utc::now(),
                id,
                owner_id,
            ],
        )?;
        if changed == 0 {
            return Err(CoreError::NotFound(id));
        }
        debug!(credential_id = id, owner_id, "replaced credential secret");
        self.get(owner_id, id)
    }

    pub fn update_details(
        &self,
        owner_id: &str,
        id: i64,
        update: &CredentialUpdate,
    ) -> Result<CredentialRecord> {
        let current = self.get(owner_id, id)?;

        let site_url = update.site_url.as_deref().unwrap_or(&current.site_url);
        let email = update.email.as_deref().unwrap_or(&current.email);
        let username = match update.username.as_deref() {
            Some(name) if name.trim().is_empty() => DEFAULT_USERNAME,
            Some(name) => name,
            None => current.username.as_str(),
        };
        require(site_url, "site url is required")?;
        require(email, "email is required")?;

        self.conn.execute(
            "UPDATE credentials
             SET username = ?1, site_url = ?2, email = ?3, updated_at = ?4
             WHERE id = ?5 AND owner_id = ?6",
            params![username, site_url, email, Utc::now(), id, owner_id],
        )?;
        debug!(credential_id = id, owner_id, "updated credential details");
        self.get(owner_id, id)
    }

    /// Remove the row and the envelope with it
    pub fn delete(&self, owner_id: &str, id: i64) -> Result<()> {
        let removed = self.conn.execute(
            "DELETE FROM credentials WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        if removed == 0 {
            return Err(CoreError::NotFound(id));
        }
        debug!(credential_id = id, owner_id, "deleted credential");
        Ok(())
    }

    /// Total rows across all owners
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM credentials", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Re-seal every envelope sealed under `old` so that it opens under `new`.
    ///
    /// Runs in one IMMEDIATE transaction, so concurrent writers wait on the
    /// busy handler instead of racing the sweep. If any envelope fails to
    /// open, nothing is written. Rows sealed under any other key are counted
    /// as skipped, which makes a repeated sweep a no-op.
    pub fn reencrypt_all(&mut self, old: &MasterKey, new: &MasterKey) -> Result<RotationReport> {
        let scheme = self.scheme;
        let old_id = old.id().to_hex();
        let new_id = new.id().to_hex();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows = {
            let mut stmt = tx.prepare(&format!("SELECT {RECORD_COLUMNS} FROM credentials ORDER BY id"))?;
            let rows = stmt
                .query_map([], StoredRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        let mut report = RotationReport {
            from: old.id(),
            to: new.id(),
            rotated: 0,
            skipped: 0,
        };
        let now = Utc::now();

        for row in rows {
            if row.key_id != old_id {
                report.skipped += 1;
                continue;
            }

            let id = row.id;
            let envelope = row.envelope()?;
            let sealed = reencrypt(&envelope, old, new, scheme).inspect_err(|e| {
                warn!(credential_id = id, error = %e, "re-encryption failed, rolling back sweep");
            })?;

            tx.execute(
                "UPDATE credentials
                 SET secret_ciphertext = ?1, secret_iv = ?2, secret_tag = ?3,
                     scheme = ?4, key_id = ?5, updated_at = ?6
                 WHERE id = ?7",
                params![
                    sealed.ciphertext,
                    sealed.iv,
                    sealed.tag,
                    sealed.scheme.as_str(),
                    new_id,
                    now,
                    id,
                ],
            )?;
            report.rotated += 1;
        }

        tx.commit()?;
        info!(
            from = %report.from,
            to = %report.to,
            rotated = report.rotated,
            skipped = report.skipped,
            "re-encryption sweep committed"
        );
        Ok(report)
    }

    /// Sweep every envelope onto `new`, then make `new` the current key.
    ///
    /// The swap happens after commit. Another store sharing this
    /// `KeyHandle` can still seal a row under the old key between the two
    /// steps; such a row reports `KeyMismatch` and is picked up by a second
    /// `reencrypt_all(old, new)`.
    pub fn rotate_master_key(&mut self, new: MasterKey) -> Result<RotationReport> {
        let old = self.keys.current();
        let report = self.reencrypt_all(&old, &new)?;
        self.keys.swap(new);
        Ok(report)
    }
}

fn require(value: &str, message: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidRecord(message));
    }
    Ok(())
}

/// Raw column values; conversion into typed fields happens outside the row callback
struct StoredRow {
    id: i64,
    owner_id: String,
    username: String,
    site_url: String,
    email: String,
    ciphertext: String,
    iv: String,
    tag: Option<String>,
    scheme: String,
    key_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            username: row.get(2)?,
            site_url: row.get(3)?,
            email: row.get(4)?,
            ciphertext: row.get(5)?,
            iv: row.get(6)?,
            tag: row.get(7)?,
            scheme: row.get(8)?,
            key_id: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }

    fn envelope(&self) -> Result<SecretEnvelope> {
        Ok(SecretEnvelope {
            ciphertext: self.ciphertext.clone(),
            iv: self.iv.clone(),
            tag: self.tag.clone(),
            scheme: self
                .scheme
                .parse()
                .map_err(|_| DecryptFailure::UnknownScheme)?,
        })
    }

    fn into_record(self) -> Result<CredentialRecord> {
        let secret = self.envelope()?;
        let key_id: KeyId = self.key_id.parse()?;
        Ok(CredentialRecord {
            id: self.id,
            owner_id: self.owner_id,
            username: self.username,
            site_url: self.site_url,
            email: self.email,
            secret,
            key_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
