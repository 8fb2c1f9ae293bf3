// src/db/mod.rs
//! SQLite-backed credential store
//!
//! The store owns credential rows; the codec owns the envelope inside each
//! row. Writes always encrypt first and persist second, in separate steps.

pub mod credential_db_conn;
pub mod credential_db_ops;
pub mod records;

pub use credential_db_conn::{open_credential_db, open_in_memory_db};
pub use credential_db_ops::CredentialStore;
pub use records::{CredentialRecord, CredentialUpdate, NewCredential, RotationReport};
