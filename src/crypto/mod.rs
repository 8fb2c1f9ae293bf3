// src/crypto/mod.rs
//! Pure cryptographic operations: no I/O, no database
//!
//! All functions take the key explicitly and work on in-memory buffers only.
//! Nothing in here logs.
mod decrypt;
mod encrypt;
mod rotate;

pub use decrypt::decrypt;
pub use encrypt::{encrypt, encrypt_with};
pub use rotate::reencrypt;
