// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret-holding types used throughout credential-vault.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(KeyBytes32, 32); // 256-bit AES master key material

// Dynamic secrets
dynamic_alias!(PlainSecret, String); // Decrypted site password, zeroized on drop
dynamic_alias!(KeySpec, String); // Key as read from config/env, before parsing
