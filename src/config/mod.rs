// src/config/mod.rs
//! Configuration system for credential-vault
//!
//! TOML file + env overrides, loaded once by the host process at startup.
//! The key it resolves is handed to the store explicitly; nothing here is global.

pub use app::{
    load, Codec, Config, Features, Keys, Paths, CONFIG_ENV, DB_ENV, KEY_ENV, SCHEME_ENV,
};
pub use defaults::DEV_ENCRYPTION_KEY;

mod app;
mod defaults;
