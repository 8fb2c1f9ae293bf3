// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{Codec, Features, Keys, Paths};
use crate::enums::EnvelopeScheme;

/// Development-only key, used solely when `features.use_dev_key = true`
pub const DEV_ENCRYPTION_KEY: &str = "dev-only-credential-vault-key-32";

pub fn default_keys() -> Keys {
    Keys {
        encryption_key: None,
    }
}

pub fn default_paths() -> Paths {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Paths {
        credential_db: base.join("credential-vault").join("credentials.db"),
    }
}

pub fn default_codec() -> Codec {
    Codec {
        scheme: EnvelopeScheme::Aes256Cbc,
    }
}

pub fn default_features() -> Features {
    Features { use_dev_key: false }
}
