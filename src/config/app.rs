// src/config/app.rs
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::defaults::*;
use crate::aliases::KeySpec;
use crate::consts::DEFAULT_CONFIG_FILE;
use crate::enums::EnvelopeScheme;
use crate::error::{CoreError, Result};
use crate::key_ops::MasterKey;

/// Path of the TOML config file
pub const CONFIG_ENV: &str = "CV_CONFIG";
/// Master key spec, overrides `keys.encryption_key`
pub const KEY_ENV: &str = "CV_ENCRYPTION_KEY";
/// Credential database path, overrides `paths.credential_db`
pub const DB_ENV: &str = "CV_CREDENTIAL_DB";
/// Envelope scheme for new writes, overrides `codec.scheme`
pub const SCHEME_ENV: &str = "CV_SCHEME";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_keys")]
    pub keys: Keys,
    #[serde(default = "default_paths")]
    pub paths: Paths,
    #[serde(default = "default_codec")]
    pub codec: Codec,
    #[serde(default = "default_features")]
    pub features: Features,
}

#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Keys {
    #[serde(default)]
    pub encryption_key: Option<String>,
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.encryption_key.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Keys").field("encryption_key", &shown).finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    pub credential_db: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Codec {
    #[serde(default)]
    pub scheme: EnvelopeScheme,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Features {
    #[serde(default)]
    pub use_dev_key: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keys: default_keys(),
            paths: default_paths(),
            codec: default_codec(),
            features: default_features(),
        }
    }
}

/// Load config at startup: `CV_CONFIG` (or `credential-vault.toml`), then env overrides
pub fn load() -> Result<Config> {
    let config_path =
        std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

    let mut conf = Config::from_path_or_default(Path::new(&config_path))?;
    conf.apply_env(|name| std::env::var(name).ok())?;
    Ok(conf)
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read `path` if it exists, otherwise fall back to built-in defaults
    pub fn from_path_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            warn!(path = %path.display(), "config file not found, using built-in defaults");
            Ok(Self::default())
        }
    }

    /// Apply overrides from an env-like lookup (injected so tests need not touch the process env)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(KEY_ENV) {
            self.keys.encryption_key = Some(key);
        }
        if let Some(db) = lookup(DB_ENV) {
            self.paths.credential_db = PathBuf::from(db);
        }
        if let Some(scheme) = lookup(SCHEME_ENV) {
            self.codec.scheme = scheme.parse()?;
        }
        Ok(())
    }

    /// The configured key spec, or the dev key when explicitly allowed
    pub fn key_spec(&self) -> Result<KeySpec> {
        match self.keys.encryption_key.as_deref() {
            Some(spec) if !spec.is_empty() => Ok(KeySpec::new(spec.to_owned())),
            _ if self.features.use_dev_key => {
                warn!("no encryption key configured, using the development key");
                Ok(KeySpec::new(DEV_ENCRYPTION_KEY.to_owned()))
            }
            _ => Err(CoreError::InvalidKey(
                "no encryption key configured (set CV_ENCRYPTION_KEY or keys.encryption_key)",
            )),
        }
    }

    /// Resolve and validate the master key; call once at startup and refuse to run on error
    pub fn master_key(&self) -> Result<MasterKey> {
        let spec = self.key_spec()?;
        MasterKey::parse(spec.expose_secret())
    }
}
