// src/bin/rotate_master_key.rs
//! Re-encrypt every stored credential under a new master key
//!
//! Current key: config / `CV_ENCRYPTION_KEY`.
//! New key: `CV_NEW_ENCRYPTION_KEY`, an interactive prompt, or `--generate`.
//! The sweep is all-or-nothing; on failure the database is left untouched.

use anyhow::{bail, Context, Result};
use credential_vault::{key_representations, load_config, CredentialStore, KeyHandle, MasterKey};
use rpassword::prompt_password;
use tracing::info;
use zeroize::Zeroizing;

const NEW_KEY_ENV: &str = "CV_NEW_ENCRYPTION_KEY";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let generate = match std::env::args().nth(1).as_deref() {
        None => false,
        Some("--generate") => true,
        Some(other) => bail!("unknown argument `{other}` (only --generate is supported)"),
    };

    let config = load_config().context("failed to load configuration")?;
    let current = config
        .master_key()
        .context("current master key is missing or invalid")?;
    info!(key_id = %current.id(), db = %config.paths.credential_db.display(), "opening credential store");

    let keys = KeyHandle::shared(current);
    let mut store = CredentialStore::from_config(&config, keys)
        .context("failed to open credential database")?;

    let new_key = if generate {
        let key = MasterKey::generate();
        let repr = key_representations(&key);
        println!("Generated new master key. Store it now, it is shown only once:");
        println!("  {}", repr.spec().as_str());
        key
    } else {
        let spec = match std::env::var(NEW_KEY_ENV) {
            Ok(spec) => Zeroizing::new(spec),
            Err(_) => Zeroizing::new(prompt_password("New master key: ")?),
        };
        MasterKey::parse(&spec).context("new master key is invalid")?
    };

    if new_key.id() == store.keys().current_id() {
        bail!("new key is identical to the current key");
    }

    let report = store
        .rotate_master_key(new_key)
        .context("re-encryption failed, no rows were changed")?;

    println!("\n=== ROTATION COMPLETE ===");
    println!("From key:  {}", report.from);
    println!("To key:    {}", report.to);
    println!("Rotated:   {}", report.rotated);
    println!("Skipped:   {}", report.skipped);
    if report.skipped > 0 {
        println!("Skipped rows were sealed under another key and remain unreadable with the new one.");
    }

    Ok(())
}
