// src/db/credential_db_conn.rs
use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS credentials (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id          TEXT NOT NULL,
        username          TEXT NOT NULL DEFAULT 'Nothing',
        site_url          TEXT NOT NULL,
        email             TEXT NOT NULL,
        secret_ciphertext TEXT NOT NULL,
        secret_iv         TEXT NOT NULL,
        secret_tag        TEXT,
        scheme            TEXT NOT NULL DEFAULT 'aes-256-cbc',
        key_id            TEXT NOT NULL,
        created_at        TEXT NOT NULL,
        updated_at        TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_credentials_owner ON credentials(owner_id);
    CREATE INDEX IF NOT EXISTS idx_credentials_key_id ON credentials(key_id);
"#;

/// Open (creating if needed) the credential database at `path`
pub fn open_credential_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    debug!(path = %path.display(), "opening credential database");
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

/// Fresh in-memory database, used by tests and throwaway tooling
pub fn open_in_memory_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}
