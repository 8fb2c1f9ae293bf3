// tests/support.rs
//! Test fixtures: keys and a throwaway on-disk credential store

use std::path::{Path, PathBuf};
use std::sync::Arc;

use credential_vault::{CredentialRecord, CredentialStore, KeyHandle, MasterKey, NewCredential};
use tempfile::TempDir;

/// 32 ASCII bytes, used as a raw key
#[allow(dead_code)]
pub const SCENARIO_KEY: &str = "01234567890123456789012345678901";
#[allow(dead_code)]
pub const OTHER_KEY: &str = "11111111111111111111111111111111";

#[allow(dead_code)]
pub fn scenario_key() -> MasterKey {
    MasterKey::parse(SCENARIO_KEY).expect("scenario key is 32 bytes")
}

#[allow(dead_code)]
pub fn other_key() -> MasterKey {
    MasterKey::parse(OTHER_KEY).expect("other key is 32 bytes")
}

#[allow(dead_code)] // Fields are used by some test files only
pub struct TestStore {
    pub store: CredentialStore,
    pub keys: Arc<KeyHandle>,
    db_path: PathBuf,
    _dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        Self::with_key(scenario_key())
    }

    pub fn with_key(key: MasterKey) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        // Nested path so the parent-directory creation is exercised too
        let db_path = dir.path().join("data").join("credentials.db");
        let keys = KeyHandle::shared(key);
        let store = CredentialStore::open(&db_path, Arc::clone(&keys)).expect("open store");
        Self {
            store,
            keys,
            db_path,
            _dir: dir,
        }
    }

    #[allow(dead_code)]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    #[allow(dead_code)]
    pub fn add(&self, owner: &str, site: &str, password: &str) -> CredentialRecord {
        self.store
            .add(&NewCredential::new(
                owner,
                site,
                format!("{owner}@example.com"),
                password,
            ))
            .expect("add credential")
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}
