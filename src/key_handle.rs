// src/key_handle.rs
//! Process-wide holder for the current master key
//!
//! Readers take an `Arc` snapshot at the start of each operation, so a
//! [`KeyHandle::swap`] is visible to every later call while in-flight calls
//! finish with the key they captured.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::key_ops::{KeyId, MasterKey};

#[derive(Debug)]
pub struct KeyHandle {
    current: RwLock<Arc<MasterKey>>,
}

impl KeyHandle {
    pub fn new(key: MasterKey) -> Self {
        Self {
            current: RwLock::new(Arc::new(key)),
        }
    }

    /// Convenience for the common "one handle shared by the whole process" case
    pub fn shared(key: MasterKey) -> Arc<Self> {
        Arc::new(Self::new(key))
    }

    /// Snapshot of the key in effect right now
    pub fn current(&self) -> Arc<MasterKey> {
        Arc::clone(&*self.current.read())
    }

    pub fn current_id(&self) -> KeyId {
        self.current.read().id()
    }

    /// Atomically install `next`, returning the key it replaced
    pub fn swap(&self, next: MasterKey) -> Arc<MasterKey> {
        let next = Arc::new(next);
        let next_id = next.id();
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!(from = %previous.id(), to = %next_id, "master key swapped");
        previous
    }
}
