//! In-memory implementation of [`SnapshotStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and anywhere
//! persistence isn't needed. It keeps the same encoded bytes a file store
//! would write, so corrupt or legacy snapshots can be simulated exactly.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;
use crate::traits::SnapshotStore;
use crate::types::Collection;

/// In-memory implementation of [`SnapshotStore`].
///
/// Clones share the same backing map, mirroring how two handles to one data
/// directory see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    snapshots: Rc<RefCell<HashMap<Collection, Vec<u8>>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `collection` with raw bytes, bypassing serialization.
    pub fn with_snapshot(self, collection: Collection, bytes: impl Into<Vec<u8>>) -> Self {
        self.snapshots.borrow_mut().insert(collection, bytes.into());
        self
    }

    /// Returns the raw snapshot text of `collection`, if any.
    pub fn snapshot_text(&self, collection: Collection) -> Option<String> {
        self.snapshots
            .borrow()
            .get(&collection)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl SnapshotStore for InMemoryStore {
    fn read_snapshot(&self, collection: Collection) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.snapshots.borrow().get(&collection).cloned())
    }

    fn write_snapshot(&mut self, collection: Collection, bytes: &[u8]) -> Result<(), StorageError> {
        self.snapshots.borrow_mut().insert(collection, bytes.to_vec());
        Ok(())
    }
}
