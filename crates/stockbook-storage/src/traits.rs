//! The [`SnapshotStore`] trait defining the storage contract for collections.
//!
//! Two-layer API design:
//! - **Low-level** methods form the trait foundation. Each call reads or
//!   replaces exactly one whole collection image.
//! - **High-level** methods (`load`, `save`) are provided on top of them and
//!   handle JSON encoding plus default substitution.
//!
//! All backends (JsonFileStore, InMemoryStore) implement this trait,
//! ensuring they are fully swappable without changing ledger logic.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::types::Collection;

/// Indentation of persisted snapshots, matching the legacy JSON files.
const SNAPSHOT_INDENT: &[u8] = b"    ";

/// The storage contract for whole-collection snapshots.
///
/// The trait is synchronous for the single-threaded, single-process model:
/// there is no locking, and concurrent writers lose updates.
pub trait SnapshotStore {
    // -------------------------------------------------------------------
    // Low-level snapshot I/O
    // -------------------------------------------------------------------

    /// Reads the raw snapshot of `collection`.
    ///
    /// Returns `Ok(None)` when the collection has never been written.
    fn read_snapshot(&self, collection: Collection) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the snapshot of `collection` with `bytes`.
    ///
    /// A subsequent read observes either the previous image or `bytes`,
    /// never a mix of the two.
    fn write_snapshot(&mut self, collection: Collection, bytes: &[u8]) -> Result<(), StorageError>;

    /// Returns true if `collection` has a stored snapshot.
    fn contains(&self, collection: Collection) -> Result<bool, StorageError> {
        Ok(self.read_snapshot(collection)?.is_some())
    }

    // -------------------------------------------------------------------
    // High-level convenience methods
    // -------------------------------------------------------------------

    /// Loads and deserializes `collection`.
    ///
    /// An absent snapshot, or one whose content does not parse as `T`,
    /// yields `T::default()`. Only genuine I/O failures are errors.
    fn load<T>(&self, collection: Collection) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(bytes) = self.read_snapshot(collection)? else {
            tracing::debug!(%collection, "no snapshot, using empty default");
            return Ok(T::default());
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(%collection, error = %err, "unparsable snapshot, using empty default");
                Ok(T::default())
            }
        }
    }

    /// Serializes `value` and overwrites the whole snapshot of `collection`.
    fn save<T>(&mut self, collection: Collection, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + ?Sized,
    {
        let bytes = encode_snapshot(value)?;
        tracing::debug!(%collection, bytes = bytes.len(), "writing snapshot");
        self.write_snapshot(collection, &bytes)
    }
}

/// Encodes `value` the way every snapshot is written: pretty JSON with a
/// four-space indent.
pub fn encode_snapshot<T>(value: &T) -> Result<Vec<u8>, StorageError>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(SNAPSHOT_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
