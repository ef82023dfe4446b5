//! Entry-by-entry loading of the append-only sales log.
//!
//! A `sales.json` whose entries mostly parse must not lose its history
//! because one of them does not. [`SalesHistory`] keeps every stored entry
//! verbatim and exposes only the ones that deserialize as [`Sale`]; new
//! sales are appended after the verbatim entries, so a save never drops a
//! record it could not read.

use serde_json::Value;

use stockbook_core::{Sale, SalesLog};

use crate::error::StorageError;
use crate::traits::SnapshotStore;
use crate::types::Collection;

/// The sales log as stored, plus its readable subset.
#[derive(Debug, Clone, Default)]
pub struct SalesHistory {
    entries: Vec<Value>,
    sales: SalesLog,
    skipped: usize,
}

impl SalesHistory {
    /// Splits a raw sales snapshot into readable sales and kept entries.
    ///
    /// A top level that is not an array is treated like a corrupt snapshot:
    /// the history starts empty and the next save replaces it.
    pub fn from_raw(raw: Value) -> Self {
        let Value::Array(entries) = raw else {
            return SalesHistory::default();
        };

        let mut sales = SalesLog::with_capacity(entries.len());
        let mut skipped = 0;
        for (index, entry) in entries.iter().enumerate() {
            match serde_json::from_value::<Sale>(entry.clone()) {
                Ok(sale) => sales.push(sale),
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(index, error = %err, "keeping unreadable sale record as is");
                }
            }
        }
        SalesHistory {
            entries,
            sales,
            skipped,
        }
    }

    /// Sales that deserialized, in log order.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Every stored entry, readable or not. This is what gets saved.
    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    /// Number of stored entries that are not valid sale records.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Appends a new sale to both views.
    pub fn append(&mut self, sale: Sale) -> Result<(), StorageError> {
        self.entries.push(serde_json::to_value(&sale)?);
        self.sales.push(sale);
        Ok(())
    }
}

/// Loads the sales log through `store`, keeping unreadable entries.
pub fn load_sales<S: SnapshotStore>(store: &S) -> Result<SalesHistory, StorageError> {
    let raw: Value = store.load(Collection::Sales)?;
    Ok(SalesHistory::from_raw(raw))
}
