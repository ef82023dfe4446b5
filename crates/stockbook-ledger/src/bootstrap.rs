//! First-run seeding and service construction.
//!
//! [`Stockbook`] is built once per process. Opening it:
//! 1. creates any missing snapshot with its empty default (and the default
//!    admin account for `users.json`),
//! 2. opens the [`Ledger`], which migrates and if needed rewrites the
//!    catalog,
//! 3. hands back the ledger and the credential store, each owning its own
//!    handle onto the same storage.

use stockbook_core::{Catalog, SalesLog};
use stockbook_storage::{Collection, InMemoryStore, JsonFileStore, SnapshotStore};

use crate::clock::{Clock, SystemClock};
use crate::config::StockbookConfig;
use crate::credentials::CredentialStore;
use crate::error::LedgerError;
use crate::ledger::Ledger;

/// The ledger and credential services over one storage backend.
#[derive(Debug)]
pub struct Stockbook<S, C = SystemClock> {
    pub ledger: Ledger<S, C>,
    pub credentials: CredentialStore<S>,
}

impl Stockbook<JsonFileStore> {
    /// Opens the JSON snapshots under `config.data_dir`.
    pub fn open(config: &StockbookConfig) -> Result<Self, LedgerError> {
        let store = JsonFileStore::new(&config.data_dir)?;
        tracing::debug!(data_dir = %config.data_dir.display(), "opening stockbook");
        Self::with_store(store)
    }
}

impl Stockbook<InMemoryStore> {
    /// Opens a throwaway stockbook with nothing on disk.
    pub fn in_memory() -> Result<Self, LedgerError> {
        Self::with_store(InMemoryStore::new())
    }
}

impl<S: SnapshotStore + Clone> Stockbook<S> {
    pub fn with_store(store: S) -> Result<Self, LedgerError> {
        Self::with_store_and_clock(store, SystemClock)
    }
}

impl<S: SnapshotStore + Clone, C: Clock> Stockbook<S, C> {
    pub fn with_store_and_clock(mut store: S, clock: C) -> Result<Self, LedgerError> {
        seed_missing(&mut store)?;
        let mut credentials = CredentialStore::new(store.clone());
        credentials.seed_default()?;
        let ledger = Ledger::open_with_clock(store, clock)?;
        Ok(Stockbook {
            ledger,
            credentials,
        })
    }
}

/// Creates the inventory and sales snapshots if they do not exist yet.
fn seed_missing<S: SnapshotStore>(store: &mut S) -> Result<(), LedgerError> {
    if !store.contains(Collection::Inventory)? {
        store.save(Collection::Inventory, &Catalog::new())?;
        tracing::info!(collection = %Collection::Inventory, "created empty snapshot");
    }
    if !store.contains(Collection::Sales)? {
        store.save(Collection::Sales, &SalesLog::new())?;
        tracing::info!(collection = %Collection::Sales, "created empty snapshot");
    }
    Ok(())
}
