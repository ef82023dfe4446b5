//! Snapshot persistence for the stockbook catalog, sales log and credentials.
//!
//! Provides the [`SnapshotStore`] trait defining the storage contract that
//! all backends implement, plus [`JsonFileStore`] and [`InMemoryStore`] as
//! first-class backends.
//!
//! # Architecture
//!
//! The storage layer has a two-layer API:
//! - **Low-level** methods (`read_snapshot`, `write_snapshot`) move raw
//!   bytes for one whole collection.
//! - **High-level** methods (`load`, `save`) add JSON (de)serialization and
//!   substitute an empty default for absent or corrupt snapshots.
//!
//! Every save rewrites the entire collection. There are no partial updates.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: the closed set of persisted collections
//! - [`traits`]: SnapshotStore trait definition
//! - [`file`]: JsonFileStore, one JSON file per collection
//! - [`memory`]: InMemoryStore implementation
//! - [`migration`]: load-time backfill of legacy catalog records
//! - [`sales`]: sales log loading that keeps unreadable records

pub mod error;
pub mod file;
pub mod memory;
pub mod migration;
pub mod sales;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use migration::{load_catalog, migrate_catalog, FieldFix, FixKind, MigratedCatalog, MigrationReport};
pub use sales::{load_sales, SalesHistory};
pub use traits::SnapshotStore;
pub use types::Collection;
