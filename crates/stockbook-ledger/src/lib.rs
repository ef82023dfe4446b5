//! Inventory ledger and credential services for stockbook.
//!
//! [`Ledger`] owns the product catalog and sales log, [`CredentialStore`]
//! owns the username/password map. Both are explicit service objects built
//! over an injected [`stockbook_storage::SnapshotStore`], and every
//! mutation persists its full collection before returning.
//!
//! [`Stockbook`] wires them together the way the `stockbook` binary needs:
//! seed missing stores, migrate the catalog, then serve.

pub mod bootstrap;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod error;
pub mod ledger;

pub use bootstrap::Stockbook;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StockbookConfig;
pub use credentials::{CredentialMap, CredentialStore, DEFAULT_ADMIN};
pub use error::LedgerError;
pub use ledger::{Ledger, DEFAULT_LOW_STOCK_THRESHOLD};
