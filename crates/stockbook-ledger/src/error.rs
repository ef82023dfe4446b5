//! Ledger error types.
//!
//! Business-rule violations are ordinary values here, never panics: the
//! caller decides how to present them. Storage failures during a persist
//! are carried through unchanged.

use stockbook_core::{CoreError, ProductId};
use stockbook_storage::StorageError;
use thiserror::Error;

/// Errors produced by ledger and credential operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The operation referenced a product that is not in the catalog.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// `add` was called with an id that is already in the catalog.
    #[error("product already exists: {0}")]
    ProductExists(ProductId),

    /// `register` was called with a username that is already taken.
    #[error("user already exists: '{0}'")]
    UserExists(String),

    /// A sale asked for more units than are on hand.
    #[error("insufficient stock for {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: ProductId,
        requested: u32,
        available: u32,
    },

    /// A sale asked for zero units.
    #[error("sale quantity must be positive")]
    InvalidQuantity,

    /// Product fields failed validation.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// Persisting a snapshot failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
