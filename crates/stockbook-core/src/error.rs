//! Core error types for stockbook-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering
//! malformed caller input. These are rejected before any ledger state is
//! touched.

use thiserror::Error;

/// Validation errors produced while coercing or checking product input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A required text field was empty after trimming.
    #[error("field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// A price could not be parsed or was not a finite number.
    #[error("invalid price: '{input}'")]
    InvalidPrice { input: String },

    /// A quantity could not be parsed as an integer.
    #[error("invalid quantity: '{input}'")]
    InvalidQuantity { input: String },

    /// A numeric field that must be non-negative was negative.
    #[error("field '{field}' must not be negative")]
    NegativeValue { field: &'static str },
}
