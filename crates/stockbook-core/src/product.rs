//! Product records and the catalog that holds them.
//!
//! A [`Product`] is always fully populated: legacy snapshots with missing
//! fields are healed by the storage layer's migration step before a
//! `Product` is ever constructed from them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::ProductId;

/// Category assigned to products that never had one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Name assigned to legacy products that never had one.
pub const DEFAULT_NAME: &str = "Unknown";

/// The current set of products, keyed by id.
///
/// Iteration order is the order records were read or inserted. It carries
/// no meaning, but keeping it stable makes snapshots re-serialize verbatim.
pub type Catalog = IndexMap<ProductId, Product>;

/// A single catalog entry.
///
/// Field order here is the field order written to `inventory.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Unit price. Finite and non-negative.
    pub price: f64,
    /// On-hand stock.
    pub quantity: u32,
    pub category: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        category: impl Into<String>,
    ) -> Self {
        Product {
            name: name.into(),
            price,
            quantity,
            category: category.into(),
        }
    }

    /// Coerces raw text input into a product.
    ///
    /// Every field is trimmed. `name` and `category` must be non-empty,
    /// `price` must parse as a finite non-negative decimal and `quantity`
    /// as a non-negative integer.
    pub fn parse(
        name: &str,
        price: &str,
        quantity: &str,
        category: &str,
    ) -> Result<Self, CoreError> {
        let name = non_empty("name", name)?;
        let category = non_empty("category", category)?;
        let price = parse_price(price)?;
        let quantity = parse_quantity(quantity)?;
        Ok(Product {
            name,
            price,
            quantity,
            category,
        })
    }

    /// Checks the invariants the type system cannot express.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_price(self.price)
    }

    /// `price * quantity` for a sale of `quantity` units.
    pub fn total_for(&self, quantity: u32) -> f64 {
        self.price * f64::from(quantity)
    }
}

fn non_empty(field: &'static str, input: &str) -> Result<String, CoreError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Parses a price from user text.
pub fn parse_price(input: &str) -> Result<f64, CoreError> {
    let price: f64 = input
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidPrice {
            input: input.to_string(),
        })?;
    if !price.is_finite() {
        return Err(CoreError::InvalidPrice {
            input: input.to_string(),
        });
    }
    check_price(price)?;
    Ok(price)
}

/// Parses a stock or sale quantity from user text.
///
/// Negative integers are reported as [`CoreError::NegativeValue`] rather
/// than as unparsable input.
pub fn parse_quantity(input: &str) -> Result<u32, CoreError> {
    let signed: i64 = input
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidQuantity {
            input: input.to_string(),
        })?;
    if signed < 0 {
        return Err(CoreError::NegativeValue { field: "quantity" });
    }
    u32::try_from(signed).map_err(|_| CoreError::InvalidQuantity {
        input: input.to_string(),
    })
}

fn check_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() {
        return Err(CoreError::InvalidPrice {
            input: price.to_string(),
        });
    }
    if price < 0.0 {
        return Err(CoreError::NegativeValue { field: "price" });
    }
    Ok(())
}
