//! Sale records and the sales-summary report.
//!
//! A [`Sale`] captures the product name and unit price at the moment of the
//! sale, so later catalog edits never rewrite history.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::id::ProductId;
use crate::product::Product;

/// Wall-clock format used for sale timestamps in `sales.json`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of sale records reported in [`SalesSummary::top_selling`].
pub const TOP_SELLING_LIMIT: usize = 5;

/// Append-only history of completed sales, oldest first.
pub type SalesLog = Vec<Sale>;

/// One completed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    /// Unit price at sale time.
    pub price: f64,
    pub total: f64,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
}

impl Sale {
    /// Records the sale of `quantity` units of `product` at `at`.
    ///
    /// Sub-second precision is dropped so the in-memory record equals what
    /// a reload of `sales.json` produces.
    pub fn record(id: &ProductId, product: &Product, quantity: u32, at: NaiveDateTime) -> Self {
        Sale {
            product_id: id.clone(),
            name: product.name.clone(),
            quantity,
            price: product.price,
            total: product.total_for(quantity),
            timestamp: at.with_nanosecond(0).unwrap_or(at),
        }
    }
}

/// Aggregate report over the sales log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub transaction_count: usize,
    pub total_revenue: f64,
    /// The largest individual sales by quantity, not aggregated per product.
    pub top_selling: Vec<Sale>,
}

impl SalesSummary {
    pub fn from_sales(sales: &[Sale]) -> Self {
        let total_revenue = sales.iter().map(|sale| sale.total).sum();

        // `sort_by` is stable: equal quantities keep chronological order.
        let mut ranked: Vec<&Sale> = sales.iter().collect();
        ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        let top_selling = ranked
            .into_iter()
            .take(TOP_SELLING_LIMIT)
            .cloned()
            .collect();

        SalesSummary {
            transaction_count: sales.len(),
            total_revenue,
            top_selling,
        }
    }
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
