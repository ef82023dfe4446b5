pub mod error;
pub mod id;
pub mod product;
pub mod sale;

// Re-export commonly used types
pub use error::CoreError;
pub use id::ProductId;
pub use product::{parse_price, parse_quantity, Catalog, Product, DEFAULT_CATEGORY, DEFAULT_NAME};
pub use sale::{Sale, SalesLog, SalesSummary, TIMESTAMP_FORMAT, TOP_SELLING_LIMIT};
