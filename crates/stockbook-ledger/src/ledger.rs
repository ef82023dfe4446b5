//! The inventory ledger: catalog CRUD, sales and reports.
//!
//! [`Ledger`] is the single owner of the in-memory catalog and sales log.
//! Every mutating operation performs a read-modify-write against that state
//! and then synchronously persists the whole affected collection.

use stockbook_core::{Catalog, Product, ProductId, Sale, SalesSummary};
use stockbook_storage::{
    load_catalog, load_sales, Collection, MigrationReport, SalesHistory, SnapshotStore,
};

use crate::clock::{Clock, SystemClock};
use crate::error::LedgerError;

/// Products with fewer units than this are reported by `low_stock` when the
/// caller has no threshold of its own.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Catalog and sales log backed by a snapshot store.
///
/// There is no rollback: if a persist fails after the in-memory change was
/// made, the error is returned and memory stays ahead of the store.
#[derive(Debug)]
pub struct Ledger<S, C = SystemClock> {
    store: S,
    clock: C,
    catalog: Catalog,
    sales: SalesHistory,
    migration: MigrationReport,
}

impl<S: SnapshotStore> Ledger<S, SystemClock> {
    /// Opens the ledger over `store` using the local clock.
    pub fn open(store: S) -> Result<Self, LedgerError> {
        Self::open_with_clock(store, SystemClock)
    }
}

impl<S: SnapshotStore, C: Clock> Ledger<S, C> {
    /// Opens the ledger, migrating the stored catalog first.
    ///
    /// A catalog that needed migration is rewritten before this returns.
    pub fn open_with_clock(mut store: S, clock: C) -> Result<Self, LedgerError> {
        let migrated = load_catalog(&mut store)?;
        let sales = load_sales(&store)?;
        tracing::debug!(
            products = migrated.catalog.len(),
            sales = sales.sales().len(),
            skipped_sales = sales.skipped(),
            "ledger opened"
        );
        Ok(Ledger {
            store,
            clock,
            catalog: migrated.catalog,
            sales,
            migration: migrated.report,
        })
    }

    // -------------------------------------------------------------------
    // Catalog mutations
    // -------------------------------------------------------------------

    /// Inserts a new product.
    ///
    /// Fails with [`LedgerError::ProductExists`] without touching state if
    /// `id` is already present.
    pub fn add(&mut self, id: impl Into<ProductId>, product: Product) -> Result<(), LedgerError> {
        let id = id.into();
        if self.catalog.contains_key(&id) {
            return Err(LedgerError::ProductExists(id));
        }
        product.validate()?;

        tracing::info!(%id, name = %product.name, quantity = product.quantity, "product added");
        self.catalog.insert(id, product);
        self.persist_catalog()
    }

    /// Replaces an existing product wholesale.
    pub fn update(&mut self, id: &str, product: Product) -> Result<(), LedgerError> {
        let slot = self
            .catalog
            .get_mut(id)
            .ok_or_else(|| LedgerError::NotFound(ProductId::from(id)))?;
        product.validate()?;

        tracing::info!(%id, name = %product.name, quantity = product.quantity, "product updated");
        *slot = product;
        self.persist_catalog()
    }

    /// Removes a product. Past sales of it stay in the log.
    pub fn delete(&mut self, id: &str) -> Result<(), LedgerError> {
        if self.catalog.shift_remove(id).is_none() {
            return Err(LedgerError::NotFound(ProductId::from(id)));
        }
        tracing::info!(%id, "product deleted");
        self.persist_catalog()
    }

    /// Sells `quantity` units of `id`.
    ///
    /// On success the stock is decremented, a [`Sale`] stamped with the
    /// current time is appended, and both catalog and sales log are
    /// persisted. Any failure leaves both untouched.
    pub fn sell(&mut self, id: &str, quantity: u32) -> Result<Sale, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        let now = self.clock.now();
        let (_, key, product) = self
            .catalog
            .get_full_mut(id)
            .ok_or_else(|| LedgerError::NotFound(ProductId::from(id)))?;
        if product.quantity < quantity {
            return Err(LedgerError::InsufficientStock {
                id: key.clone(),
                requested: quantity,
                available: product.quantity,
            });
        }

        let sale = Sale::record(key, product, quantity, now);
        self.sales.append(sale.clone())?;
        product.quantity -= quantity;
        tracing::info!(
            %id,
            quantity,
            total = sale.total,
            remaining = product.quantity,
            "sale recorded"
        );

        self.persist_catalog()?;
        self.store.save(Collection::Sales, self.sales.entries())?;
        Ok(sale)
    }

    // -------------------------------------------------------------------
    // Reads and reports
    // -------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.catalog.get(id)
    }

    pub fn sales(&self) -> &[Sale] {
        self.sales.sales()
    }

    /// Stored sales entries that could not be read. They are kept in the
    /// snapshot but left out of [`Ledger::sales`] and the summary.
    pub fn skipped_sales(&self) -> usize {
        self.sales.skipped()
    }

    /// What the load-time migration changed when this ledger was opened.
    pub fn migration(&self) -> &MigrationReport {
        &self.migration
    }

    /// Products with strictly fewer than `threshold` units on hand.
    pub fn low_stock(&self, threshold: u32) -> Catalog {
        self.catalog
            .iter()
            .filter(|(_, product)| product.quantity < threshold)
            .map(|(id, product)| (id.clone(), product.clone()))
            .collect()
    }

    pub fn sales_summary(&self) -> SalesSummary {
        SalesSummary::from_sales(self.sales.sales())
    }

    fn persist_catalog(&mut self) -> Result<(), LedgerError> {
        self.store.save(Collection::Inventory, &self.catalog)?;
        Ok(())
    }
}
