//! Load-time schema migration for the product catalog.
//!
//! Legacy `inventory.json` files predate some fields (`price`, `category`)
//! and may hold hand-edited garbage. [`migrate_catalog`] turns the raw JSON
//! into a fully typed [`Catalog`], and [`load_catalog`] writes the healed
//! snapshot back before anything else reads it.

use serde_json::{Map, Value};

use stockbook_core::{Catalog, Product, ProductId, DEFAULT_CATEGORY, DEFAULT_NAME};

use crate::error::StorageError;
use crate::traits::SnapshotStore;
use crate::types::Collection;

/// Fields every catalog record must carry, in snapshot order.
const REQUIRED_FIELDS: [&str; 4] = ["name", "price", "quantity", "category"];

/// How a single field of a legacy record was repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixKind {
    /// The field was absent and received its default.
    Missing,
    /// The field had an unusable value and was replaced by its default.
    Invalid,
    /// The field held an integral float where an integer belongs.
    Coerced,
}

/// One repaired field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFix {
    pub id: ProductId,
    pub field: &'static str,
    pub kind: FixKind,
}

/// What a migration pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub fixes: Vec<FieldFix>,
    /// Entries that were not record-shaped and were dropped.
    pub dropped: Vec<ProductId>,
    /// Records that carried fields outside the schema.
    pub stripped: Vec<ProductId>,
}

impl MigrationReport {
    /// True if the migrated catalog no longer matches the raw snapshot.
    pub fn changed(&self) -> bool {
        !self.fixes.is_empty() || !self.dropped.is_empty() || !self.stripped.is_empty()
    }
}

/// Result of [`migrate_catalog`].
#[derive(Debug, Clone)]
pub struct MigratedCatalog {
    pub catalog: Catalog,
    pub report: MigrationReport,
}

/// Normalizes a raw catalog snapshot into typed records.
///
/// A top level that is not an object is treated like a corrupt snapshot and
/// yields an empty catalog with an unchanged report.
pub fn migrate_catalog(raw: Value) -> MigratedCatalog {
    let mut report = MigrationReport::default();
    let mut catalog = Catalog::new();

    let Value::Object(entries) = raw else {
        return MigratedCatalog { catalog, report };
    };

    for (key, details) in entries {
        let id = ProductId::new(key);
        let Value::Object(fields) = details else {
            report.dropped.push(id);
            continue;
        };
        if fields.keys().any(|k| !REQUIRED_FIELDS.contains(&k.as_str())) {
            report.stripped.push(id.clone());
        }
        let product = migrate_record(&id, &fields, &mut report);
        catalog.insert(id, product);
    }

    MigratedCatalog { catalog, report }
}

fn migrate_record(id: &ProductId, fields: &Map<String, Value>, report: &mut MigrationReport) -> Product {
    let mut fix = |field: &'static str, kind: FixKind| {
        report.fixes.push(FieldFix {
            id: id.clone(),
            field,
            kind,
        });
    };

    let name = match fields.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            fix("name", FixKind::Invalid);
            DEFAULT_NAME.to_string()
        }
        None => {
            fix("name", FixKind::Missing);
            DEFAULT_NAME.to_string()
        }
    };

    let price = match fields.get("price") {
        Some(value) => match value.as_f64() {
            Some(price) if price.is_finite() && price >= 0.0 => price,
            _ => {
                fix("price", FixKind::Invalid);
                0.0
            }
        },
        None => {
            fix("price", FixKind::Missing);
            0.0
        }
    };

    let quantity = match fields.get("quantity") {
        Some(value) => match quantity_of(value) {
            Some((quantity, false)) => quantity,
            Some((quantity, true)) => {
                fix("quantity", FixKind::Coerced);
                quantity
            }
            None => {
                fix("quantity", FixKind::Invalid);
                0
            }
        },
        None => {
            fix("quantity", FixKind::Missing);
            0
        }
    };

    let category = match fields.get("category") {
        Some(Value::String(category)) => category.clone(),
        Some(_) => {
            fix("category", FixKind::Invalid);
            DEFAULT_CATEGORY.to_string()
        }
        None => {
            fix("category", FixKind::Missing);
            DEFAULT_CATEGORY.to_string()
        }
    };

    Product {
        name,
        price,
        quantity,
        category,
    }
}

/// Reads a stock quantity, returning whether a float had to be coerced.
fn quantity_of(value: &Value) -> Option<(u32, bool)> {
    if let Some(quantity) = value.as_u64() {
        return u32::try_from(quantity).ok().map(|q| (q, false));
    }
    let float = value.as_f64()?;
    if float.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&float) {
        // Range-checked above, the cast is exact.
        return Some((float as u32, true));
    }
    None
}

/// Loads the catalog through `store`, migrating legacy records.
///
/// If the migration changed anything the corrected snapshot is saved before
/// returning, so the on-disk copy satisfies the schema from here on.
pub fn load_catalog<S: SnapshotStore>(store: &mut S) -> Result<MigratedCatalog, StorageError> {
    let raw: Value = store.load(Collection::Inventory)?;
    let migrated = migrate_catalog(raw);

    if migrated.report.changed() {
        let report = &migrated.report;
        tracing::warn!(
            fixed_fields = report.fixes.len(),
            dropped = report.dropped.len(),
            stripped = report.stripped.len(),
            "catalog snapshot needed migration"
        );
        store.save(Collection::Inventory, &migrated.catalog)?;
        tracing::info!(products = migrated.catalog.len(), "rewrote migrated catalog");
    }

    Ok(migrated)
}
