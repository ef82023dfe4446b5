//! End-to-end ledger scenarios.
//!
//! Tests exercise the full stack: Stockbook bootstrap -> Ledger ->
//! SnapshotStore -> JSON snapshot. In-memory tests use a fixed clock;
//! file-backed tests get a fresh temp data directory each.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use tempfile::TempDir;

use stockbook_core::{Catalog, Product, SalesLog};
use stockbook_ledger::{
    FixedClock, Ledger, LedgerError, Stockbook, StockbookConfig, DEFAULT_LOW_STOCK_THRESHOLD,
};
use stockbook_storage::{Collection, InMemoryStore, SnapshotStore};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 5, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn memory_book() -> (InMemoryStore, Stockbook<InMemoryStore, FixedClock>) {
    let store = InMemoryStore::new();
    let book = Stockbook::with_store_and_clock(store.clone(), FixedClock(noon())).unwrap();
    (store, book)
}

fn file_book(dir: &TempDir) -> Stockbook<stockbook_storage::JsonFileStore> {
    let config = StockbookConfig::default().with_data_dir(dir.path());
    Stockbook::open(&config).unwrap()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn pen_scenario() {
    let (store, mut book) = memory_book();
    let ledger = &mut book.ledger;
    assert!(ledger.catalog().is_empty());

    let pen = Product::parse("Pen", "1.50", "10", "Stationery").unwrap();
    assert!(ledger.add("P1", pen).is_ok());

    let sale = ledger.sell("P1", 3).unwrap();
    assert_eq!(ledger.product("P1").unwrap().quantity, 7);
    assert_eq!(ledger.sales().len(), 1);
    assert_eq!(sale.total, 4.5);

    let before_catalog = store.snapshot_text(Collection::Inventory);
    let before_sales = store.snapshot_text(Collection::Sales);
    assert!(matches!(
        ledger.sell("P1", 100),
        Err(LedgerError::InsufficientStock { .. })
    ));
    assert_eq!(store.snapshot_text(Collection::Inventory), before_catalog);
    assert_eq!(store.snapshot_text(Collection::Sales), before_sales);
    assert_eq!(ledger.product("P1").unwrap().quantity, 7);

    let low = ledger.low_stock(8);
    assert_eq!(low.len(), 1);
    assert_eq!(low["P1"].quantity, 7);
    assert!(ledger.low_stock(DEFAULT_LOW_STOCK_THRESHOLD).is_empty());
}

#[test]
fn add_then_read_returns_supplied_fields() {
    let (_, mut book) = memory_book();
    let product = Product::parse("Stapler", "12.99", "3", "Office").unwrap();
    book.ledger.add("S-1", product).unwrap();

    let stored = book.ledger.product("S-1").unwrap();
    assert_eq!(stored.name, "Stapler");
    assert_eq!(stored.price, 12.99);
    assert_eq!(stored.quantity, 3);
    assert_eq!(stored.category, "Office");
}

#[test]
fn sales_file_matches_legacy_format() {
    let (store, mut book) = memory_book();
    book.ledger
        .add("P1", Product::new("Pen", 1.5, 10, "Stationery"))
        .unwrap();
    book.ledger.sell("P1", 3).unwrap();

    let text = store.snapshot_text(Collection::Sales).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "product_id": "P1",
            "name": "Pen",
            "quantity": 3,
            "price": 1.5,
            "total": 4.5,
            "timestamp": "2026-05-01 12:00:00"
        }])
    );
}

#[test]
fn summary_over_several_sales() {
    let (_, mut book) = memory_book();
    let ledger = &mut book.ledger;
    ledger.add("P1", Product::new("Pen", 1.5, 100, "S")).unwrap();
    ledger.add("P2", Product::new("Ink", 2.25, 100, "S")).unwrap();
    for (id, qty) in [("P1", 2), ("P2", 9), ("P1", 9), ("P2", 1), ("P1", 4), ("P2", 4)] {
        ledger.sell(id, qty).unwrap();
    }

    let summary = ledger.sales_summary();
    assert_eq!(summary.transaction_count, 6);
    let expected: f64 = ledger.sales().iter().map(|s| s.total).sum();
    assert_eq!(summary.total_revenue, expected);

    let ranked: Vec<(&str, u32)> = summary
        .top_selling
        .iter()
        .map(|s| (s.product_id.as_str(), s.quantity))
        .collect();
    assert_eq!(
        ranked,
        vec![("P2", 9), ("P1", 9), ("P1", 4), ("P2", 4), ("P1", 2)]
    );
}

#[test]
fn file_backed_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut book = file_book(&dir);
        book.ledger
            .add("P1", Product::new("Pen", 1.5, 10, "Stationery"))
            .unwrap();
        book.ledger.sell("P1", 4).unwrap();
        book.credentials.register("clerk", "hunter2").unwrap();
    }

    let book = file_book(&dir);
    assert_eq!(book.ledger.product("P1").unwrap().quantity, 6);
    assert_eq!(book.ledger.sales().len(), 1);
    assert!(book.credentials.authenticate("clerk", "hunter2").unwrap());
    assert!(book.credentials.authenticate("admin", "password").unwrap());
}

#[test]
fn legacy_inventory_is_healed_on_open() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("inventory.json"),
        r#"{"W1": {"name": "Widget", "price": 3.5, "quantity": 2}}"#,
    )
    .unwrap();

    let book = file_book(&dir);
    assert_eq!(book.ledger.product("W1").unwrap().category, "Uncategorized");
    assert!(book.ledger.migration().changed());

    let on_disk: Catalog = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("inventory.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(on_disk["W1"].category, "Uncategorized");
}

#[test]
fn corrupt_sales_file_starts_empty_and_is_replaced_by_next_sale() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("sales.json"), "[{oops").unwrap();

    let mut book = file_book(&dir);
    assert!(book.ledger.sales().is_empty());
    book.ledger
        .add("P1", Product::new("Pen", 1.5, 10, "Stationery"))
        .unwrap();
    book.ledger.sell("P1", 1).unwrap();

    let sales: SalesLog = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("sales.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(sales.len(), 1);
}

#[test]
fn unreadable_sale_records_survive_the_next_sale() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("sales.json"),
        r#"[
    {"product_id": "P1", "name": "Pen", "quantity": 2, "price": 1.5, "total": 3.0, "timestamp": "2025-01-01 10:00:00"},
    {"product_id": "P1", "name": "Pen", "quantity": 1, "price": 1.5, "total": 1.5, "timestamp": "2025-01-01T10:05:00"}
]"#,
    )
    .unwrap();

    let mut book = file_book(&dir);
    assert_eq!(book.ledger.sales().len(), 1);
    assert_eq!(book.ledger.skipped_sales(), 1);

    book.ledger
        .add("P1", Product::new("Pen", 1.5, 10, "Stationery"))
        .unwrap();
    book.ledger.sell("P1", 4).unwrap();

    let on_disk: Vec<serde_json::Value> = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("sales.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(on_disk.len(), 3);
    assert_eq!(on_disk[1]["timestamp"], "2025-01-01T10:05:00");
    assert_eq!(on_disk[2]["quantity"], 4);

    let reopened = file_book(&dir);
    assert_eq!(reopened.ledger.sales().len(), 2);
    assert_eq!(reopened.ledger.skipped_sales(), 1);
    assert_eq!(reopened.ledger.sales_summary().total_revenue, 9.0);
}

#[test]
fn summary_snapshot_after_mixed_sales() {
    let (_, mut book) = memory_book();
    let ledger = &mut book.ledger;
    ledger.add("P1", Product::new("Pen", 1.5, 20, "S")).unwrap();
    ledger.add("P2", Product::new("Ink", 2.25, 20, "S")).unwrap();
    ledger.sell("P2", 3).unwrap();
    ledger.sell("P1", 5).unwrap();

    insta::assert_json_snapshot!(ledger.sales_summary(), @r#"
    {
      "transaction_count": 2,
      "total_revenue": 14.25,
      "top_selling": [
        {
          "product_id": "P1",
          "name": "Pen",
          "quantity": 5,
          "price": 1.5,
          "total": 7.5,
          "timestamp": "2026-05-01 12:00:00"
        },
        {
          "product_id": "P2",
          "name": "Ink",
          "quantity": 3,
          "price": 2.25,
          "total": 6.75,
          "timestamp": "2026-05-01 12:00:00"
        }
      ]
    }
    "#);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn revenue_tracks_every_successful_sale(
        stock in 0u32..200,
        cents in 0u32..5_000,
        requests in proptest::collection::vec(0u32..40, 0..30),
    ) {
        let mut ledger =
            Ledger::open_with_clock(InMemoryStore::new(), FixedClock(noon())).unwrap();
        let price = f64::from(cents) / 100.0;
        ledger.add("P", Product::new("Thing", price, stock, "c")).unwrap();

        let mut expected_stock = stock;
        for qty in requests {
            let result = ledger.sell("P", qty);
            if qty > 0 && qty <= expected_stock {
                let sale = result.unwrap();
                prop_assert_eq!(sale.total, price * f64::from(qty));
                expected_stock -= qty;
            } else {
                prop_assert!(result.is_err());
            }
            prop_assert_eq!(ledger.product("P").unwrap().quantity, expected_stock);
        }

        let summary = ledger.sales_summary();
        let sum: f64 = ledger.sales().iter().map(|s| s.total).sum();
        prop_assert_eq!(summary.total_revenue, sum);
        prop_assert_eq!(summary.transaction_count, ledger.sales().len());
    }

    #[test]
    fn failed_sale_changes_nothing(stock in 0u32..50, extra in 1u32..50) {
        let store = InMemoryStore::new();
        let mut ledger =
            Ledger::open_with_clock(store.clone(), FixedClock(noon())).unwrap();
        ledger.add("P", Product::new("Thing", 1.25, stock, "c")).unwrap();
        let catalog_before = store.snapshot_text(Collection::Inventory);
        let sales_before: SalesLog = store.load(Collection::Sales).unwrap();

        prop_assert!(ledger.sell("P", stock + extra).is_err());
        prop_assert_eq!(store.snapshot_text(Collection::Inventory), catalog_before);
        let sales_after: SalesLog = store.load(Collection::Sales).unwrap();
        prop_assert_eq!(sales_after, sales_before);
        prop_assert!(ledger.sales().is_empty());
    }

    #[test]
    fn duplicate_add_never_mutates(name in "[a-z]{1,8}", qty in 0u32..1000) {
        let mut ledger =
            Ledger::open_with_clock(InMemoryStore::new(), FixedClock(noon())).unwrap();
        let original = Product::new("Original", 2.5, 7, "c");
        ledger.add("P", original.clone()).unwrap();

        let dup = ledger.add("P", Product::new(name, 9.75, qty, "d"));
        prop_assert!(matches!(dup, Err(LedgerError::ProductExists(_))));
        prop_assert_eq!(ledger.product("P"), Some(&original));
    }
}
