//! Plain-text rendering of catalog listings and reports.

use std::fmt::Write;

use stockbook_core::{Catalog, SalesSummary};

/// Formats a price the way every report shows money.
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Tabular listing of the whole catalog.
pub fn catalog_table(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return "No products.".to_string();
    }
    let mut out = format!(
        "{:<12} {:<24} {:>10} {:>8}  {}\n",
        "ID", "Name", "Price", "Quantity", "Category"
    );
    for (id, product) in catalog {
        let _ = writeln!(
            out,
            "{:<12} {:<24} {:>10} {:>8}  {}",
            id.as_str(),
            product.name,
            money(product.price),
            product.quantity,
            product.category
        );
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn low_stock_report(low: &Catalog) -> String {
    if low.is_empty() {
        return "No low stock items.".to_string();
    }
    let mut out = String::from("LOW STOCK ALERT:\n");
    for (id, product) in low {
        let _ = write!(out, "\n{}: {} - {} left", id, product.name, product.quantity);
    }
    out
}

pub fn summary_report(summary: &SalesSummary) -> String {
    let mut out = format!(
        "Total Transactions: {}\nTotal Revenue: {}\n\nTop Selling Products:",
        summary.transaction_count,
        money(summary.total_revenue)
    );
    for (rank, sale) in summary.top_selling.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {} ({} sold, {})",
            rank + 1,
            sale.name,
            sale.quantity,
            money(sale.total)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbook_core::{Product, ProductId, Sale};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(ProductId::from("P1"), Product::new("Pen", 1.5, 7, "Stationery"));
        catalog.insert(ProductId::from("P2"), Product::new("Ink", 12.0, 2, "Stationery"));
        catalog
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(4.5), "$4.50");
        assert_eq!(money(0.0), "$0.00");
    }

    #[test]
    fn low_stock_lists_each_product() {
        assert_eq!(
            low_stock_report(&catalog()),
            "LOW STOCK ALERT:\n\nP1: Pen - 7 left\nP2: Ink - 2 left"
        );
        assert_eq!(low_stock_report(&Catalog::new()), "No low stock items.");
    }

    #[test]
    fn table_has_header_and_rows() {
        let table = catalog_table(&catalog());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("$1.50"));
        assert!(lines[2].ends_with("Stationery"));
    }

    #[test]
    fn summary_ranks_sales() {
        let at = chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let pen = Product::new("Pen", 1.5, 10, "Stationery");
        let sales = vec![Sale::record(&ProductId::from("P1"), &pen, 3, at)];
        let report = summary_report(&SalesSummary::from_sales(&sales));
        assert_eq!(
            report,
            "Total Transactions: 1\nTotal Revenue: $4.50\n\nTop Selling Products:\n1. Pen (3 sold, $4.50)"
        );
    }
}
