use super::*;

fn record(brand: &str, product: &str, status: &str, price: &str, pack: &str) -> ProductRecord {
    ProductRecord {
        brand: brand.to_string(),
        product: product.to_string(),
        stock_status: StockStatus::from_raw(status),
        discounted_price: price.to_string(),
        pack: pack.to_string(),
    }
}

fn acme_rows() -> Vec<ProductRecord> {
    vec![
        record("Acme", "Widget", "Currently unavailable", "100", "1x"),
        record("Acme", "Gadget", "N/A", "50", "2x"),
    ]
}

fn mixed_rows() -> Vec<ProductRecord> {
    vec![
        record("Acme", "Widget", "Currently unavailable", "100", "1x"),
        record("Globex", "Sprocket", "N/A", "20", "10 pcs"),
        record("Acme", "Gadget", "N/A", "50", "2x"),
        record("Acme", "Doohickey", "Only 2 left", "75", "1x"),
        record("Globex", "Cog", "Currently unavailable", "15", "5 pcs"),
        record("Acme", "Gizmo", "Currently unavailable", "30", "3x"),
    ]
}

#[test]
fn summarize_acme_example() {
    let rows = acme_rows();
    let summaries = summarize(&rows, ["Acme"]);
    let acme = &summaries["Acme"];

    assert_eq!(acme.total, 2);
    assert_eq!(acme.in_stock, 1);
    assert_eq!(acme.out_of_stock, 1);
    assert_eq!(acme.other, 0);
    assert_eq!(acme.out_of_stock_rows, vec![rows[0].clone()]);
}

#[test]
fn summarize_totals_balance_for_every_brand() {
    let rows = mixed_rows();
    let summaries = summarize(&rows, ["Acme", "Globex"]);

    for summary in summaries.values() {
        assert_eq!(
            summary.total,
            summary.in_stock + summary.out_of_stock + summary.other,
            "unbalanced summary: {summary:?}"
        );
        assert_eq!(summary.out_of_stock_rows.len(), summary.out_of_stock);
        assert!(summary.out_of_stock_rows.iter().all(ProductRecord::is_out_of_stock));
    }

    let acme = &summaries["Acme"];
    assert_eq!(acme.total, 4);
    assert_eq!(acme.other, 1);
}

#[test]
fn summarize_keeps_sheet_order_for_out_of_stock_rows() {
    let rows = mixed_rows();
    let summaries = summarize(&rows, ["Acme"]);
    let products: Vec<&str> = summaries["Acme"]
        .out_of_stock_rows
        .iter()
        .map(|r| r.product.as_str())
        .collect();
    assert_eq!(products, vec!["Widget", "Gizmo"]);
}

#[test]
fn summarize_is_idempotent() {
    let rows = mixed_rows();
    let first = summarize(&rows, ["Acme", "Globex", "Initech"]);
    let second = summarize(&rows, ["Acme", "Globex", "Initech"]);
    assert_eq!(first, second);
}

#[test]
fn summarize_unknown_brand_is_zero_valued() {
    let rows = mixed_rows();
    let summaries = summarize(&rows, ["Initech"]);
    assert_eq!(summaries["Initech"], BrandSummary::empty("Initech"));
    assert!(!summaries["Initech"].has_out_of_stock());
}

#[test]
fn summarize_empty_table_and_no_brands() {
    let summaries = summarize(&[], ["Acme"]);
    assert_eq!(summaries["Acme"].total, 0);

    let rows = mixed_rows();
    assert!(summarize(&rows, std::iter::empty()).is_empty());
}

#[test]
fn summarize_brand_match_is_exact() {
    let rows = mixed_rows();
    let summaries = summarize(&rows, ["acme"]);
    assert_eq!(summaries["acme"].total, 0);
}

#[test]
fn distinct_brands_first_seen_order_with_counts() {
    let mut rows = mixed_rows();
    rows.push(record("  ", "Nameless", "N/A", "1", "1x"));
    let brands = distinct_brands(&rows);
    assert_eq!(
        brands,
        vec![
            BrandCount {
                brand: "Acme".to_string(),
                rows: 4
            },
            BrandCount {
                brand: "Globex".to_string(),
                rows: 2
            },
        ]
    );
}
