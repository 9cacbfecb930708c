use serde_json::json;
use stockwatch_core::StockStatus;

use super::*;

fn range(values: serde_json::Value) -> ValueRange {
    serde_json::from_value(json!({
        "range": "Sheet1!A1:Z1000",
        "majorDimension": "ROWS",
        "values": values,
    }))
    .expect("fixture should deserialize")
}

#[test]
fn converts_rows_under_header() {
    let range = range(json!([
        ["Brand", "Product", "Stock Availability", "Discounted Price", "Pack"],
        ["Acme", "Widget", "Currently unavailable", "100", "1x"],
        ["Acme", "Gadget", "N/A", "50", "2x"],
    ]));

    let records = table_from_values(&range).unwrap().records;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].product, "Widget");
    assert_eq!(records[0].stock_status, StockStatus::OutOfStock);
    assert_eq!(records[1].stock_status, StockStatus::InStock);
    assert_eq!(records[1].pack, "2x");
}

#[test]
fn skips_blank_rows_and_pads_short_rows() {
    let range = range(json!([
        ["Brand", "Product", "Stock Availability", "Discounted Price", "Pack"],
        [],
        ["", " ", ""],
        ["Acme", "Widget", "N/A"],
    ]));

    let records = table_from_values(&range).unwrap().records;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].discounted_price, "");
    assert_eq!(records[0].pack, "");
}

#[test]
fn renders_non_string_cells() {
    let range = range(json!([
        ["Brand", "Product", "Stock Availability", "Discounted Price", "Pack"],
        ["Acme", "Widget", "N/A", 99.5, true],
        ["Acme", "Gadget", "N/A", 120, null],
    ]));

    let records = table_from_values(&range).unwrap().records;
    assert_eq!(records[0].discounted_price, "99.5");
    assert_eq!(records[0].pack, "TRUE");
    assert_eq!(records[1].discounted_price, "120");
    assert_eq!(records[1].pack, "");
}

#[test]
fn missing_values_is_empty_sheet() {
    let range: ValueRange = serde_json::from_value(json!({"range": "Sheet1!A1:Z1000"})).unwrap();
    assert_eq!(table_from_values(&range).unwrap_err(), SchemaError::EmptySheet);
}

#[test]
fn missing_column_fails_before_rows_are_read() {
    let range = range(json!([
        ["Brand", "Product", "Stock Availability", "Pack"],
        ["Acme", "Widget", "N/A", "1x"],
    ]));

    let err = table_from_values(&range).unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingColumns(vec!["Discounted Price".to_string()])
    );
}

#[test]
fn header_only_sheet_has_no_records() {
    let range = range(json!([
        ["Brand", "Product", "Stock Availability", "Discounted Price", "Pack"],
    ]));
    assert!(table_from_values(&range).unwrap().records.is_empty());
}

#[test]
fn keeps_header_columns_including_extras() {
    let range = range(json!([
        ["Brand", " Product ", "Image", "", "Stock Availability", "Discounted Price", "Pack"],
        ["Acme", "Widget", "w.png", "", "N/A", "100", "1x"],
    ]));

    let table = table_from_values(&range).unwrap();
    assert_eq!(
        table.columns,
        vec![
            "Brand",
            "Product",
            "Image",
            "Stock Availability",
            "Discounted Price",
            "Pack"
        ]
    );
    assert_eq!(table.records.len(), 1);
}
