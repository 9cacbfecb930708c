//! Integration tests for `SheetsClient::fetch_table` using wiremock HTTP mocks.
//!
//! Each test stands up its own mock server, so no real network traffic is
//! made. Covers the happy path, credential handling, and every error
//! category a fetch can surface.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockwatch_core::{SchemaError, StockStatus};
use stockwatch_sheets::{SheetsAuth, SheetsClient, SheetsError};

const SHEET_PATH: &str = "/v4/spreadsheets/sheet-123/values/Sheet1";

fn test_client(base_url: &str, auth: SheetsAuth) -> SheetsClient {
    SheetsClient::with_base_url(base_url, auth, 5, "stockwatch-test/0.1")
        .expect("client construction should not fail")
}

fn stock_values() -> serde_json::Value {
    json!({
        "range": "Sheet1!A1:E4",
        "majorDimension": "ROWS",
        "values": [
            ["Brand", "Product", "Stock Availability", "Discounted Price", "Pack"],
            ["Acme", "Widget", "Currently unavailable", "100", "1x"],
            ["Acme", "Gadget", "N/A", "50", "2x"],
            ["Globex", "Cog", "Back soon", "15", "5 pcs"]
        ]
    })
}

#[tokio::test]
async fn fetch_table_returns_records_with_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .and(query_param("key", "test-key"))
        .and(query_param("majorDimension", "ROWS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_values()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), SheetsAuth::ApiKey("test-key".to_string()));
    let table = client
        .fetch_table("sheet-123", "Sheet1")
        .await
        .expect("fetch should succeed");
    let records = table.records;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].brand, "Acme");
    assert_eq!(records[0].stock_status, StockStatus::OutOfStock);
    assert_eq!(records[1].stock_status, StockStatus::InStock);
    assert_eq!(
        records[2].stock_status,
        StockStatus::Other("Back soon".to_string())
    );
}

#[tokio::test]
async fn fetch_table_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .and(header("authorization", "Bearer ya29.token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_values()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(
        &server.uri(),
        SheetsAuth::AccessToken("ya29.token".to_string()),
    );
    let table = client.fetch_table("sheet-123", "Sheet1").await.unwrap();
    assert_eq!(table.records.len(), 3);
    assert_eq!(table.columns.len(), 5);
}

#[tokio::test]
async fn every_call_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(stock_values()))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), SheetsAuth::Anonymous);
    client.fetch_table("sheet-123", "Sheet1").await.unwrap();
    client.fetch_table("sheet-123", "Sheet1").await.unwrap();
}

#[tokio::test]
async fn forbidden_maps_to_unauthorized_with_google_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "The caller does not have permission",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), SheetsAuth::ApiKey("bad".to_string()));
    let err = client.fetch_table("sheet-123", "Sheet1").await.unwrap_err();

    assert!(
        matches!(err, SheetsError::Unauthorized { status: 403, ref message } if message == "The caller does not have permission"),
        "expected Unauthorized, got: {err:?}"
    );
    assert!(err.is_source_unavailable());
}

#[tokio::test]
async fn not_found_redacts_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), SheetsAuth::ApiKey("secret-key".to_string()));
    let err = client.fetch_table("missing", "Sheet1").await.unwrap_err();

    match err {
        SheetsError::NotFound { ref url } => assert!(!url.contains("secret-key"), "url leaked key: {url}"),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), SheetsAuth::Anonymous);
    let err = client.fetch_table("sheet-123", "Sheet1").await.unwrap_err();

    assert!(
        matches!(err, SheetsError::UnexpectedStatus { status: 503, ref message, .. } if message == "backend unavailable"),
        "expected UnexpectedStatus, got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_maps_to_deserialize() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), SheetsAuth::Anonymous);
    let err = client.fetch_table("sheet-123", "Sheet1").await.unwrap_err();
    assert!(
        matches!(err, SheetsError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn missing_column_maps_to_schema_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Sheet1!A1:C2",
            "values": [
                ["Brand", "Product", "Pack"],
                ["Acme", "Widget", "1x"]
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), SheetsAuth::Anonymous);
    let err = client.fetch_table("sheet-123", "Sheet1").await.unwrap_err();

    assert!(!err.is_source_unavailable());
    match err {
        SheetsError::Schema(SchemaError::MissingColumns(cols)) => assert_eq!(
            cols,
            vec!["Stock Availability".to_string(), "Discounted Price".to_string()]
        ),
        other => panic!("expected Schema(MissingColumns), got: {other:?}"),
    }
}

#[tokio::test]
async fn empty_sheet_maps_to_schema_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"range": "Sheet1!A1:Z1000"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), SheetsAuth::Anonymous);
    let err = client.fetch_table("sheet-123", "Sheet1").await.unwrap_err();
    assert!(matches!(err, SheetsError::Schema(SchemaError::EmptySheet)));
}

#[tokio::test]
async fn unreachable_host_maps_to_http_error() {
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let client = test_client(&uri, SheetsAuth::Anonymous);
    let err = client.fetch_table("sheet-123", "Sheet1").await.unwrap_err();
    assert!(matches!(err, SheetsError::Http(_)), "expected Http, got: {err:?}");
    assert!(err.is_source_unavailable());
}
