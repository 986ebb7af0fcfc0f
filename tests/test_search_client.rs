mod common;

use common::{setup, ScriptedTransport, THREE_ADS};
use p2pwatch::domain::error::FailureKind;
use p2pwatch::domain::ports::advertisement_source::AdvertisementSource;
use p2pwatch::domain::ports::http_transport::TransportError;
use p2pwatch::domain::values::search_filter::SearchFilter;
use p2pwatch::infrastructure::binance::client::{BinanceP2pClient, SEARCH_URL};
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_empty_asset_or_fiat_makes_no_network_call() {
    let transport = ScriptedTransport::new();
    let app = setup(transport.clone());

    for filter in [
        SearchFilter::new("", "XAF", "BUY"),
        SearchFilter::new("USDT", "", "BUY"),
        SearchFilter::new(" ", " ", "SELL"),
    ] {
        let err = app.search_advertisements(&filter).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidInput);
    }
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_unknown_trade_type_is_invalid_input() {
    let transport = ScriptedTransport::new();
    let app = setup(transport.clone());
    let err = app
        .search_advertisements(&SearchFilter::new("USDT", "XAF", "HODL"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidInput);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_out_of_range_paging_is_invalid_input() {
    let transport = ScriptedTransport::new();
    let app = setup(transport.clone());
    let err = app
        .search_advertisements(&SearchFilter::default().with_rows(50))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidInput);
    let err = app
        .search_advertisements(&SearchFilter::default().with_page(0))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidInput);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let transport = ScriptedTransport::new().fail(TransportError::Timeout("operation timed out".into()));
    let app = setup(transport.clone());
    let err = app
        .search_advertisements(&SearchFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::NetworkError);
    assert!(err.message.contains("timed out"));
    assert!(err.kind.is_transient());
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let transport = ScriptedTransport::new().fail(TransportError::Connect("connection refused".into()));
    let app = setup(transport);
    let err = app
        .search_advertisements(&SearchFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::NetworkError);
    assert_eq!(err.message, "connection refused");
}

#[tokio::test]
async fn test_partial_success_keeps_valid_records() {
    let transport = ScriptedTransport::new().respond(
        200,
        r#"{"success": true, "data": [{"adv":{"price":"850.5"}}, {"adv":{}}]}"#,
    );
    let client = BinanceP2pClient::new(transport);
    let page = client.search_page(&SearchFilter::default()).await.unwrap();
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].price, dec!(850.5));
    assert_eq!(page.skipped, 1);
    assert_eq!(page.total_entries, 2);
}

#[tokio::test]
async fn test_rejected_carries_platform_message() {
    let transport = ScriptedTransport::new().respond(200, r#"{"success": false, "message": "rate limited"}"#);
    let app = setup(transport);
    let err = app
        .search_advertisements(&SearchFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::RemoteRejected);
    assert_eq!(err.message, "rate limited");
}

#[tokio::test]
async fn test_non_json_200_is_malformed() {
    let transport = ScriptedTransport::new().respond(200, "<!doctype html><title>Access Denied</title>");
    let app = setup(transport);
    let err = app
        .search_advertisements(&SearchFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn test_server_error_is_remote_error() {
    let transport = ScriptedTransport::new().respond(502, "Bad Gateway");
    let app = setup(transport);
    let err = app
        .search_advertisements(&SearchFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::RemoteError);
    assert!(err.message.contains("502"));
    assert!(err.message.contains("Bad Gateway"));
}

#[tokio::test]
async fn test_request_goes_to_search_endpoint_once() {
    let transport = ScriptedTransport::new().respond(200, THREE_ADS);
    let app = setup(transport.clone());
    let filter = SearchFilter::new("usdt", "xaf", "buy")
        .with_pay_method("MTNMobileMoney")
        .with_rows(4);
    let records = app.search_advertisements(&filter).await.unwrap();
    assert_eq!(records.len(), 3);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let (url, body) = &requests[0];
    assert_eq!(url, SEARCH_URL);
    assert_eq!(body["asset"], "USDT");
    assert_eq!(body["fiat"], "XAF");
    assert_eq!(body["tradeType"], "BUY");
    assert_eq!(body["rows"], 4);
    assert_eq!(body["page"], 1);
    assert_eq!(body["payTypes"], serde_json::json!(["MTNMobileMoney"]));
}

#[tokio::test]
async fn test_records_keep_remote_order_and_optional_fields() {
    let transport = ScriptedTransport::new().respond(200, THREE_ADS);
    let app = setup(transport);
    let records = app
        .search_advertisements(&SearchFilter::default())
        .await
        .unwrap();
    let prices: Vec<_> = records.iter().map(|r| r.price).collect();
    assert_eq!(prices, vec![dec!(655.00), dec!(648.20), dec!(661.75)]);
    assert_eq!(records[0].advertiser_name.as_deref(), Some("KamerOTC"));
    assert_eq!(records[0].available_quantity, Some(dec!(310.5)));
    assert_eq!(records[0].pay_methods, vec!["MTNMobileMoney"]);
    assert_eq!(records[1].advertiser_id, None);
    assert!(records[2].pay_methods.is_empty());
    assert!(records.iter().all(|r| r.timestamp == records[0].timestamp));
}

#[tokio::test]
async fn test_identical_filters_are_not_cached() {
    let transport = ScriptedTransport::new()
        .respond(200, THREE_ADS)
        .respond(200, r#"{"success": true, "data": []}"#);
    let app = setup(transport.clone());
    let first = app.search_advertisements(&SearchFilter::default()).await.unwrap();
    let second = app.search_advertisements(&SearchFilter::default()).await.unwrap();
    assert_eq!(first.len(), 3);
    assert!(second.is_empty());
    assert_eq!(transport.calls(), 2);
}
