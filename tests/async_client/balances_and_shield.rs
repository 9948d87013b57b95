use httpmock::prelude::*;
use jupiter_ultra::{OrderRequest, UltraClient};
use serde_json::json;

use crate::common::{mock_config, SOL_MINT, USDC_MINT, WALLET_ADDRESS};

#[tokio::test]
async fn test_balances_keep_entries_with_null_fields() {
    let body = json!({
        "SOL": {"amount": "100000000", "uiAmount": 0.1, "slot": 123, "isFrozen": false},
        "X": {"amount": "5", "uiAmount": null, "slot": 1, "isFrozen": false}
    });

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/ultra/v1/balances/{WALLET_ADDRESS}"))
                .header("accept", "application/json");
            then.status(200).json_body(body.clone());
        })
        .await;

    let client =
        UltraClient::with_config(mock_config(&server, "ULTRA_TEST_BALANCES_UNSET")).unwrap();
    let balances = client.balances(WALLET_ADDRESS).await.unwrap();

    mock.assert_async().await;
    let sol = balances.get("SOL").unwrap();
    assert_eq!(sol.amount.as_deref(), Some("100000000"));
    assert!((sol.ui_amount.unwrap() - 0.1).abs() < f64::EPSILON);
    assert_eq!(serde_json::to_value(sol).unwrap(), body["SOL"]);

    let odd = balances.get("X").unwrap();
    assert_eq!(odd.amount.as_deref(), Some("5"));
    assert!(odd.ui_amount.is_none());
    assert_eq!(balances.len(), 2);
}

#[tokio::test]
async fn test_shield_returns_warnings_verbatim() {
    let body = json!({
        "warnings": {"MINT1": [{"type": "scam", "message": "..."}]}
    });

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/ultra/v1/shield")
                .query_param("mints", "MINT1,MINT2");
            then.status(200).json_body(body.clone());
        })
        .await;

    let client = UltraClient::with_config(mock_config(&server, "ULTRA_TEST_SHIELD_UNSET")).unwrap();
    let shield = client.shield(&["MINT1", "MINT2"]).await.unwrap();

    mock.assert_async().await;
    assert_eq!(shield.warnings_for("MINT1").len(), 1);
    assert!(shield.warnings_for("MINT2").is_empty());
    assert!(!shield.warnings.contains_key("MINT2"));
    assert_eq!(serde_json::to_value(&shield).unwrap(), body);
}

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/ultra/v1/order")
                .header("x-api-key", "test-key")
                .query_param("referralAccount", "REF1")
                .query_param("referralFee", "50")
                .query_param("excludeDexes", "Raydium,Meteora DLMM");
            then.status(200)
                .json_body(json!({"requestId": "r1", "status": "Success", "router": "iris"}));
        })
        .await;

    let config = mock_config(&server, "ULTRA_TEST_API_KEY_UNSET").with_api_key("test-key");
    let client = UltraClient::with_config(config).unwrap();
    let request = OrderRequest::new(SOL_MINT, USDC_MINT, 5)
        .with_referral("REF1", 50)
        .with_exclude_dexes(["Raydium", "Meteora DLMM"]);

    let order = client.order(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(order.request_id.as_deref(), Some("r1"));
    assert!(order.transaction.is_none());
    assert_eq!(order.extra["router"], json!("iris"));
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let server = MockServer::start_async().await;
    let balances_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/ultra/v1/balances/{WALLET_ADDRESS}"));
            then.status(200).json_body(json!({}));
        })
        .await;
    let shield_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/ultra/v1/shield");
            then.status(200).json_body(json!({"warnings": {}}));
        })
        .await;

    let client =
        UltraClient::with_config(mock_config(&server, "ULTRA_TEST_CONCURRENT_UNSET")).unwrap();
    let (balances, shield) = futures::future::join(
        client.balances(WALLET_ADDRESS),
        client.shield(&[SOL_MINT, USDC_MINT]),
    )
    .await;

    assert!(balances.unwrap().is_empty());
    assert!(shield.unwrap().warnings.is_empty());
    balances_mock.assert_async().await;
    shield_mock.assert_async().await;
}
