use httpmock::prelude::*;
use jupiter_ultra::{TransportConfig, UltraClient, UltraConfig};
use serde_json::json;

use crate::common::WALLET_ADDRESS;

#[tokio::test]
async fn test_transport_options_reach_the_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/ultra/v1/balances/{WALLET_ADDRESS}"))
                .header("x-trace", "abc")
                .header("accept", "application/vnd.test+json")
                .header("user-agent", "jupiter-ultra-tests/1.0");
            then.status(200).json_body(json!({}));
        })
        .await;

    let transport = TransportConfig {
        headers: vec![
            ("x-trace".to_string(), "abc".to_string()),
            ("Accept".to_string(), "application/vnd.test+json".to_string()),
        ],
        resolve: vec![("ultra.test".to_string(), *server.address())],
        user_agent: Some("jupiter-ultra-tests/1.0".to_string()),
        ..TransportConfig::default()
    };
    let config = UltraConfig::default()
        .with_base_url(format!("http://ultra.test:{}", server.port()))
        .with_private_key_env_var("ULTRA_TEST_TRANSPORT_UNSET")
        .with_transport(transport);

    let client = UltraClient::with_config(config).unwrap();
    let balances = client.balances(WALLET_ADDRESS).await.unwrap();

    mock.assert_async().await;
    assert!(balances.is_empty());
}

#[tokio::test]
async fn test_blank_api_key_sends_no_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/ultra/v1/shield")
                .header_missing("x-api-key");
            then.status(200).json_body(json!({"warnings": {}}));
        })
        .await;

    let config = UltraConfig::default()
        .with_api_key("")
        .with_base_url(server.base_url())
        .with_private_key_env_var("ULTRA_TEST_BLANK_KEY_UNSET");
    let client = UltraClient::with_config(config).unwrap();
    client.shield(&["MINT1"]).await.unwrap();

    mock.assert_async().await;
}
