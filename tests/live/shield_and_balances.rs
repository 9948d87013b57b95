use jupiter_ultra::{UltraClient, UltraConfig};

use crate::common::{SOL_MINT, USDC_MINT};

fn live_config() -> UltraConfig {
    dotenvy::dotenv().ok();
    UltraConfig::from_env()
}

#[tokio::test]
#[ignore = "requires network access to the Jupiter API"]
async fn test_live_shield() {
    let client = UltraClient::with_config(live_config()).expect("client should build");

    let shield = client
        .shield(&[SOL_MINT, USDC_MINT])
        .await
        .expect("shield should succeed");

    assert!(shield.warnings_for(SOL_MINT).iter().all(|w| !w.kind.is_empty()));
}

#[tokio::test]
#[ignore = "requires PRIVATE_KEY and network access to the Jupiter API"]
async fn test_live_balances_for_own_wallet() {
    let client = UltraClient::with_config(live_config()).expect("client should build");
    let address = client
        .get_public_key()
        .expect("PRIVATE_KEY must be set for this test");

    let balances = client
        .balances(&address)
        .await
        .expect("balances should succeed");

    for balance in balances.0.values() {
        if let Some(amount) = &balance.amount {
            assert!(amount.parse::<u64>().is_ok());
        }
    }
}
