//! Looks up a wallet's balances and the shield warnings for two mints,
//! issuing both requests concurrently.
//!
//! ```sh
//! WALLET=<address> cargo run --example balances
//! ```

use jupiter_ultra::{UltraClient, UltraConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut client = UltraClient::with_config(UltraConfig::from_env())?;
    let address = match std::env::var("WALLET") {
        Ok(address) => address,
        Err(_) => client.get_public_key()?,
    };

    let (balances, shield) = futures::future::join(
        client.balances(&address),
        client.shield(&[SOL_MINT, USDC_MINT]),
    )
    .await;

    for (token, balance) in &balances?.0 {
        info!(
            "{token}: {} ({} raw){}",
            balance.ui_amount.map_or_else(|| "?".to_string(), |ui| ui.to_string()),
            balance.amount.as_deref().unwrap_or("?"),
            if balance.is_frozen == Some(true) { " [frozen]" } else { "" }
        );
    }

    let shield = shield?;
    for mint in [SOL_MINT, USDC_MINT] {
        let warnings = shield.warnings_for(mint);
        if warnings.is_empty() {
            info!("{mint}: no warnings");
        }
        for w in warnings {
            warn!("{mint}: {} - {}", w.kind, w.message);
        }
    }

    client.close();
    Ok(())
}
