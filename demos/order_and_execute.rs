//! Swaps 0.01 WSOL for USDC with the blocking client. The wallet in
//! `PRIVATE_KEY` must hold the WSOL.

use jupiter_ultra::{BlockingUltraClient, OrderRequest, UltraConfig, UltraError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut client = BlockingUltraClient::with_config(UltraConfig::from_env())?;
    let request = OrderRequest::new(SOL_MINT, USDC_MINT, 10_000_000)
        .with_taker(client.get_public_key()?);

    match client.order_and_execute(&request) {
        Ok(response) if response.is_success() => {
            let signature = response.signature.unwrap_or_default();
            info!("swap landed: https://solscan.io/tx/{signature}");
        }
        Ok(response) => {
            error!(
                "swap failed: {} (code {:?})",
                response.error.unwrap_or_default(),
                response.code
            );
        }
        Err(UltraError::ExecuteFailed { request_id, source }) => {
            error!("order {request_id} was created but not executed: {source}");
        }
        Err(e) => error!("swap failed ({}): {e}", e.kind()),
    }

    client.close();
    Ok(())
}
