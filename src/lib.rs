pub mod client;
pub mod config;
pub mod error;
mod shared;
pub mod types;
pub mod wallet;

#[cfg(feature = "blocking")]
pub mod blocking;

#[cfg(feature = "blocking")]
pub use blocking::BlockingUltraClient;
pub use client::UltraClient;
pub use config::{TransportConfig, UltraConfig};
pub use error::{ErrorKind, Result, UltraError};
pub use types::{
    BalancesResponse, ExecuteRequest, ExecuteResponse, OrderRequest, OrderResponse, Router,
    ShieldResponse, ShieldWarning, TokenBalance,
};
pub use wallet::WalletCredential;
