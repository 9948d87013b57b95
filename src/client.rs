use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    config::{apply_transport, UltraConfig},
    error::{Result, UltraError},
    shared::{PreparedRequest, UltraCore},
    types::{
        BalancesResponse, ExecuteRequest, ExecuteResponse, OrderRequest, OrderResponse,
        ShieldResponse,
    },
};

/// Async client for the Jupiter Ultra API.
///
/// Methods take `&self` and may be awaited concurrently; no call is retried.
/// A non-`Success` `status` in an order or execute response is returned as
/// data, so check [`ExecuteResponse::is_success`] after every call.
#[derive(Debug)]
pub struct UltraClient {
    core: UltraCore,
    http: Option<reqwest::Client>,
}

impl UltraClient {
    /// Client with default settings, reading the key from `PRIVATE_KEY`.
    pub fn new() -> Result<Self> {
        Self::with_config(UltraConfig::default())
    }

    pub fn with_config(config: UltraConfig) -> Result<Self> {
        let core = UltraCore::new(&config)?;
        let http =
            apply_transport!(reqwest::Client::builder(), &config.transport, core.headers())
                .build()?;
        Ok(Self {
            core,
            http: Some(http),
        })
    }

    pub fn base_url(&self) -> &str {
        self.core.base_url()
    }

    /// Base58 public key of the configured wallet. Never touches the network.
    pub fn get_public_key(&self) -> Result<String> {
        Ok(self.core.wallet()?.public_key())
    }

    pub async fn order(&self, request: &OrderRequest) -> Result<OrderResponse> {
        let prepared = self.core.order(request)?;
        self.send(prepared).await
    }

    pub async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse> {
        let prepared = self.core.execute(request)?;
        self.send(prepared).await
    }

    /// Creates an order, signs its transaction with the wallet, and executes
    /// it. If the execute step fails the order is left as created and the
    /// error is [`UltraError::ExecuteFailed`] carrying its `request_id`.
    pub async fn order_and_execute(&self, request: &OrderRequest) -> Result<ExecuteResponse> {
        self.core.wallet()?;

        let order = self.order(request).await?;
        let execute_request = self.core.execute_request_from_order(&order)?;

        self.execute(&execute_request).await.map_err(|e| {
            warn!(
                "jupiter ultra execute failed after order {}: {e}",
                execute_request.request_id
            );
            UltraError::ExecuteFailed {
                request_id: execute_request.request_id.clone(),
                source: Box::new(e),
            }
        })
    }

    pub async fn balances(&self, address: &str) -> Result<BalancesResponse> {
        let prepared = self.core.balances(address)?;
        self.send(prepared).await
    }

    pub async fn shield<S: AsRef<str>>(&self, mints: &[S]) -> Result<ShieldResponse> {
        let prepared = self.core.shield(mints)?;
        self.send(prepared).await
    }

    /// Drops the connection pool. Later network calls fail with
    /// [`UltraError::Closed`]; closing twice is a no-op.
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            debug!("jupiter ultra client closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    async fn send<T: DeserializeOwned>(&self, prepared: PreparedRequest) -> Result<T> {
        let http = self.http.as_ref().ok_or(UltraError::Closed)?;

        let mut req = http.request(prepared.method, &prepared.url);
        if !prepared.query.is_empty() {
            req = req.query(&prepared.query);
        }
        if let Some(body) = &prepared.body {
            req = req.json(body);
        }

        debug!("jupiter ultra {}: {}", prepared.operation, prepared.url);
        let response = req.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        self.core.parse_response(status, &headers, &body)
    }
}
