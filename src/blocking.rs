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

/// Blocking twin of [`crate::UltraClient`], built on `reqwest::blocking`.
///
/// Must not be created or dropped inside an async runtime.
#[derive(Debug)]
pub struct BlockingUltraClient {
    core: UltraCore,
    http: Option<reqwest::blocking::Client>,
}

impl BlockingUltraClient {
    pub fn new() -> Result<Self> {
        Self::with_config(UltraConfig::default())
    }

    pub fn with_config(config: UltraConfig) -> Result<Self> {
        let core = UltraCore::new(&config)?;
        let http = apply_transport!(
            reqwest::blocking::Client::builder(),
            &config.transport,
            core.headers()
        )
        .build()?;
        Ok(Self {
            core,
            http: Some(http),
        })
    }

    pub fn base_url(&self) -> &str {
        self.core.base_url()
    }

    pub fn get_public_key(&self) -> Result<String> {
        Ok(self.core.wallet()?.public_key())
    }

    pub fn order(&self, request: &OrderRequest) -> Result<OrderResponse> {
        let prepared = self.core.order(request)?;
        self.send(prepared)
    }

    pub fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse> {
        let prepared = self.core.execute(request)?;
        self.send(prepared)
    }

    pub fn order_and_execute(&self, request: &OrderRequest) -> Result<ExecuteResponse> {
        self.core.wallet()?;

        let order = self.order(request)?;
        let execute_request = self.core.execute_request_from_order(&order)?;

        self.execute(&execute_request).map_err(|e| {
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

    pub fn balances(&self, address: &str) -> Result<BalancesResponse> {
        let prepared = self.core.balances(address)?;
        self.send(prepared)
    }

    pub fn shield<S: AsRef<str>>(&self, mints: &[S]) -> Result<ShieldResponse> {
        let prepared = self.core.shield(mints)?;
        self.send(prepared)
    }

    pub fn close(&mut self) {
        if self.http.take().is_some() {
            debug!("jupiter ultra blocking client closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    fn send<T: DeserializeOwned>(&self, prepared: PreparedRequest) -> Result<T> {
        let http = self.http.as_ref().ok_or(UltraError::Closed)?;

        let mut req = http.request(prepared.method, &prepared.url);
        if !prepared.query.is_empty() {
            req = req.query(&prepared.query);
        }
        if let Some(body) = &prepared.body {
            req = req.json(body);
        }

        debug!("jupiter ultra {}: {}", prepared.operation, prepared.url);
        let response = req.send()?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text()?;

        self.core.parse_response(status, &headers, &body)
    }
}
