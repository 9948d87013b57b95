use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER},
    Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::UltraConfig,
    error::{Result, UltraError},
    types::{ExecuteRequest, OrderRequest, OrderResponse},
    wallet::WalletCredential,
};

const API_KEY_HEADER: &str = "x-api-key";

/// One HTTP call, described independently of how it gets sent.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    pub operation: &'static str,
    pub method: Method,
    pub url: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

/// Request building, response parsing and signing shared by the async and
/// blocking clients. Immutable after construction.
#[derive(Debug)]
pub(crate) struct UltraCore {
    base_url: String,
    headers: HeaderMap,
    private_key_env_var: String,
    wallet: Option<WalletCredential>,
}

impl UltraCore {
    /// Resolves the wallet once. An unset key variable leaves the client
    /// usable for `balances` and `shield`; a malformed one is an error.
    pub fn new(config: &UltraConfig) -> Result<Self> {
        let wallet = match WalletCredential::from_env(&config.private_key_env_var) {
            Ok(wallet) => {
                debug!("jupiter ultra wallet: {}", wallet.pubkey());
                Some(wallet)
            }
            Err(UltraError::MissingPrivateKey { .. }) => None,
            Err(e) => return Err(e),
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = config.effective_api_key() {
            let mut value = HeaderValue::from_str(key)
                .map_err(|e| UltraError::InvalidConfig(format!("invalid api key: {e}")))?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        Ok(Self {
            base_url: config.resolved_base_url(),
            headers,
            private_key_env_var: config.private_key_env_var.clone(),
            wallet,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn wallet(&self) -> Result<&WalletCredential> {
        self.wallet
            .as_ref()
            .ok_or_else(|| UltraError::MissingPrivateKey {
                env_var: self.private_key_env_var.clone(),
            })
    }

    pub fn order(&self, request: &OrderRequest) -> Result<PreparedRequest> {
        request.validate()?;
        Ok(PreparedRequest {
            operation: "order",
            method: Method::GET,
            url: format!("{}/ultra/v1/order", self.base_url),
            query: request.to_query(),
            body: None,
        })
    }

    pub fn execute(&self, request: &ExecuteRequest) -> Result<PreparedRequest> {
        request.validate()?;
        let body = serde_json::to_value(request)
            .map_err(|e| UltraError::Serialization(e.to_string()))?;
        Ok(PreparedRequest {
            operation: "execute",
            method: Method::POST,
            url: format!("{}/ultra/v1/execute", self.base_url),
            query: Vec::new(),
            body: Some(body),
        })
    }

    pub fn balances(&self, address: &str) -> Result<PreparedRequest> {
        if address.is_empty() || !address.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(UltraError::validation(
                "address",
                format!("'{address}' is not a base58 address"),
            ));
        }
        Ok(PreparedRequest {
            operation: "balances",
            method: Method::GET,
            url: format!("{}/ultra/v1/balances/{address}", self.base_url),
            query: Vec::new(),
            body: None,
        })
    }

    pub fn shield<S: AsRef<str>>(&self, mints: &[S]) -> Result<PreparedRequest> {
        if mints.is_empty() {
            return Err(UltraError::validation("mints", "at least one mint is required"));
        }
        let mints: Vec<&str> = mints.iter().map(AsRef::as_ref).collect();
        Ok(PreparedRequest {
            operation: "shield",
            method: Method::GET,
            url: format!("{}/ultra/v1/shield", self.base_url),
            query: vec![("mints", mints.join(","))],
            body: None,
        })
    }

    /// Signs the order's transaction. Proceeds whenever a transaction is
    /// present, whatever the order's `status` says.
    pub fn execute_request_from_order(&self, order: &OrderResponse) -> Result<ExecuteRequest> {
        let transaction = order
            .transaction
            .as_deref()
            .filter(|tx| !tx.is_empty())
            .ok_or_else(|| {
                UltraError::ResponseShape(format!(
                    "order response has no transaction (status: {})",
                    order.status.as_deref().unwrap_or("none")
                ))
            })?;
        let request_id = order
            .request_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| UltraError::ResponseShape("order response has no requestId".to_string()))?;

        let signed_transaction = self.wallet()?.sign_base64_transaction(transaction)?;
        Ok(ExecuteRequest::new(request_id, signed_transaction))
    }

    pub fn parse_response<T: DeserializeOwned>(
        &self,
        status: StatusCode,
        headers: &HeaderMap,
        body: &str,
    ) -> Result<T> {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(UltraError::Authentication {
                    status,
                    body: body.to_string(),
                });
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = headers
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok());
                return Err(UltraError::RateLimited {
                    retry_after,
                    body: body.to_string(),
                });
            }
            s if !s.is_success() => {
                let message = error_message(body).unwrap_or_else(|| format!("HTTP {status} error"));
                return Err(UltraError::Http {
                    status,
                    message,
                    body: body.to_string(),
                });
            }
            _ => {}
        }

        let value: Value =
            serde_json::from_str(body).map_err(|e| UltraError::Serialization(e.to_string()))?;

        let Some(object) = value.as_object() else {
            return Err(UltraError::ResponseShape(format!(
                "expected JSON object, got {}",
                json_type(&value)
            )));
        };

        if let Some(message) = object.get("errorMessage") {
            let message = message
                .as_str()
                .map_or_else(|| message.to_string(), ToString::to_string);
            return Err(UltraError::Api {
                message,
                body: value,
            });
        }

        serde_json::from_value(value).map_err(|e| UltraError::Serialization(e.to_string()))
    }
}

fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["errorMessage", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(ToString::to_string)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
