use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, UltraError};

const STATUS_SUCCESS: &str = "Success";

/// Routers the Ultra engine can source a quote from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Router {
    Iris,
    Jupiterz,
    Dflow,
    Okx,
}

impl std::fmt::Display for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iris => write!(f, "iris"),
            Self::Jupiterz => write!(f, "jupiterz"),
            Self::Dflow => write!(f, "dflow"),
            Self::Okx => write!(f, "okx"),
        }
    }
}

/// Parameters for `GET /ultra/v1/order`.
///
/// `amount` is in the input token's smallest unit (lamports for SOL); no
/// decimal scaling is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub input_mint: String,
    pub output_mint: String,
    pub amount: u64,
    pub taker: Option<String>,
    pub referral_account: Option<String>,
    /// Basis points. Only sent alongside `referral_account`.
    pub referral_fee: Option<u16>,
    pub exclude_routers: Vec<Router>,
    pub exclude_dexes: Vec<String>,
}

impl OrderRequest {
    pub fn new(input_mint: impl Into<String>, output_mint: impl Into<String>, amount: u64) -> Self {
        Self {
            input_mint: input_mint.into(),
            output_mint: output_mint.into(),
            amount,
            taker: None,
            referral_account: None,
            referral_fee: None,
            exclude_routers: Vec::new(),
            exclude_dexes: Vec::new(),
        }
    }

    pub fn with_taker(mut self, taker: impl Into<String>) -> Self {
        self.taker = Some(taker.into());
        self
    }

    pub fn with_referral(mut self, account: impl Into<String>, fee_bps: u16) -> Self {
        self.referral_account = Some(account.into());
        self.referral_fee = Some(fee_bps);
        self
    }

    pub fn with_exclude_routers(mut self, routers: impl IntoIterator<Item = Router>) -> Self {
        self.exclude_routers = routers.into_iter().collect();
        self
    }

    pub fn with_exclude_dexes<I, S>(mut self, dexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dexes = dexes.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_mint.trim().is_empty() {
            return Err(UltraError::validation("input_mint", "must not be empty"));
        }
        if self.output_mint.trim().is_empty() {
            return Err(UltraError::validation("output_mint", "must not be empty"));
        }
        if self.amount == 0 {
            return Err(UltraError::validation("amount", "must be greater than zero"));
        }
        if self.referral_fee.is_some() && self.referral_account.is_none() {
            return Err(UltraError::validation(
                "referral_fee",
                "requires referral_account to be set",
            ));
        }
        Ok(())
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("inputMint", self.input_mint.clone()),
            ("outputMint", self.output_mint.clone()),
            ("amount", self.amount.to_string()),
        ];

        if let Some(taker) = &self.taker {
            query.push(("taker", taker.clone()));
        }
        if let Some(account) = &self.referral_account {
            query.push(("referralAccount", account.clone()));
            if let Some(fee) = self.referral_fee {
                query.push(("referralFee", fee.to_string()));
            }
        }
        if !self.exclude_routers.is_empty() {
            let routers: Vec<String> = self.exclude_routers.iter().map(ToString::to_string).collect();
            query.push(("excludeRouters", routers.join(",")));
        }
        if !self.exclude_dexes.is_empty() {
            query.push(("excludeDexes", self.exclude_dexes.join(",")));
        }

        query
    }
}

/// Body for `POST /ultra/v1/execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub signed_transaction: String,
    pub request_id: String,
}

impl ExecuteRequest {
    pub fn new(request_id: impl Into<String>, signed_transaction: impl Into<String>) -> Self {
        Self {
            signed_transaction: signed_transaction.into(),
            request_id: request_id.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_id.is_empty() {
            return Err(UltraError::validation("request_id", "must not be empty"));
        }
        if self.signed_transaction.is_empty() {
            return Err(UltraError::validation("signed_transaction", "must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Base64 unsigned transaction. Absent or empty when no taker was given
    /// or the taker cannot fund the swap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExecuteResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }
}

/// One entry of a balances response. Every field is optional so that a single
/// odd entry does not fail the whole response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    /// Raw amount in the token's smallest unit, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_frozen: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Balances keyed by token symbol (or mint for tokens without one).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalancesResponse(pub HashMap<String, TokenBalance>);

impl BalancesResponse {
    pub fn get(&self, token: &str) -> Option<&TokenBalance> {
        self.0.get(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldWarning {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShieldResponse {
    /// Mints the server has nothing to report on are absent, not empty.
    #[serde(default)]
    pub warnings: HashMap<String, Vec<ShieldWarning>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ShieldResponse {
    pub fn warnings_for(&self, mint: &str) -> &[ShieldWarning] {
        self.warnings.get(mint).map_or(&[], Vec::as_slice)
    }
}
