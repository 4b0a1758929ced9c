// Settlement API client (Paycrest-compatible sender order endpoint).
//
// One request/response per call, no retries. Upstream error bodies are
// logged and replaced by a generic message before reaching the caller.

use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::types::{AppError, AppResult};

const DEFAULT_API_BASE: &str = "https://api.paycrest.io/v1";

#[derive(Clone)]
pub struct SettlementClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Order payload forwarded to the settlement API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderOrder {
    pub amount: Decimal,
    pub token: String,
    pub network: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_address: Option<String>,
    pub recipient: OrderRecipient,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecipient {
    pub institution: String,
    pub account_identifier: String,
    pub account_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

// Upstream response envelope.
#[derive(Debug, Deserialize)]
struct OrderEnvelope {
    #[allow(dead_code)]
    status: String,
    #[allow(dead_code)]
    message: String,
    data: OrderData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderData {
    id: String,
    reference: Option<String>,
    receive_address: String,
    valid_until: Option<String>,
    sender_fee: Option<Decimal>,
}

/// Stable reshaped order, decoupled from the upstream schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub reference: String,
    pub receive_address: String,
    pub valid_until: Option<String>,
    pub sender_fee: Option<Decimal>,
    pub total_amount: Decimal,
    pub status: String,
}

impl SettlementClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn create_order(&self, order: &SenderOrder) -> AppResult<OrderResponse> {
        let url = format!("{}/sender/orders", self.base_url);
        info!(reference = %order.reference, token = %order.token, "creating settlement order");

        let response = self
            .client
            .post(&url)
            .header("API-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(order)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "settlement request failed");
                AppError::UpstreamUnavailable("settlement API unreachable".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "settlement API returned an error");
            return Err(AppError::Upstream(status.as_u16()));
        }

        let envelope: OrderEnvelope = response.json().await.map_err(|e| {
            error!(error = %e, "malformed settlement response");
            AppError::UpstreamUnavailable("malformed settlement response".to_string())
        })?;

        let data = envelope.data;
        let sender_fee = data.sender_fee;
        Ok(OrderResponse {
            id: data.id,
            reference: data.reference.unwrap_or_else(|| order.reference.clone()),
            receive_address: data.receive_address,
            valid_until: data.valid_until,
            sender_fee,
            total_amount: order.amount + sender_fee.unwrap_or(Decimal::ZERO),
            status: "pending".to_string(),
        })
    }
}
