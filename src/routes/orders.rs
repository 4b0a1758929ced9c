//! Payment-order creation.
//!
//! Validates the caller's body, then forwards it to the settlement API.
//! Validation failures never produce an outbound call.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::models::AppState;
use crate::settlement::{OrderRecipient, OrderResponse, SenderOrder};
use crate::types::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(required)]
    pub amount: Option<Decimal>,
    #[validate(required)]
    pub token: Option<String>,
    #[validate(required)]
    pub network: Option<String>,
    #[validate(required)]
    pub recipient: Option<RecipientRequest>,
    pub return_address: Option<String>,
    pub reference: Option<String>,
    pub memo: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RecipientRequest {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub account_identifier: String,
    #[serde(default)]
    pub account_name: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/orders", post(create_order))
        .with_state(state)
}

async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    request.validate().map_err(missing_fields_error)?;

    let CreateOrderRequest {
        amount,
        token,
        network,
        recipient,
        return_address,
        reference,
        memo,
    } = request;
    let (Some(amount), Some(token), Some(network), Some(recipient)) =
        (amount, token, network, recipient)
    else {
        return Err(AppError::Internal("validated fields missing".to_string()));
    };

    if amount <= Decimal::ZERO {
        return Err(AppError::Validation("amount must be positive".to_string()));
    }
    for (value, name) in [
        (&recipient.institution, "recipient.institution"),
        (&recipient.account_identifier, "recipient.account_identifier"),
        (&recipient.account_name, "recipient.account_name"),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} must not be empty", name)));
        }
    }

    let reference = reference.unwrap_or_else(|| Uuid::new_v4().to_string());
    info!(%reference, %amount, %token, "forwarding payment order");

    let order = SenderOrder {
        amount,
        token,
        network,
        reference,
        return_address,
        recipient: OrderRecipient {
            institution: recipient.institution,
            account_identifier: recipient.account_identifier,
            account_name: recipient.account_name,
            memo,
        },
    };

    let created = state.settlement.create_order(&order).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

fn missing_fields_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    fields.sort();
    AppError::Validation(format!("missing required fields: {}", fields.join(", ")))
}
