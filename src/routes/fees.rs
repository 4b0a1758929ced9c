//! Fee quote endpoint.

use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::fees::FeeQuote;
use crate::models::AppState;
use crate::types::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct FeeParams {
    amount: Option<Decimal>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/fees", get(quote_fee))
        .with_state(state)
}

async fn quote_fee(
    State(state): State<AppState>,
    Query(params): Query<FeeParams>,
) -> AppResult<Json<FeeQuote>> {
    let amount = params
        .amount
        .ok_or_else(|| AppError::Validation("amount query parameter is required".to_string()))?;
    Ok(Json(state.fees.quote(amount)?))
}
