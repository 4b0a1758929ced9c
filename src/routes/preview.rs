//! Open Graph preview image endpoint.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::{routing::get, Router};
use serde::Deserialize;
use tracing::{error, warn};
use uuid::Uuid;

use crate::card::{self, CardContent};
use crate::models::AppState;
use crate::types::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    amount: Option<String>,
    currency: Option<String>,
    description: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/og", get(preview_image))
        .with_state(state)
}

async fn preview_image(
    State(state): State<AppState>,
    Query(params): Query<PreviewParams>,
) -> AppResult<impl IntoResponse> {
    let content = CardContent::from_params(params.amount, params.currency, params.description);

    // Scratch file per request; plotters' bitmap encoder writes to a path.
    let path = std::env::temp_dir().join(format!("paylink-card-{}.png", Uuid::new_v4()));

    card::render_png(&state.config.branding.app_name, &content, &path).map_err(|e| {
        error!(error = %e, "preview card rendering failed");
        AppError::Internal("preview rendering failed".to_string())
    })?;

    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        error!(error = %e, "failed to read rendered preview card");
        AppError::Internal("preview rendering failed".to_string())
    })?;

    if let Err(e) = tokio::fs::remove_file(&path).await {
        warn!(error = %e, "failed to remove preview scratch file");
    }

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        bytes,
    ))
}
