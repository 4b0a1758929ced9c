//! Farcaster profile lookup.
//!
//! `/api/profiles/{fid}` proxies the social-graph API and records the result
//! in the advisory detected-user slot; `/api/profiles/current` reads that
//! slot back. The several "detect current user" variants of earlier builds
//! are consolidated here.

use axum::extract::{Path, State};
use axum::{routing::get, Json, Router};
use chrono::Utc;

use crate::cache::DetectedUser;
use crate::farcaster::Profile;
use crate::models::AppState;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/profiles/current", get(current_profile))
        .route("/api/profiles/{fid}", get(lookup_profile))
        .with_state(state)
}

async fn lookup_profile(
    State(state): State<AppState>,
    Path(fid): Path<u64>,
) -> AppResult<Json<Profile>> {
    let profile = state.farcaster.get_profile(fid).await?;

    state.detected_user.record(DetectedUser {
        fid: profile.fid,
        username: profile.username.clone(),
        detected_at: Utc::now(),
    });

    Ok(Json(profile))
}

async fn current_profile(State(state): State<AppState>) -> AppResult<Json<DetectedUser>> {
    state
        .detected_user
        .current()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no user detected yet".to_string()))
}
