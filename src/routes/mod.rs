//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/.well-known/farcaster.json` - mini-app manifest
//! - `/api/health` - health check
//! - `/api/fees` - fee quote for a payment amount
//! - `/api/og` - Open Graph preview card
//! - `/api/orders` - payment-order creation (settlement proxy)
//! - `/api/profiles` - Farcaster profile lookup (social-graph proxy)
//! - `/`, `/pay`, `/send`, `/history` - HTML pages (wallet guard applies)

pub mod fees;
pub mod health;
pub mod manifest;
pub mod orders;
pub mod pages;
pub mod preview;
pub mod profiles;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router.
///
/// API routes are prefixed with `/api/`; the manifest lives under
/// `/.well-known/`; everything else is an HTML page. The wallet guard is
/// layered onto the page router only.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let api_router = Router::new()
        .merge(health::router())
        .merge(manifest::router(state.clone()))
        .merge(fees::router(state.clone()))
        .merge(preview::router(state.clone()))
        .merge(orders::router(state.clone()))
        .merge(profiles::router(state.clone()));

    let router = Router::new()
        .merge(api_router)
        .merge(pages::router(state.clone()))
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &state.config.server)
}
