// Paylink - Farcaster mini-app backend for stablecoin payment links

pub mod cache;
pub mod card;
pub mod config;
pub mod farcaster;
pub mod fees;
pub mod html;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod settlement;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
