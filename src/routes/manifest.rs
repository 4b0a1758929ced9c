//! Mini-app manifest.
//!
//! `/.well-known/farcaster.json` describes the app (branding, entry points,
//! accepted chains) to Farcaster clients. The document is static per process,
//! so it is served cacheable.

use axum::http::header;
use axum::response::IntoResponse;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::config::{AccountAssociation, BrandingConfig};
use crate::models::AppState;

pub const MANIFEST_CACHE_CONTROL: &str = "public, max-age=3600";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MiniAppManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    account_association: Option<AssociationDoc>,
    frame: FrameManifest,
}

#[derive(Debug, Serialize)]
struct AssociationDoc {
    header: String,
    payload: String,
    signature: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameManifest {
    version: String,
    name: String,
    home_url: String,
    icon_url: String,
    splash_image_url: String,
    splash_background_color: String,
    required_chains: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/.well-known/farcaster.json", get(manifest))
        .with_state(state)
}

async fn manifest(State(state): State<AppState>) -> impl IntoResponse {
    let doc = build_manifest(&state.config.branding);
    (
        [(header::CACHE_CONTROL, MANIFEST_CACHE_CONTROL)],
        Json(doc),
    )
}

fn build_manifest(branding: &BrandingConfig) -> MiniAppManifest {
    MiniAppManifest {
        account_association: branding.account_association.as_ref().map(AssociationDoc::from),
        frame: FrameManifest {
            version: "1".to_string(),
            name: branding.app_name.clone(),
            home_url: branding.base_url.clone(),
            icon_url: branding.icon_url.clone(),
            splash_image_url: branding.splash_url.clone(),
            splash_background_color: branding.splash_background.clone(),
            required_chains: branding.required_chains.clone(),
        },
    }
}

impl From<&AccountAssociation> for AssociationDoc {
    fn from(assoc: &AccountAssociation) -> Self {
        Self {
            header: assoc.header.clone(),
            payload: assoc.payload.clone(),
            signature: assoc.signature.clone(),
        }
    }
}
