// Farcaster social-graph client (Neynar-compatible user API).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::types::{AppError, AppResult};

const DEFAULT_API_BASE: &str = "https://api.neynar.com/v2/farcaster";

#[derive(Clone)]
pub struct FarcasterClient {
    client: Client,
    api_key: String,
    base_url: String,
}

// Upstream response shapes. Only the fields we reshape are declared.
#[derive(Debug, Deserialize)]
struct UserBulkEnvelope {
    users: Vec<FarcasterUser>,
}

#[derive(Debug, Deserialize)]
struct FarcasterUser {
    fid: u64,
    username: String,
    display_name: Option<String>,
    pfp_url: Option<String>,
    custody_address: Option<String>,
    verified_addresses: Option<VerifiedAddresses>,
}

#[derive(Debug, Deserialize)]
struct VerifiedAddresses {
    #[serde(default)]
    eth_addresses: Vec<String>,
}

/// Stable reshaped profile, decoupled from the upstream schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub fid: u64,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub custody_address: Option<String>,
    pub verified_addresses: Vec<String>,
}

impl FarcasterClient {
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

    /// Look up one user by fid and reshape the response. Idempotent for an
    /// unchanged upstream.
    pub async fn get_profile(&self, fid: u64) -> AppResult<Profile> {
        let url = format!("{}/user/bulk?fids={}", self.base_url, fid);
        debug!(fid, "looking up Farcaster profile");

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "profile request failed");
                AppError::UpstreamUnavailable("social-graph API unreachable".to_string())
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("no Farcaster user with fid {}", fid)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "social-graph API returned an error");
            return Err(AppError::Upstream(status.as_u16()));
        }

        let envelope: UserBulkEnvelope = response.json().await.map_err(|e| {
            error!(error = %e, "malformed profile response");
            AppError::UpstreamUnavailable("malformed profile response".to_string())
        })?;

        let user = envelope
            .users
            .into_iter()
            .find(|u| u.fid == fid)
            .ok_or_else(|| AppError::NotFound(format!("no Farcaster user with fid {}", fid)))?;

        Ok(Profile {
            fid: user.fid,
            display_name: user.display_name.unwrap_or_else(|| user.username.clone()),
            username: user.username,
            avatar_url: user.pfp_url,
            custody_address: user.custody_address,
            verified_addresses: user
                .verified_addresses
                .map(|v| v.eth_addresses)
                .unwrap_or_default(),
        })
    }
}
