use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub branding: BrandingConfig,
    pub settlement: SettlementConfig,
    pub farcaster: FarcasterConfig,
    pub guard: GuardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandingConfig {
    pub app_name: String,
    /// Public base URL of the deployed mini-app, e.g. "https://pay.example.com".
    pub base_url: String,
    pub icon_url: String,
    pub splash_url: String,
    pub splash_background: String,
    pub required_chains: Vec<String>,
    pub account_association: Option<AccountAssociation>,
}

/// Signed proof binding the mini-app domain to a Farcaster account.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountAssociation {
    pub header: String,
    pub payload: String,
    pub signature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    pub api_base: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FarcasterConfig {
    pub api_base: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuardConfig {
    /// Path prefixes that require a connected wallet.
    pub protected_prefixes: Vec<String>,
    /// Guarded path that is still allowed when the request was navigated to
    /// from inside the app (same-origin referrer). Prevents a redirect loop
    /// on the confirmation step.
    pub referrer_exempt_path: String,
}

impl Config {
    /// Load configuration from the environment, failing fast when a required
    /// key is absent. Endpoints depending on an upstream secret must never
    /// start with an empty key.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = required("APP_BASE_URL")?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("APP_BASE_URL must be an absolute http(s) URL");
        }
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .context("PORT must be a valid port number")?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            branding: BrandingConfig {
                app_name: env::var("APP_NAME").unwrap_or_else(|_| "Paylink".to_string()),
                icon_url: env::var("APP_ICON_URL")
                    .unwrap_or_else(|_| format!("{}/icon.png", base_url)),
                splash_url: env::var("APP_SPLASH_URL")
                    .unwrap_or_else(|_| format!("{}/splash.png", base_url)),
                splash_background: env::var("APP_SPLASH_BACKGROUND")
                    .unwrap_or_else(|_| "#101830".to_string()),
                required_chains: env::var("APP_REQUIRED_CHAINS")
                    .unwrap_or_else(|_| "eip155:8453".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
                account_association: account_association_from_env()?,
                base_url,
            },
            settlement: SettlementConfig {
                api_base: env::var("SETTLEMENT_API_BASE")
                    .unwrap_or_else(|_| "https://api.paycrest.io/v1".to_string()),
                api_key: required("SETTLEMENT_API_KEY")?,
            },
            farcaster: FarcasterConfig {
                api_base: env::var("FARCASTER_API_BASE")
                    .unwrap_or_else(|_| "https://api.neynar.com/v2/farcaster".to_string()),
                api_key: required("FARCASTER_API_KEY")?,
            },
            guard: GuardConfig {
                protected_prefixes: env::var("PROTECTED_PATHS")
                    .unwrap_or_else(|_| "/send,/history".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                referrer_exempt_path: env::var("REFERRER_EXEMPT_PATH")
                    .unwrap_or_else(|_| "/send/confirm".to_string()),
            },
        })
    }
}

fn required(key: &str) -> Result<String> {
    let value = env::var(key).with_context(|| format!("{} must be set", key))?;
    if value.trim().is_empty() {
        bail!("{} must not be empty", key);
    }
    Ok(value)
}

/// The three association fields are only meaningful together; a partial set
/// is a deployment mistake and rejected at startup.
fn account_association_from_env() -> Result<Option<AccountAssociation>> {
    let header = env::var("MINIAPP_ASSOCIATION_HEADER").ok();
    let payload = env::var("MINIAPP_ASSOCIATION_PAYLOAD").ok();
    let signature = env::var("MINIAPP_ASSOCIATION_SIGNATURE").ok();

    match (header, payload, signature) {
        (Some(header), Some(payload), Some(signature)) => Ok(Some(AccountAssociation {
            header,
            payload,
            signature,
        })),
        (None, None, None) => Ok(None),
        _ => bail!(
            "MINIAPP_ASSOCIATION_HEADER, MINIAPP_ASSOCIATION_PAYLOAD and \
             MINIAPP_ASSOCIATION_SIGNATURE must be set together"
        ),
    }
}
