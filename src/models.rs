use std::sync::Arc;

use crate::cache::DetectedUserSlot;
use crate::config::Config;
use crate::farcaster::FarcasterClient;
use crate::fees::FeeSchedule;
use crate::settlement::SettlementClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fees: Arc<FeeSchedule>,
    pub settlement: SettlementClient,
    pub farcaster: FarcasterClient,
    pub detected_user: DetectedUserSlot,
}

impl AppState {
    pub fn new(config: Config, fees: FeeSchedule) -> Self {
        let settlement =
            SettlementClient::with_base_url(&config.settlement.api_key, &config.settlement.api_base);
        let farcaster =
            FarcasterClient::with_base_url(&config.farcaster.api_key, &config.farcaster.api_base);

        Self {
            config: Arc::new(config),
            fees: Arc::new(fees),
            settlement,
            farcaster,
            detected_user: DetectedUserSlot::default(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::{
        BrandingConfig, FarcasterConfig, GuardConfig, ServerConfig, SettlementConfig,
    };

    pub fn test_config(settlement_base: &str, farcaster_base: &str) -> Config {
        Config {
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
                cors_allowed_origins: vec!["*".to_string()],
            },
            branding: BrandingConfig {
                app_name: "Paylink".to_string(),
                base_url: "https://pay.example.com".to_string(),
                icon_url: "https://pay.example.com/icon.png".to_string(),
                splash_url: "https://pay.example.com/splash.png".to_string(),
                splash_background: "#101830".to_string(),
                required_chains: vec!["eip155:8453".to_string()],
                account_association: None,
            },
            settlement: SettlementConfig {
                api_base: settlement_base.to_string(),
                api_key: "test-settlement-key".to_string(),
            },
            farcaster: FarcasterConfig {
                api_base: farcaster_base.to_string(),
                api_key: "test-farcaster-key".to_string(),
            },
            guard: GuardConfig {
                protected_prefixes: vec!["/send".to_string(), "/history".to_string()],
                referrer_exempt_path: "/send/confirm".to_string(),
            },
        }
    }

    pub fn test_state(settlement_base: &str, farcaster_base: &str) -> AppState {
        let fees = FeeSchedule::standard().expect("standard schedule is valid");
        AppState::new(test_config(settlement_base, farcaster_base), fees)
    }
}
