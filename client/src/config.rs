//! Configuration management for the LiveMART purchase client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with LIVEMART_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{SessionUser, UserRole, DEFAULT_MARKUP_PERCENT};

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Marketplace API configuration
    pub api: ApiConfig,

    /// Signed-in user, normally supplied by the auth context
    pub session: SessionConfig,

    /// Purchase page behaviour
    pub purchase: PurchaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the LiveMART backend, without the `/api` prefix
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub user_id: String,
    pub role: UserRole,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PurchaseConfig {
    /// Markup the purchase form starts with
    pub default_markup_percent: Decimal,

    /// Delay before navigating to the dashboard after a successful purchase
    pub redirect_delay_ms: u64,

    /// Route navigated to after a successful purchase
    pub dashboard_path: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("LIVEMART_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_for(&environment)
    }

    /// Load configuration for an explicit environment name
    pub fn load_for(environment: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("api.base_url", "http://localhost:8000")?
            .set_default("api.timeout_secs", 30)?
            .set_default("session.user_id", "")?
            .set_default("session.role", "retailer")?
            .set_default("purchase.default_markup_percent", 20)?
            .set_default("purchase.redirect_delay_ms", 2000)?
            .set_default("purchase.dashboard_path", "/retailer/dashboard")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (LIVEMART_ prefix)
            .add_source(
                Environment::with_prefix("LIVEMART")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn session_user(&self) -> SessionUser {
        SessionUser::new(self.session.user_id.clone(), self.session.role)
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl PurchaseConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        Self {
            default_markup_percent: DEFAULT_MARKUP_PERCENT,
            redirect_delay_ms: 2000,
            dashboard_path: "/retailer/dashboard".to_string(),
        }
    }
}
