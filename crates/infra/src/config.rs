//! Service configuration.
//!
//! Defaults live in code; an optional `roofline.toml` and `ROOFLINE__*`
//! environment variables override them (`ROOFLINE__SERVER__PORT=9000`).

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use roofline_notify::WhatsAppConfig;
use roofline_quotes::{CalculatorSettings, DEFAULT_CITY};

pub const ENV_PREFIX: &str = "ROOFLINE";
pub const DEFAULT_CONFIG_FILE: &str = "roofline";

/// Built-in admin token secret. Only accepted when running on seeded
/// in-memory data.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pricing: PricingConfig,
    pub notifications: NotificationsConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres URL. Without one the service runs on seeded in-memory data.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    pub default_city: String,
    pub lookup_timeout_ms: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            lookup_timeout_ms: 5_000,
        }
    }
}

impl PricingConfig {
    pub fn calculator_settings(&self) -> CalculatorSettings {
        CalculatorSettings {
            default_city: self.default_city.trim().to_string(),
            lookup_timeout: Duration::from_millis(self.lookup_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub enabled: bool,
    pub base_url: String,
    pub phone_number_id: String,
    pub access_token: String,
    pub recipient: String,
    pub timeout_seconds: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://graph.facebook.com/v19.0".to_string(),
            phone_number_id: String::new(),
            access_token: String::new(),
            recipient: String::new(),
            timeout_seconds: 10,
        }
    }
}

impl NotificationsConfig {
    pub fn whatsapp(&self) -> WhatsAppConfig {
        WhatsAppConfig {
            base_url: self.base_url.clone(),
            phone_number_id: self.phone_number_id.clone(),
            access_token: self.access_token.clone(),
            recipient: self.recipient.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret for admin tokens.
    pub jwt_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
        }
    }
}

impl AuthConfig {
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

/// Load from `roofline.toml` (optional) and the environment.
pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from(DEFAULT_CONFIG_FILE)
}

pub fn load_config_from(file: &str) -> anyhow::Result<AppConfig> {
    let config = config::Config::builder()
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("failed to read configuration sources")?;

    let cfg: AppConfig = config
        .try_deserialize()
        .context("failed to deserialize configuration")?;
    validate_config(&cfg)?;

    Ok(cfg)
}

/// Parse a TOML document on top of the defaults. No environment overrides.
pub fn config_from_toml(toml: &str) -> anyhow::Result<AppConfig> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()
        .context("failed to parse configuration")?;

    let cfg: AppConfig = config
        .try_deserialize()
        .context("failed to deserialize configuration")?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &AppConfig) -> anyhow::Result<()> {
    if cfg.pricing.default_city.trim().is_empty() {
        anyhow::bail!("pricing.default_city cannot be empty");
    }

    if cfg.pricing.lookup_timeout_ms == 0 {
        anyhow::bail!("pricing.lookup_timeout_ms must be greater than zero");
    }

    if cfg.database.url.is_some() && cfg.database.max_connections == 0 {
        anyhow::bail!("database.max_connections must be greater than zero");
    }

    if cfg.auth.jwt_secret.is_empty() {
        anyhow::bail!("auth.jwt_secret cannot be empty");
    }

    if cfg.database.url.is_some() && cfg.auth.uses_dev_secret() {
        anyhow::bail!("auth.jwt_secret must be set when database.url is configured");
    }

    let notifications = &cfg.notifications;
    if notifications.enabled {
        if notifications.access_token.trim().is_empty() {
            anyhow::bail!("notifications are enabled but notifications.access_token is empty");
        }
        if notifications.recipient.trim().is_empty() {
            anyhow::bail!("notifications are enabled but notifications.recipient is empty");
        }
        if notifications.phone_number_id.trim().is_empty() {
            anyhow::bail!("notifications are enabled but notifications.phone_number_id is empty");
        }
        if notifications.timeout_seconds == 0 {
            anyhow::bail!("notifications.timeout_seconds must be greater than zero");
        }
    }

    Ok(())
}
