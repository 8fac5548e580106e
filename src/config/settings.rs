//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub wallet: WalletConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    pub admin_ids: Vec<i64>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration (conversation state)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Wallet connector and ledger network configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalletConfig {
    /// Base URL of the wallet connector service
    pub connector_url: String,
    /// Node the connector submits signed transactions to
    pub node_url: String,
    /// Network genesis name (`test` or `main`)
    pub genesis: String,
    /// Timeout for account lookups and the challenge fetch
    pub timeout_seconds: u64,
    /// Timeout for a signing request, which waits on the user
    pub signing_timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_name: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", defaults.database.max_connections)?
            .set_default("database.min_connections", defaults.database.min_connections)?
            .set_default("redis.url", defaults.redis.url)?
            .set_default("redis.prefix", defaults.redis.prefix)?
            .set_default("redis.ttl_seconds", defaults.redis.ttl_seconds)?
            .set_default("wallet.connector_url", defaults.wallet.connector_url)?
            .set_default("wallet.node_url", defaults.wallet.node_url)?
            .set_default("wallet.genesis", defaults.wallet.genesis)?
            .set_default("wallet.timeout_seconds", defaults.wallet.timeout_seconds)?
            .set_default("wallet.signing_timeout_seconds", defaults.wallet.signing_timeout_seconds)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.directory", defaults.logging.directory)?
            .set_default("logging.file_name", defaults.logging.file_name)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("VOLUNTEERPAY")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bot.admin_ids")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::VolunteerPayError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                admin_ids: vec![],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/volunteerpay".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "volunteerpay:".to_string(),
                ttl_seconds: 3600,
            },
            wallet: WalletConfig {
                connector_url: "http://localhost:8787".to_string(),
                node_url: "https://testnet.vechain.org".to_string(),
                genesis: "test".to_string(),
                timeout_seconds: 10,
                signing_timeout_seconds: 300,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: "logs".to_string(),
                file_name: "volunteerpay.log".to_string(),
            },
        }
    }
}
