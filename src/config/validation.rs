//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{VolunteerPayError, Result};
use super::Settings;

const VALID_GENESIS: [&str; 2] = ["test", "main"];

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_wallet_config(&settings.wallet)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(VolunteerPayError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.admin_ids.is_empty() {
        return Err(VolunteerPayError::Config(
            "At least one admin ID must be configured".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(VolunteerPayError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(VolunteerPayError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(VolunteerPayError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(VolunteerPayError::Config(
            "Redis URL is required".to_string()
        ));
    }

    Ok(())
}

/// Validate wallet connector configuration
fn validate_wallet_config(config: &super::WalletConfig) -> Result<()> {
    if config.connector_url.is_empty() {
        return Err(VolunteerPayError::Config(
            "Wallet connector URL is required".to_string()
        ));
    }
    url::Url::parse(&config.connector_url)?;

    if config.node_url.is_empty() {
        return Err(VolunteerPayError::Config(
            "Node URL is required".to_string()
        ));
    }
    url::Url::parse(&config.node_url)?;

    if !VALID_GENESIS.contains(&config.genesis.as_str()) {
        return Err(VolunteerPayError::Config(
            format!("Invalid genesis: {}. Valid values: {:?}", config.genesis, VALID_GENESIS)
        ));
    }

    if config.timeout_seconds == 0 || config.signing_timeout_seconds == 0 {
        return Err(VolunteerPayError::Config(
            "Wallet timeouts must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(VolunteerPayError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(VolunteerPayError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
