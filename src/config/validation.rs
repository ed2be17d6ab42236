//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{DriveDeskError, Result};
use super::{Settings, StoreBackend};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_store_config(&settings.store)?;
    validate_logging_config(&settings.logging)?;
    validate_admin_config(&settings.admin)?;

    Ok(())
}

/// Validate record store configuration
fn validate_store_config(config: &super::StoreConfig) -> Result<()> {
    if config.backend == StoreBackend::Memory {
        return Ok(());
    }

    if config.url.is_empty() {
        return Err(DriveDeskError::Config(
            "Store URL is required for the postgres backend".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(DriveDeskError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(DriveDeskError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_seconds == 0 {
        return Err(DriveDeskError::Config(
            "Acquire timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(DriveDeskError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(DriveDeskError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.directory.is_empty() || config.file_prefix.is_empty() {
        return Err(DriveDeskError::Config(
            "Log directory and file prefix are required".to_string()
        ));
    }

    Ok(())
}

/// Validate administrator account configuration
fn validate_admin_config(config: &super::AdminConfig) -> Result<()> {
    if config.username.trim().is_empty() {
        return Err(DriveDeskError::Config(
            "Admin username is required".to_string()
        ));
    }

    if config.password.is_empty() {
        return Err(DriveDeskError::Config(
            "Admin password is required".to_string()
        ));
    }

    Ok(())
}
