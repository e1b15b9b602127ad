// ABOUTME: Environment-driven configuration for the food resolution engine
// ABOUTME: Aggregates store, remote lookup and resolver settings with range validation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Configuration
//!
//! All settings come from environment variables with safe defaults; there is
//! no configuration file. Call [`EngineConfig::from_env`] once at process start
//! and pass the result to the engine.

/// Local product index settings
pub mod database;
/// Open Food Facts client settings
pub mod external;
/// Ranking and result-size settings
pub mod resolver;

pub use database::DatabaseConfig;
pub use external::OpenFoodFactsConfig;
pub use resolver::ResolverConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use vantage_core::errors::{AppError, AppResult};

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Local product index
    pub database: DatabaseConfig,
    /// Remote fallback
    pub open_food_facts: OpenFoodFactsConfig,
    /// Ranking and limits
    pub resolver: ResolverConfig,
}

impl EngineConfig {
    /// Load configuration from the environment and validate it
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or a value is out of range
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            database: DatabaseConfig::from_env()?,
            open_food_facts: OpenFoodFactsConfig::from_env()?,
            resolver: ResolverConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for the first out-of-range value
    pub fn validate(&self) -> AppResult<()> {
        self.database.validate()?;
        self.open_food_facts.validate()?;
        self.resolver.validate()
    }
}

/// Parse an environment variable, falling back to `default` when unset.
///
/// A set but unparseable value is an error rather than a silent default.
pub(crate) fn env_parse_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}

/// Get environment variable or default value
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
