// ABOUTME: Configuration for the Open Food Facts remote fallback
// ABOUTME: Base URL, timeout and user agent, loaded from OFF_* variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{env_parse_or, env_var_or};
use crate::constants::{defaults, env_keys, limits};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use vantage_core::errors::{AppError, AppResult};

/// Open Food Facts search API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenFoodFactsConfig {
    /// Use the remote fallback at all
    pub enabled: bool,
    /// API base URL without trailing slash
    pub base_url: String,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for OpenFoodFactsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: defaults::OPEN_FOOD_FACTS_BASE_URL.to_owned(),
            timeout_secs: defaults::OPEN_FOOD_FACTS_TIMEOUT_SECS,
            user_agent: defaults::OPEN_FOOD_FACTS_USER_AGENT.to_owned(),
        }
    }
}

impl OpenFoodFactsConfig {
    /// Load from environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but unparseable
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            enabled: env_parse_or(env_keys::OFF_ENABLED, true)?,
            base_url: env_var_or(env_keys::OFF_BASE_URL, defaults::OPEN_FOOD_FACTS_BASE_URL)
                .trim_end_matches('/')
                .to_owned(),
            timeout_secs: env_parse_or(
                env_keys::OFF_TIMEOUT_SECS,
                defaults::OPEN_FOOD_FACTS_TIMEOUT_SECS,
            )?,
            user_agent: env_var_or(
                env_keys::OFF_USER_AGENT,
                defaults::OPEN_FOOD_FACTS_USER_AGENT,
            ),
        })
    }

    /// Request timeout as a duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the settings
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the timeout is outside 1-60 seconds or the URL is not HTTP
    pub fn validate(&self) -> AppResult<()> {
        if self.timeout_secs == 0 || self.timeout_secs > limits::MAX_TIMEOUT_SECS {
            return Err(AppError::config_invalid(format!(
                "Open Food Facts timeout_secs must be between 1 and {}, got {}",
                limits::MAX_TIMEOUT_SECS,
                self.timeout_secs
            )));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AppError::config_invalid(format!(
                "Open Food Facts base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }
}
