// ABOUTME: Configuration for candidate ranking and result limits
// ABOUTME: Default result count and the store candidate pool, loaded from RESOLVER_* variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::env_parse_or;
use crate::constants::{defaults, env_keys, limits};
use serde::{Deserialize, Serialize};
use vantage_core::errors::{AppError, AppResult};

/// Resolver limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Results returned when the caller passes no limit
    pub default_limit: usize,
    /// Substring matches pulled from the store before ranking
    pub candidate_pool: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::RESULT_LIMIT,
            candidate_pool: defaults::CANDIDATE_POOL,
        }
    }
}

impl ResolverConfig {
    /// Load from environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but unparseable
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            default_limit: env_parse_or(env_keys::RESOLVER_DEFAULT_LIMIT, defaults::RESULT_LIMIT)?,
            candidate_pool: env_parse_or(
                env_keys::RESOLVER_CANDIDATE_POOL,
                defaults::CANDIDATE_POOL,
            )?,
        })
    }

    /// Validate the settings
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the limit is outside 1-50 or the pool is smaller than the limit
    pub fn validate(&self) -> AppResult<()> {
        if self.default_limit == 0 || self.default_limit > limits::MAX_RESULT_LIMIT {
            return Err(AppError::config_invalid(format!(
                "resolver default_limit must be between 1 and {}, got {}",
                limits::MAX_RESULT_LIMIT,
                self.default_limit
            )));
        }
        if self.candidate_pool < self.default_limit {
            return Err(AppError::config_invalid(format!(
                "resolver candidate_pool ({}) must be at least default_limit ({})",
                self.candidate_pool, self.default_limit
            )));
        }
        Ok(())
    }
}
