// ABOUTME: Configuration for the local SQLite product index
// ABOUTME: URL, read-only flag and pool size, loaded from VANTAGE_DATABASE_* variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::env_parse_or;
use crate::constants::{defaults, env_keys};
use serde::{Deserialize, Serialize};
use std::env;
use vantage_core::errors::{AppError, AppResult};

/// Local product index connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLite` URL, e.g. `sqlite:./data/vantage_core.db`
    pub url: String,
    /// Open without write access; the engine never writes
    pub read_only: bool,
    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DATABASE_URL.to_owned(),
            read_only: true,
            max_connections: defaults::DATABASE_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Writable configuration for tools that build the index
    #[must_use]
    pub fn writable(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            read_only: false,
            ..Self::default()
        }
    }

    /// Load from environment.
    ///
    /// `VANTAGE_DATABASE_URL` wins over `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but unparseable
    pub fn from_env() -> AppResult<Self> {
        let url = env::var(env_keys::DATABASE_URL)
            .or_else(|_| env::var(env_keys::FALLBACK_DATABASE_URL))
            .unwrap_or_else(|_| defaults::DATABASE_URL.to_owned());

        Ok(Self {
            url,
            read_only: env_parse_or(env_keys::DATABASE_READ_ONLY, true)?,
            max_connections: env_parse_or(
                env_keys::DATABASE_MAX_CONNECTIONS,
                defaults::DATABASE_MAX_CONNECTIONS,
            )?,
        })
    }

    /// Whether the URL points at an in-memory database
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// Validate the settings
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for a non-SQLite URL or an empty pool
    pub fn validate(&self) -> AppResult<()> {
        if !self.url.starts_with("sqlite:") {
            return Err(AppError::config_invalid(format!(
                "database url must start with 'sqlite:', got '{}'",
                self.url
            )));
        }
        if self.max_connections == 0 {
            return Err(AppError::config_invalid(
                "database max_connections must be at least 1",
            ));
        }
        Ok(())
    }
}
