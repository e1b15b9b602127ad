// ABOUTME: FoodEngine service object combining local resolution and remote fallback
// ABOUTME: Constructed once at startup and shared by reference across tasks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::local::{LocalResolution, LocalResolver};
use super::remote::resolve_remote;
use crate::config::{EngineConfig, ResolverConfig};
use crate::constants::limits::MAX_RESULT_LIMIT;
use crate::database::{FoodStore, SqliteFoodStore};
use crate::external::{OpenFoodFactsClient, RemoteFoodSource};
use crate::formatters::{MatchSource, ScoredFood};
use crate::intelligence::scoring;
use std::sync::Arc;
use tracing::{info, instrument};
use vantage_core::errors::{AppError, AppResult};
use vantage_core::models::NutrientRow;

/// Result of a top-level resolution
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// At least one scored candidate
    Found {
        /// Resolver that produced the results
        source: MatchSource,
        /// Ranked results, never empty
        results: Vec<ScoredFood>,
    },
    /// Neither the local index nor the remote fallback had a match
    NotFound,
}

impl Resolution {
    /// Results, empty when not found
    #[must_use]
    pub fn results(&self) -> &[ScoredFood] {
        match self {
            Self::Found { results, .. } => results,
            Self::NotFound => &[],
        }
    }

    /// Take the results, empty when not found
    #[must_use]
    pub fn into_results(self) -> Vec<ScoredFood> {
        match self {
            Self::Found { results, .. } => results,
            Self::NotFound => Vec::new(),
        }
    }

    /// Whether anything matched
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Which resolver answered, if any
    #[must_use]
    pub const fn source(&self) -> Option<MatchSource> {
        match self {
            Self::Found { source, .. } => Some(*source),
            Self::NotFound => None,
        }
    }
}

/// Food resolution and scoring engine.
///
/// Holds no mutable state of its own: the store manages its pool and the
/// remote source its HTTP client, so one engine can serve concurrent callers.
#[derive(Clone)]
pub struct FoodEngine {
    local: LocalResolver,
    remote: Option<Arc<dyn RemoteFoodSource>>,
    config: ResolverConfig,
}

impl FoodEngine {
    /// Create an engine over an explicit store and optional remote fallback
    #[must_use]
    pub fn new(
        store: Arc<dyn FoodStore>,
        remote: Option<Arc<dyn RemoteFoodSource>>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            local: LocalResolver::new(store, config.candidate_pool),
            remote,
            config,
        }
    }

    /// Build the production engine: lazily opened `SQLite` index plus Open Food
    /// Facts when enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client cannot be built
    pub fn from_config(config: &EngineConfig) -> AppResult<Self> {
        config.validate()?;

        let store: Arc<dyn FoodStore> = Arc::new(SqliteFoodStore::new(config.database.clone()));
        let remote: Option<Arc<dyn RemoteFoodSource>> = if config.open_food_facts.enabled {
            Some(Arc::new(OpenFoodFactsClient::new(
                config.open_food_facts.clone(),
            )?))
        } else {
            None
        };

        info!(
            database = %config.database.url,
            remote_fallback = remote.is_some(),
            "food engine ready"
        );
        Ok(Self::new(store, remote, config.resolver))
    }

    /// Resolver limits in effect
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a free-text food name and score the best candidates.
    ///
    /// The local index is searched first. Only when it yields nothing is the
    /// remote fallback consulted, exactly once. A `limit` of zero means the
    /// configured default; larger limits are capped at 50.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a blank query and a retryable
    /// `RESOURCE_UNAVAILABLE` error when the local store cannot be reached.
    /// "Not found" is [`Resolution::NotFound`], never an error.
    #[instrument(skip(self))]
    pub async fn resolve_and_score(&self, query: &str, limit: usize) -> AppResult<Resolution> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::invalid_input("Food query cannot be empty"));
        }
        let limit = self.effective_limit(limit);

        if let LocalResolution::Matches(results) = self.local.resolve(query, limit).await? {
            info!(results = results.len(), "resolved from local index");
            return Ok(Resolution::Found {
                source: MatchSource::Local,
                results,
            });
        }

        let Some(remote) = &self.remote else {
            info!("no local match and remote fallback disabled");
            return Ok(Resolution::NotFound);
        };

        match resolve_remote(remote.as_ref(), query, limit).await {
            Some(results) => {
                info!(results = results.len(), "resolved from remote fallback");
                Ok(Resolution::Found {
                    source: MatchSource::Remote,
                    results,
                })
            }
            None => {
                info!("food not found locally or remotely");
                Ok(Resolution::NotFound)
            }
        }
    }

    /// Resolve with the configured default limit
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve_and_score`]
    pub async fn resolve(&self, query: &str) -> AppResult<Resolution> {
        self.resolve_and_score(query, self.config.default_limit).await
    }

    /// Score a row the caller already holds, without resolution.
    ///
    /// The row is scored as given; no serving scale is applied.
    #[must_use]
    pub fn score_only(&self, row: &NutrientRow) -> f64 {
        scoring::score_only(row)
    }

    fn effective_limit(&self, limit: usize) -> usize {
        if limit == 0 {
            self.config.default_limit
        } else {
            limit.min(MAX_RESULT_LIMIT)
        }
    }
}
