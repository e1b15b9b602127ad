// ABOUTME: In-memory remote food source with a call counter
// ABOUTME: Lets tests assert how often the remote fallback was consulted
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::RemoteFoodSource;
use crate::constants::services;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use vantage_core::errors::{AppError, AppResult};
use vantage_core::models::NutrientRow;

/// Mock remote source for testing (no network calls)
#[derive(Debug, Default)]
pub struct MockFoodSource {
    rows: Vec<NutrientRow>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl MockFoodSource {
    /// Source that answers every search from `rows`
    #[must_use]
    pub fn new(rows: Vec<NutrientRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Source whose every search fails as if the service were down
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Number of searches made so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteFoodSource for MockFoodSource {
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<NutrientRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(AppError::external_unavailable(
                services::OPEN_FOOD_FACTS,
                "mock source is offline",
            ));
        }

        let needle = query.trim().to_lowercase();
        Ok(self
            .rows
            .iter()
            .filter(|row| row.name.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
