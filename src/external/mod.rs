// ABOUTME: External nutrition data sources consulted when the local index has no match
// ABOUTME: RemoteFoodSource seam, the Open Food Facts client and an in-memory test source

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! External API Clients
//!
//! Remote sources return plain [`NutrientRow`]s; scoring and formatting stay in
//! the resolver so every source is judged by the same rules.

/// In-memory remote source for tests
pub mod mock;
/// Open Food Facts search client
pub mod open_food_facts;

pub use mock::MockFoodSource;
pub use open_food_facts::{OffNutriments, OffProduct, OffSearchResponse, OpenFoodFactsClient};

use async_trait::async_trait;
use vantage_core::errors::AppResult;
use vantage_core::models::NutrientRow;

/// A remote nutrition dataset searchable by free text
#[async_trait]
pub trait RemoteFoodSource: Send + Sync {
    /// At most `limit` distinct rows matching `query`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, non-success status or
    /// an unreadable body
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<NutrientRow>>;

    /// Service name for logs
    fn name(&self) -> &'static str;
}
