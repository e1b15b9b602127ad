// ABOUTME: Structured product store abstraction for local food resolution
// ABOUTME: Defines the FoodStore trait and re-exports the SQLite implementation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Product Store
//!
//! The engine reads nutrient rows from a local product index. The index is a
//! single `products` table keyed by lowercased product name; see
//! [`products::SqliteFoodStore`] for the schema.
//!
//! Failures to reach the store surface as retryable `RESOURCE_UNAVAILABLE`
//! errors. An empty result is not an error.

/// `SQLite` implementation of the product store
pub mod products;

pub use products::SqliteFoodStore;

use async_trait::async_trait;
use vantage_core::errors::AppResult;
use vantage_core::models::NutrientRow;

/// Read access to a structured store of nutrient rows
#[async_trait]
pub trait FoodStore: Send + Sync {
    /// Rows whose name contains `needle` (case-insensitive), at most
    /// `max_rows` of them.
    ///
    /// Rows come back in ranking order: exact name, then unbranded names
    /// without a comma, then names with few spaces, then the rest. Within a
    /// tier shorter names come first, then higher sugar. The cut to
    /// `max_rows` happens after ordering.
    ///
    /// # Errors
    ///
    /// Returns a retryable error if the store cannot be reached
    async fn search(&self, needle: &str, max_rows: usize) -> AppResult<Vec<NutrientRow>>;

    /// Every named row in load order, at most `max_rows` of them
    ///
    /// # Errors
    ///
    /// Returns a retryable error if the store cannot be reached
    async fn load_all(&self, max_rows: usize) -> AppResult<Vec<NutrientRow>>;
}
