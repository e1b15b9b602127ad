// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides a seeded in-memory product index, fixture rows and engine builders
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::too_many_arguments
)]
//! Shared test utilities for `food_vantage`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use food_vantage::config::{DatabaseConfig, ResolverConfig};
use food_vantage::database::{FoodStore, SqliteFoodStore};
use food_vantage::external::{MockFoodSource, RemoteFoodSource};
use food_vantage::resolver::FoodEngine;
use std::sync::{Arc, Once};
use vantage_core::models::{NovaGroup, NutrientRow};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Build a fully specified nutrient row
pub fn nutrient_row(
    name: &str,
    brand: Option<&str>,
    calories: f64,
    sugar: f64,
    fiber: f64,
    protein: f64,
    fat: f64,
    sodium_mg: f64,
    nova: u8,
) -> NutrientRow {
    let mut row = NutrientRow::new(name, brand.map(str::to_owned));
    row.calories = calories;
    row.sugar_g = sugar;
    row.fiber_g = fiber;
    row.protein_g = protein;
    row.fat_g = fat;
    row.sodium_mg = sodium_mg;
    row.nova_group = NovaGroup::new(nova);
    row
}

/// Products seeded into every test index
pub fn fixture_rows() -> Vec<NutrientRow> {
    vec![
        nutrient_row("salmon", None, 208.0, 0.0, 0.0, 20.0, 13.0, 59.0, 1),
        nutrient_row("plain yogurt", None, 61.0, 4.7, 0.0, 3.5, 3.3, 46.0, 1),
        nutrient_row("berry yogurt", None, 110.0, 15.0, 0.1, 3.0, 2.5, 40.0, 3),
        nutrient_row("greek yogurt", Some("Fage"), 97.0, 3.6, 0.0, 9.0, 5.0, 35.0, 1),
        nutrient_row(
            "yogurt drink, strawberry flavour",
            Some("Acme"),
            80.0,
            12.0,
            0.0,
            2.5,
            1.5,
            45.0,
            4,
        ),
        nutrient_row("orange juice", Some("Tropicana"), 45.0, 9.0, 0.2, 0.7, 0.2, 1.0, 3),
        nutrient_row("olive oil", None, 884.0, 0.0, 0.0, 0.0, 100.0, 2.0, 2),
        nutrient_row("broccoli", None, 34.0, 1.7, 2.6, 2.8, 0.4, 33.0, 1),
    ]
}

/// Products only the remote fallback knows about
pub fn remote_rows() -> Vec<NutrientRow> {
    vec![
        nutrient_row("Kombucha Ginger", Some("Health-Ade"), 30.0, 6.0, 0.0, 0.0, 0.0, 10.0, 3),
        nutrient_row("Kombucha Original", Some("GT's"), 25.0, 4.0, 0.0, 0.0, 0.0, 10.0, 3),
    ]
}

/// In-memory product index seeded with [`fixture_rows`]
pub async fn create_seeded_store() -> Result<Arc<SqliteFoodStore>> {
    init_test_logging();
    let store = SqliteFoodStore::new(DatabaseConfig::writable("sqlite::memory:"));
    store.migrate().await?;
    store.insert_products(&fixture_rows()).await?;
    Ok(Arc::new(store))
}

/// Engine over a seeded index with an optional mock remote
pub async fn create_test_engine(remote: Option<Arc<MockFoodSource>>) -> Result<FoodEngine> {
    create_test_engine_with(remote, ResolverConfig::default()).await
}

/// Engine over a seeded index with explicit resolver limits
pub async fn create_test_engine_with(
    remote: Option<Arc<MockFoodSource>>,
    config: ResolverConfig,
) -> Result<FoodEngine> {
    let store: Arc<dyn FoodStore> = create_seeded_store().await?;
    let remote = remote.map(|mock| mock as Arc<dyn RemoteFoodSource>);
    Ok(FoodEngine::new(store, remote, config))
}
