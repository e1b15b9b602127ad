// ABOUTME: Main library entry point for the FoodVantage food resolution and scoring engine
// ABOUTME: Resolves free-text food names to products and scores their metabolic stress
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

// deny(unsafe_code): zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # `FoodVantage`
//!
//! Turns a free-text food name such as "greek yogurt" into ranked, scored
//! products. Each result carries a Vantage Metabolic Score (VMS) on a
//! `[-2.0, 10.0]` scale where lower is better, and a rating bucket.
//!
//! ## Architecture
//!
//! - **intelligence**: category taxonomy, serving scales, the scorer, the
//!   knowledge base and metabolic insights. Pure and synchronous.
//! - **database**: the local `SQLite` product index behind the `FoodStore` trait
//! - **external**: the Open Food Facts fallback behind `RemoteFoodSource`
//! - **resolver**: local-first resolution with a single remote fallback
//! - **formatters**: result records returned to callers
//! - **config** / **logging**: environment-driven settings and tracing setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use food_vantage::config::EngineConfig;
//! use food_vantage::resolver::FoodEngine;
//! use vantage_core::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = EngineConfig::from_env()?;
//!     let engine = FoodEngine::from_config(&config)?;
//!
//!     for food in engine.resolve("greek yogurt").await?.results() {
//!         println!("{} ({}): {:.2} {}", food.name, food.brand, food.vms_score, food.rating);
//!     }
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Engine-wide constants
pub mod constants;

/// Local product index
pub mod database;

/// Remote food data sources
pub mod external;

/// Result records returned to callers
pub mod formatters;

/// Classification, serving scales, scoring and insights
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Local-first query resolution
pub mod resolver;

pub use config::EngineConfig;
pub use formatters::{MatchSource, ScoredFood};
pub use resolver::{FoodEngine, Resolution};
pub use vantage_core::errors::{AppError, AppResult, ErrorCode};
pub use vantage_core::models::{NovaGroup, NutrientRow, Rating};
