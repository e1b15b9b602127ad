// ABOUTME: Core types for the FoodVantage food resolution and scoring engine
// ABOUTME: Foundation crate with the nutrient data model and unified error handling
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Vantage Core
//!
//! Foundation crate providing shared types for the `FoodVantage` engine. It holds
//! no I/O and changes infrequently, so the resolver and store crates can build on
//! it without pulling in database or HTTP dependencies unless the matching
//! error-conversion features are enabled.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `AppResult`
//! - **models**: `NutrientRow`, `FoodRecord`, `FoodCategory`, `Rating` and friends

/// Unified error handling system with standard error codes
pub mod errors;

/// Nutrition data model shared by the scorer, the store and the resolvers
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
