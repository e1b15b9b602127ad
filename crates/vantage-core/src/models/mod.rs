// ABOUTME: Nutrition data model shared across the engine crates
// ABOUTME: Re-exports nutrient rows, food records, categories and ratings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Nutrition data model
//!
//! All nutrient values are expressed per 100 g of product. Rows are transient
//! (built per query), records are immutable once a knowledge base creates them.

/// Food categories, physical forms, processing labels and knowledge-base records
pub mod food;

/// Per-100g nutrient rows and NOVA processing groups
pub mod nutrient;

/// Three-tier metabolic rating derived from a score
pub mod rating;

pub use food::{FoodCategory, FoodForm, FoodRecord, ProcessingLabel};
pub use nutrient::{normalize_nutrient, NovaGroup, NutrientRow};
pub use rating::{to_health_score, Rating, GREEN_UPPER_BOUND, RED_LOWER_BOUND};
