// ABOUTME: Food intelligence: taxonomy, classification, serving scale and scoring
// ABOUTME: Also hosts the knowledge base and the result-screen insights
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Intelligence Module
//!
//! Pure, synchronous food analysis. Every keyword list lives in [`taxonomy`];
//! the classifier, the serving normalizer and the scorer all read from it.

/// Longest-keyword-match category classifier
pub mod classifier;
/// Taxonomy-enriched food records
pub mod knowledge_base;
/// Result-screen insights and gauges
pub mod insights;
/// Metabolic stress scoring
pub mod scoring;
/// Realistic serving normalization
pub mod serving;
/// Static keyword tables
pub mod taxonomy;

pub use classifier::{classify, Classification};
pub use insights::{MetabolicInsight, MetabolicReport};
pub use knowledge_base::FoodKnowledgeBase;
pub use scoring::{
    explain, score, score_only, try_score, FoodState, ScoreBreakdown, ScoreError, ScoreOutcome,
};
pub use serving::{apply_serving_scale, get_serving_scale};
