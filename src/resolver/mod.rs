// ABOUTME: Query resolution: local index first, remote fallback second
// ABOUTME: Shared candidate scoring plus the FoodEngine service object
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Resolver
//!
//! `text -> local index (ranked) -> [if empty] remote fallback -> scoring -> results`.
//!
//! Both resolvers score candidates the same way: the row is scaled to one
//! realistic serving, scored, and formatted with its unscaled original kept
//! as `raw`.

/// The engine service object
pub mod engine;
/// Local product index resolver
pub mod local;
/// Remote fallback resolver
pub mod remote;

pub use engine::{FoodEngine, Resolution};
pub use local::{rank_candidates, LocalResolution, LocalResolver, MatchTier};
pub use remote::resolve_remote;

use crate::formatters::{format_results, MatchSource, ScoredFood};
use crate::intelligence::scoring::{self, ScoreOutcome};
use crate::intelligence::serving::apply_serving_scale;
use vantage_core::models::NutrientRow;

/// Score one candidate at its realistic serving size
#[must_use]
pub fn score_candidate(row: &NutrientRow) -> ScoreOutcome {
    scoring::score(&apply_serving_scale(row))
}

/// Score candidates in order, dropping any that fall back to the neutral score
#[must_use]
pub fn score_rows(rows: Vec<NutrientRow>, source: MatchSource) -> Vec<ScoredFood> {
    format_results(
        rows.into_iter().map(|row| {
            let outcome = score_candidate(&row);
            (row, outcome)
        }),
        source,
    )
}
