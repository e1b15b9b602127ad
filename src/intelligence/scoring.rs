// ABOUTME: Metabolic stress scoring of a per-serving nutrient row on a -2..10 scale
// ABOUTME: Food-state detection, penalty points, protective credit and clinical overrides
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Metabolic Stress Scoring
//!
//! Converts one nutrient row into a bounded score where lower is healthier.
//! The algorithm runs in four stages:
//!
//! 1. **Food state**: keyword tests on the lowercased name plus the NOVA group
//!    decide whether the food is liquid, dried, heavily processed, plain dairy
//!    or whole-fresh.
//! 2. **Penalties**: energy, fat, sodium and sugar points, each capped at 10.
//!    Liquids pay a steeper sugar rate, whole-fresh foods an 80% discount.
//! 3. **Credit**: fiber and protein offset the penalties, except for liquids
//!    and dried foods.
//! 4. **Overrides**: whole-fresh foods are capped at -1.0, sugary drinks
//!    floored at 7.5 and sugary dried fruit at 7.0, then the result is clamped
//!    to `[-2.0, 10.0]`.
//!
//! Scoring never fails the caller. [`score`] returns a typed [`ScoreOutcome`]
//! so callers and tests can tell a computed score from the neutral fallback.
//!
//! ```rust
//! use food_vantage::intelligence::scoring::score_only;
//! use vantage_core::models::{NovaGroup, NutrientRow};
//!
//! let mut salmon = NutrientRow::new("Salmon", Some("Wild".into()));
//! salmon.calories = 208.0;
//! salmon.protein_g = 20.0;
//! salmon.fat_g = 13.0;
//! salmon.sodium_mg = 59.0;
//! salmon.nova_group = NovaGroup::new(1);
//! assert!(score_only(&salmon) <= -1.0);
//! ```

use super::classifier;
use super::taxonomy::{
    contains_any, DRIED_KEYWORDS, HEAVILY_PROCESSED_KEYWORDS, LIQUID_KEYWORDS,
    PLAIN_DAIRY_KEYWORDS, SUPERFOOD_KEYWORDS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;
use vantage_core::models::{NutrientRow, Rating};

/// Lowest score the engine produces
pub const MIN_SCORE: f64 = -2.0;

/// Highest score the engine produces
pub const MAX_SCORE: f64 = 10.0;

/// Score returned when a row cannot be scored
pub const NEUTRAL_SCORE: f64 = 5.0;

/// Ceiling for each individual penalty
const PENALTY_CAP: f64 = 10.0;

/// Ceiling for each half of the protective credit
const CREDIT_CAP: f64 = 7.0;

const KCAL_PER_POINT: f64 = 80.0;
const FAT_G_PER_POINT: f64 = 2.0;
const SODIUM_MG_PER_POINT: f64 = 150.0;
const SUGAR_G_PER_POINT: f64 = 4.5;
const LIQUID_SUGAR_G_PER_POINT: f64 = 1.5;
/// Share of sugar counted for whole-fresh foods (food-matrix discount)
const WHOLE_FOOD_SUGAR_SHARE: f64 = 0.2;
const FIBER_G_PER_POINT: f64 = 0.5;
const PROTEIN_G_PER_POINT: f64 = 1.2;

/// Plain dairy must stay under this much sugar per serving
const PLAIN_DAIRY_SUGAR_LIMIT: f64 = 5.0;
/// NOVA group at which a food counts as heavily processed
const PROCESSED_NOVA_THRESHOLD: u8 = 3;
/// NOVA assumed when the row does not carry one
const UNKNOWN_NOVA_DEFAULT: u8 = 1;

const WHOLE_FRESH_CAP: f64 = -1.0;
const LIQUID_SUGAR_TRIGGER: f64 = 4.0;
const LIQUID_SUGAR_FLOOR: f64 = 7.5;
const DRIED_SUGAR_TRIGGER: f64 = 15.0;
const DRIED_SUGAR_FLOOR: f64 = 7.0;

/// Keyword-derived state of a food, computed from its name and NOVA group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FoodState {
    /// Drinks, juices and smoothies
    pub is_liquid: bool,
    /// Dried or sugar-concentrated fruit
    pub is_dried: bool,
    /// Named superfood that is not heavily processed
    pub is_superfood: bool,
    /// Cooking or dish words in the name, or NOVA 3 and above
    pub is_heavily_processed: bool,
    /// Milk or yogurt with little sugar
    pub is_dairy_plain: bool,
    /// Classifier places the name in fresh fruit
    pub is_fruit: bool,
    /// Minimally processed whole food; earns the sugar discount
    pub is_whole_fresh: bool,
}

impl FoodState {
    /// Detect the state of a row.
    ///
    /// An unknown NOVA group is treated as group 1.
    #[must_use]
    pub fn detect(row: &NutrientRow) -> Self {
        let name = row.name.to_lowercase();
        let nova = row
            .nova_group
            .map_or(UNKNOWN_NOVA_DEFAULT, |group| group.value());

        let is_liquid = contains_any(&name, LIQUID_KEYWORDS);
        let is_dried = contains_any(&name, DRIED_KEYWORDS);
        let is_heavily_processed = contains_any(&name, HEAVILY_PROCESSED_KEYWORDS)
            || nova >= PROCESSED_NOVA_THRESHOLD;
        let is_superfood = contains_any(&name, SUPERFOOD_KEYWORDS) && !is_heavily_processed;
        let is_dairy_plain =
            contains_any(&name, PLAIN_DAIRY_KEYWORDS) && row.sugar_g < PLAIN_DAIRY_SUGAR_LIMIT;
        let is_fruit = classifier::is_fruit(&name);

        let is_whole_fresh = (nova < PROCESSED_NOVA_THRESHOLD
            || is_superfood
            || is_dairy_plain
            || is_fruit)
            && !is_liquid
            && !is_dried
            && !is_heavily_processed;

        Self {
            is_liquid,
            is_dried,
            is_superfood,
            is_heavily_processed,
            is_dairy_plain,
            is_fruit,
            is_whole_fresh,
        }
    }
}

/// A clinical override applied after the raw score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOverride {
    /// Whole-fresh foods capped at -1.0
    WholeFreshCap,
    /// Sugary liquids floored at 7.5
    LiquidSugarFloor,
    /// Sugary dried foods floored at 7.0
    DriedSugarFloor,
}

/// Full intermediate detail of one scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Detected food state
    pub state: FoodState,
    /// Energy penalty
    pub pts_energy: f64,
    /// Fat penalty
    pub pts_fat: f64,
    /// Sodium penalty
    pub pts_sodium: f64,
    /// Sugar penalty after the liquid or whole-food adjustment
    pub pts_sugar: f64,
    /// Fiber and protein credit
    pub credit: f64,
    /// Penalties minus credit, rounded to two decimals
    pub raw_score: f64,
    /// Overrides whose condition held, in application order
    pub overrides: Vec<ScoreOverride>,
    /// Final clamped score
    pub score: f64,
}

impl ScoreBreakdown {
    /// Rating of the final score
    #[must_use]
    pub fn rating(&self) -> Rating {
        Rating::from_score(self.score)
    }
}

/// Reasons a row could not be scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ScoreError {
    /// Name is empty or whitespace, so no food state can be derived
    #[error("nutrient row has no product name")]
    MissingName,
}

/// Result of scoring that always yields a usable number
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScoreOutcome {
    /// The algorithm ran to completion
    Computed(f64),
    /// The row was unusable and the neutral score stands in
    Fallback {
        /// Why the algorithm did not run
        reason: ScoreError,
    },
}

impl ScoreOutcome {
    /// Score value, [`NEUTRAL_SCORE`] for a fallback
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Computed(score) => *score,
            Self::Fallback { .. } => NEUTRAL_SCORE,
        }
    }

    /// Whether this outcome is the neutral stand-in rather than a measurement
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Rating of the score value
    #[must_use]
    pub fn rating(&self) -> Rating {
        Rating::from_score(self.value())
    }
}

impl fmt::Display for ScoreOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Computed(score) => write!(f, "{score:.2}"),
            Self::Fallback { reason } => write!(f, "{NEUTRAL_SCORE:.2} (fallback: {reason})"),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn capped(value: f64, per_point: f64, cap: f64) -> f64 {
    (value / per_point).min(cap)
}

/// Score a row and report every intermediate value.
///
/// Nutrients are normalized first, so missing or negative values count as zero.
///
/// # Errors
///
/// Returns [`ScoreError::MissingName`] when the row has a blank name.
pub fn explain(row: &NutrientRow) -> Result<ScoreBreakdown, ScoreError> {
    if row.name.trim().is_empty() {
        return Err(ScoreError::MissingName);
    }
    let row = row.clone().normalized();
    let state = FoodState::detect(&row);

    let pts_energy = capped(row.calories, KCAL_PER_POINT, PENALTY_CAP);
    let pts_fat = capped(row.fat_g, FAT_G_PER_POINT, PENALTY_CAP);
    let pts_sodium = capped(row.sodium_mg, SODIUM_MG_PER_POINT, PENALTY_CAP);
    let pts_sugar = if state.is_liquid {
        capped(row.sugar_g, LIQUID_SUGAR_G_PER_POINT, PENALTY_CAP)
    } else if state.is_whole_fresh {
        capped(
            row.sugar_g * WHOLE_FOOD_SUGAR_SHARE,
            SUGAR_G_PER_POINT,
            PENALTY_CAP,
        )
    } else {
        capped(row.sugar_g, SUGAR_G_PER_POINT, PENALTY_CAP)
    };

    let credit = if state.is_liquid || state.is_dried {
        0.0
    } else {
        capped(row.fiber_g, FIBER_G_PER_POINT, CREDIT_CAP)
            + capped(row.protein_g, PROTEIN_G_PER_POINT, CREDIT_CAP)
    };

    let raw_score = round2((pts_energy + pts_fat + pts_sodium + pts_sugar) - credit);

    let mut score = raw_score;
    let mut overrides = Vec::new();
    if state.is_whole_fresh {
        score = score.min(WHOLE_FRESH_CAP);
        overrides.push(ScoreOverride::WholeFreshCap);
    }
    if state.is_liquid && row.sugar_g > LIQUID_SUGAR_TRIGGER {
        score = score.max(LIQUID_SUGAR_FLOOR);
        overrides.push(ScoreOverride::LiquidSugarFloor);
    }
    if state.is_dried && row.sugar_g > DRIED_SUGAR_TRIGGER {
        score = score.max(DRIED_SUGAR_FLOOR);
        overrides.push(ScoreOverride::DriedSugarFloor);
    }

    Ok(ScoreBreakdown {
        state,
        pts_energy,
        pts_fat,
        pts_sodium,
        pts_sugar,
        credit,
        raw_score,
        overrides,
        score: score.clamp(MIN_SCORE, MAX_SCORE),
    })
}

/// Score a row, surfacing failures to the caller.
///
/// # Errors
///
/// Returns [`ScoreError::MissingName`] when the row has a blank name.
pub fn try_score(row: &NutrientRow) -> Result<f64, ScoreError> {
    explain(row).map(|breakdown| breakdown.score)
}

/// Score a row, substituting the neutral score when it cannot be scored
#[must_use]
pub fn score(row: &NutrientRow) -> ScoreOutcome {
    match try_score(row) {
        Ok(value) => ScoreOutcome::Computed(value),
        Err(reason) => {
            warn!(
                reason = %reason,
                brand = row.brand.as_deref().unwrap_or(""),
                "scoring fell back to neutral score"
            );
            ScoreOutcome::Fallback { reason }
        }
    }
}

/// Score value in `[-2.0, 10.0]` for collaborators that already hold a row
#[must_use]
pub fn score_only(row: &NutrientRow) -> f64 {
    score(row).value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::models::{NovaGroup, GREEN_UPPER_BOUND};

    #[allow(clippy::too_many_arguments)]
    fn row(
        name: &str,
        brand: &str,
        calories: f64,
        sugar: f64,
        fiber: f64,
        protein: f64,
        fat: f64,
        sodium: f64,
        carbs: f64,
        nova: u8,
    ) -> NutrientRow {
        let mut row = NutrientRow::new(name, Some(brand.to_owned()));
        row.calories = calories;
        row.sugar_g = sugar;
        row.fiber_g = fiber;
        row.protein_g = protein;
        row.fat_g = fat;
        row.sodium_mg = sodium;
        row.carbs_g = Some(carbs);
        row.nova_group = NovaGroup::new(nova);
        row
    }

    #[test]
    fn test_salmon_is_whole_fresh_green() {
        let salmon = row("Salmon", "Wild", 208.0, 0.0, 0.0, 20.0, 13.0, 59.0, 0.0, 1);
        let breakdown = explain(&salmon).unwrap();
        assert!(breakdown.state.is_whole_fresh);
        assert!((breakdown.raw_score - 2.49).abs() < 1e-9);
        assert!((breakdown.score - -1.0).abs() < f64::EPSILON);
        assert_eq!(breakdown.overrides, vec![ScoreOverride::WholeFreshCap]);
        assert_eq!(breakdown.rating(), Rating::Green);
    }

    #[test]
    fn test_orange_juice_is_sugary_liquid_red() {
        let juice = row("Orange Juice", "Fresh", 45.0, 9.0, 0.2, 0.7, 0.2, 1.0, 10.0, 3);
        let breakdown = explain(&juice).unwrap();
        assert!(breakdown.state.is_liquid);
        assert!(breakdown.credit.abs() < f64::EPSILON);
        assert!((breakdown.raw_score - 6.67).abs() < 1e-9);
        assert!((breakdown.score - 7.5).abs() < f64::EPSILON);
        assert_eq!(breakdown.rating(), Rating::Red);
    }

    #[test]
    fn test_plain_yogurt_is_whole_fresh() {
        let yogurt = row("Yogurt", "Plain", 61.0, 4.7, 0.0, 3.5, 3.3, 46.0, 4.7, 1);
        let breakdown = explain(&yogurt).unwrap();
        assert!(breakdown.state.is_dairy_plain);
        assert!(breakdown.state.is_whole_fresh);
        assert!(breakdown.score <= -1.0);
        assert_eq!(breakdown.rating(), Rating::Green);
    }

    #[test]
    fn test_sweetened_yogurt_loses_discount() {
        let yogurt = row("Yogurt Berry", "Sweet", 110.0, 15.0, 0.1, 3.0, 2.5, 40.0, 18.0, 3);
        let breakdown = explain(&yogurt).unwrap();
        assert!(!breakdown.state.is_dairy_plain);
        assert!(breakdown.state.is_heavily_processed);
        assert!(!breakdown.state.is_whole_fresh);
        assert!(breakdown.overrides.is_empty());
        assert!(breakdown.score >= GREEN_UPPER_BOUND);
    }

    #[test]
    fn test_dried_mango_floor() {
        let mango = row("Dried Mango", "Snack Co", 319.0, 66.0, 2.4, 2.5, 1.2, 10.0, 78.0, 1);
        let breakdown = explain(&mango).unwrap();
        assert!(breakdown.state.is_dried);
        assert!(!breakdown.state.is_whole_fresh);
        assert!(breakdown.credit.abs() < f64::EPSILON);
        assert!(breakdown.score >= 7.0);
        assert!(breakdown.overrides.contains(&ScoreOverride::DriedSugarFloor));
    }

    #[test]
    fn test_cooking_word_blocks_superfood() {
        let salmon = row("Grilled Salmon", "", 208.0, 0.0, 0.0, 20.0, 13.0, 59.0, 0.0, 1);
        let state = FoodState::detect(&salmon);
        assert!(state.is_heavily_processed);
        assert!(!state.is_superfood);
        assert!(!state.is_whole_fresh);
    }

    #[test]
    fn test_chocolate_counts_as_liquid() {
        // "chocolate" contains "cola"
        let bar = row("Dark Chocolate", "", 546.0, 48.0, 7.0, 4.9, 31.0, 20.0, 61.0, 4);
        let state = FoodState::detect(&bar);
        assert!(state.is_liquid);
        assert!(score_only(&bar) >= 7.5);
    }

    #[test]
    fn test_unknown_nova_treated_as_unprocessed() {
        let mut carrot = row("Carrot", "", 41.0, 4.7, 2.8, 0.9, 0.2, 69.0, 9.6, 1);
        carrot.nova_group = None;
        assert!(FoodState::detect(&carrot).is_whole_fresh);
    }

    #[test]
    fn test_blank_name_falls_back() {
        let blank = row("   ", "", 100.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2);
        assert_eq!(try_score(&blank), Err(ScoreError::MissingName));
        let outcome = score(&blank);
        assert!(outcome.is_fallback());
        assert!((outcome.value() - NEUTRAL_SCORE).abs() < f64::EPSILON);
        assert!((score_only(&blank) - NEUTRAL_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_nutrients_are_zeroed() {
        let mut weird = row("Mystery Paste", "", f64::NAN, -4.0, f64::INFINITY, 0.0, -1.0, 0.0, 0.0, 4);
        weird.carbs_g = None;
        let outcome = score(&weird);
        assert_eq!(outcome, ScoreOutcome::Computed(0.0));
    }

    #[test]
    fn test_score_is_bounded_and_deterministic() {
        let names = ["cola", "apple", "dried date", "pizza", "oat milk", "lentils", "xyz"];
        let values = [0.0, 3.0, 12.0, 60.0, 900.0];
        for name in names {
            for &v in &values {
                for nova in 1..=4 {
                    let r = row(name, "", v * 5.0, v, v / 3.0, v / 2.0, v, v * 20.0, v, nova);
                    let first = score_only(&r);
                    assert!((MIN_SCORE..=MAX_SCORE).contains(&first), "{name} {v} -> {first}");
                    assert!((first - score_only(&r)).abs() < f64::EPSILON);

                    let state = FoodState::detect(&r);
                    if state.is_whole_fresh {
                        assert!(first <= -1.0);
                    }
                    if state.is_liquid && r.sugar_g > 4.0 {
                        assert!(first >= 7.5);
                    }
                    if state.is_dried && r.sugar_g > 15.0 {
                        assert!(first >= 7.0);
                    }
                }
            }
        }
    }
}
