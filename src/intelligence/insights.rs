// ABOUTME: Per-result metabolic insights and load/buffer gauges derived from a score
// ABOUTME: Picks at most one insight per food, in a fixed priority order
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};
use vantage_core::models::{Rating, GREEN_UPPER_BOUND};

/// Score above which free sugars dominate the response
const HIGH_VELOCITY_THRESHOLD: f64 = 7.0;

/// Foods whose matrix is called out when they rate Green
const STABLE_MATRIX_KEYWORDS: &[&str] = &["apple", "salmon", "avocado", "lentil", "egg"];

/// Packaged snack shapes that pair stressors with protein
const PROCESSED_SNACK_KEYWORDS: &[&str] = &["bar", "jerky"];

/// Lower bound of the load gauge
const MIN_LOAD: f64 = 0.1;
/// Buffer gauge for foods scoring below zero
const STRONG_BUFFER: f64 = 0.9;
/// Buffer gauge otherwise
const WEAK_BUFFER: f64 = 0.4;

/// How an insight should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightLevel {
    /// Neutral information
    Info,
    /// Positive signal
    Success,
    /// Caution
    Warning,
    /// Strong negative signal
    Alert,
}

/// One explanatory note attached to a scored food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetabolicInsight {
    /// Oat milk: a liquid starch that scores well but absorbs quickly
    MaltoseAlert,
    /// Green-rated whole food with a protective matrix
    HighStability,
    /// Free-sugar heavy; rapid insulin response
    HighVelocity,
    /// Bars and jerky: stressors offset by protein
    ProcessingNote,
}

impl MetabolicInsight {
    /// Pick the insight for a food, if any.
    ///
    /// Checked in order: oat milk, Green-rated stable foods, scores above 7.0,
    /// then bars and jerky.
    #[must_use]
    pub fn for_food(name: &str, score: f64) -> Option<Self> {
        let name = name.to_lowercase();
        if name.contains("oat") && name.contains("milk") {
            Some(Self::MaltoseAlert)
        } else if score < GREEN_UPPER_BOUND
            && STABLE_MATRIX_KEYWORDS.iter().any(|kw| name.contains(kw))
        {
            Some(Self::HighStability)
        } else if score > HIGH_VELOCITY_THRESHOLD {
            Some(Self::HighVelocity)
        } else if PROCESSED_SNACK_KEYWORDS.iter().any(|kw| name.contains(kw)) {
            Some(Self::ProcessingNote)
        } else {
            None
        }
    }

    /// Short heading
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::MaltoseAlert => "Maltose Alert",
            Self::HighStability => "High Stability",
            Self::HighVelocity => "High Velocity",
            Self::ProcessingNote => "Processing Note",
        }
    }

    /// Explanation shown under the heading
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::MaltoseAlert => {
                "Oat milk is a liquid starch. While the math is stable, it enters the blood faster than whole oats."
            }
            Self::HighStability => {
                "The food matrix here slows glucose absorption significantly. Optimal for insulin sensitivity."
            }
            Self::HighVelocity => {
                "High concentration of free sugars detected. This will trigger a rapid insulin response."
            }
            Self::ProcessingNote => {
                "This item has metabolic stressors balanced by protein. Fine in moderation, but watch for sodium."
            }
        }
    }

    /// Presentation level
    #[must_use]
    pub const fn level(&self) -> InsightLevel {
        match self {
            Self::MaltoseAlert => InsightLevel::Warning,
            Self::HighStability => InsightLevel::Success,
            Self::HighVelocity => InsightLevel::Alert,
            Self::ProcessingNote => InsightLevel::Info,
        }
    }
}

/// Metabolic load gauge in `[0.1, 1.0]`: `(score + 5) / 25`, clamped
#[must_use]
pub fn metabolic_load(score: f64) -> f64 {
    ((score + 5.0) / 25.0).clamp(MIN_LOAD, 1.0)
}

/// Metabolic buffer gauge: 0.9 for scores below zero, 0.4 otherwise
#[must_use]
pub fn metabolic_buffer(score: f64) -> f64 {
    if score < 0.0 {
        STRONG_BUFFER
    } else {
        WEAK_BUFFER
    }
}

/// Everything the result screen shows beside the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicReport {
    /// Zone label, e.g. "Metabolic Green"
    pub zone: String,
    /// Load gauge
    pub load: f64,
    /// Buffer gauge
    pub buffer: f64,
    /// Optional insight
    pub insight: Option<MetabolicInsight>,
}

impl MetabolicReport {
    /// Build the report for a scored food
    #[must_use]
    pub fn new(name: &str, score: f64) -> Self {
        Self {
            zone: Rating::from_score(score).zone_label().to_owned(),
            load: metabolic_load(score),
            buffer: metabolic_buffer(score),
            insight: MetabolicInsight::for_food(name, score),
        }
    }
}
