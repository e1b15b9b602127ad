// ABOUTME: Three-tier metabolic rating (Green, Yellow, Red) derived from a stress score
// ABOUTME: Also provides the explicit conversion to a 0-100 higher-is-better scale
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores strictly below this are Green
pub const GREEN_UPPER_BOUND: f64 = 3.0;

/// Scores at or above this are Red
pub const RED_LOWER_BOUND: f64 = 7.0;

/// Lowest score the engine produces
const SCORE_FLOOR: f64 = -2.0;

/// Highest score the engine produces
const SCORE_CEILING: f64 = 10.0;

/// Metabolic rating bucket. Lower scores are always healthier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    /// score < 3.0
    Green,
    /// 3.0 <= score < 7.0
    Yellow,
    /// score >= 7.0
    Red,
}

impl Rating {
    /// Bucket a metabolic stress score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < GREEN_UPPER_BOUND {
            Self::Green
        } else if score < RED_LOWER_BOUND {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    /// Short label used in result records
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
        }
    }

    /// Long label shown on the scan result screen
    #[must_use]
    pub const fn zone_label(&self) -> &'static str {
        match self {
            Self::Green => "Metabolic Green",
            Self::Yellow => "Metabolic Yellow",
            Self::Red => "Metabolic Red",
        }
    }

    /// Category written to the activity log for this rating
    #[must_use]
    pub const fn log_category(&self) -> &'static str {
        match self {
            Self::Green => "healthy",
            Self::Yellow => "moderate",
            Self::Red => "unhealthy",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a -2..10 lower-is-better stress score to a 0..100 higher-is-better
/// health score.
///
/// The mapping is linear: -2.0 becomes 100 and 10.0 becomes 0. Out-of-range
/// inputs are clamped first.
#[must_use]
pub fn to_health_score(score: f64) -> u8 {
    let clamped = if score.is_finite() {
        score.clamp(SCORE_FLOOR, SCORE_CEILING)
    } else {
        SCORE_CEILING
    };
    let fraction = (SCORE_CEILING - clamped) / (SCORE_CEILING - SCORE_FLOOR);
    (fraction * 100.0).round() as u8
}
