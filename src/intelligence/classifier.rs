// ABOUTME: Longest-keyword-match food classifier over the category taxonomy
// ABOUTME: Maps a free-text food name to a category key with a fixed confidence
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::taxonomy::CATEGORY_KEYWORDS;
use serde::{Deserialize, Serialize};
use vantage_core::models::FoodCategory;

/// Confidence reported when a taxonomy keyword matched
pub const MATCHED_CONFIDENCE: f64 = 0.8;

/// Confidence reported for the `unknown` category
pub const UNMATCHED_CONFIDENCE: f64 = 0.1;

/// Category assignment for a food name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Assigned category
    pub category: FoodCategory,
    /// Fixed confidence for the match kind
    pub confidence: f64,
}

impl Classification {
    const UNKNOWN: Self = Self {
        category: FoodCategory::Unknown,
        confidence: UNMATCHED_CONFIDENCE,
    };

    /// Whether a keyword matched
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.category != FoodCategory::Unknown
    }
}

/// Classify a food name.
///
/// Keywords are tried longest first, so "olive oil" wins over "oil" and
/// "peanut butter" over "butter". Matching is a lowercase substring test.
#[must_use]
pub fn classify(name: &str) -> Classification {
    let lowered = name.trim().to_lowercase();
    if lowered.is_empty() {
        return Classification::UNKNOWN;
    }

    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map_or(Classification::UNKNOWN, |(_, category)| Classification {
            category: *category,
            confidence: MATCHED_CONFIDENCE,
        })
}

/// Whether the classifier places `name` in fresh fruit
#[must_use]
pub fn is_fruit(name: &str) -> bool {
    classify(name).category == FoodCategory::ProduceFruit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_word_keyword_wins() {
        assert_eq!(classify("Peanut Butter, smooth").category, FoodCategory::Spread);
        assert_eq!(classify("butter, salted").category, FoodCategory::OilFat);
        assert_eq!(classify("Oat Milk Barista").category, FoodCategory::BeverageMilkAlt);
        assert_eq!(classify("whole milk").category, FoodCategory::DairyMilk);
    }

    #[test]
    fn test_unknown_name() {
        let result = classify("zzzz");
        assert_eq!(result.category, FoodCategory::Unknown);
        assert!((result.confidence - UNMATCHED_CONFIDENCE).abs() < f64::EPSILON);
        assert!(!result.is_known());
        assert!(!classify("   ").is_known());
    }

    #[test]
    fn test_confidence_is_fixed() {
        let result = classify("Salmon fillet");
        assert_eq!(result.category, FoodCategory::ProteinFish);
        assert!((result.confidence - MATCHED_CONFIDENCE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fruit_detection() {
        assert!(is_fruit("Granny Smith Apple"));
        assert!(!is_fruit("Broccoli"));
        // "apple juice" is longer than "apple"
        assert!(!is_fruit("apple juice"));
    }
}
