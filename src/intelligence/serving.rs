// ABOUTME: Serving-size normalizer for foods whose per-100g profile overstates a real portion
// ABOUTME: Longest-match lookup of a serving fraction and scaling of nutrient rows
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::taxonomy::{self, DEFAULT_SERVING_SCALE, SERVING_SCALE_KEYWORDS};
use vantage_core::models::{FoodCategory, NutrientRow};

/// Fraction of 100 g that represents one realistic serving of `name`.
///
/// Uses the same longest-keyword-first policy as the classifier. Returns
/// `1.0` when no keyword matches.
#[must_use]
pub fn get_serving_scale(name: &str) -> f64 {
    let lowered = name.trim().to_lowercase();
    SERVING_SCALE_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map_or(DEFAULT_SERVING_SCALE, |(_, scale)| *scale)
}

/// Serving fraction implied by a category's typical serving grams, capped at 1.0
#[must_use]
pub fn category_serving_scale(category: FoodCategory) -> f64 {
    (taxonomy::serving_grams(category) / 100.0).min(DEFAULT_SERVING_SCALE)
}

/// Scale a row to one serving of its named food.
///
/// Rows without a matching keyword are returned unchanged.
#[must_use]
pub fn apply_serving_scale(row: &NutrientRow) -> NutrientRow {
    let scale = get_serving_scale(&row.name);
    if scale < DEFAULT_SERVING_SCALE {
        row.scaled(scale)
    } else {
        row.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_olive_oil_uses_tablespoon() {
        assert!((get_serving_scale("olive oil") - 0.14).abs() < f64::EPSILON);
        assert!((get_serving_scale("Extra Virgin Olive Oil") - 0.14).abs() < f64::EPSILON);
    }

    #[test]
    fn test_longer_keyword_takes_precedence() {
        assert!((get_serving_scale("peanut butter") - 0.32).abs() < f64::EPSILON);
        assert!((get_serving_scale("butter") - 0.14).abs() < f64::EPSILON);
        assert!((get_serving_scale("black pepper") - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_portion_guards() {
        assert!((get_serving_scale("almond milk") - 1.0).abs() < f64::EPSILON);
        assert!((get_serving_scale("cottage cheese") - 1.0).abs() < f64::EPSILON);
        assert!((get_serving_scale("new york cheesecake") - 1.0).abs() < f64::EPSILON);
        assert!((get_serving_scale("buttermilk") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cooking_words_do_not_match_condiments() {
        assert!((get_serving_scale("boiled egg") - 1.0).abs() < f64::EPSILON);
        assert!((get_serving_scale("broiled salmon") - 1.0).abs() < f64::EPSILON);
        assert!((get_serving_scale("salted caramel popcorn") - 1.0).abs() < f64::EPSILON);
        assert!((get_serving_scale("sea salt") - 0.02).abs() < f64::EPSILON);
        // Equal-length keywords resolve to the first listed, so butter still wins
        assert!((get_serving_scale("salted butter") - 0.14).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unmatched_defaults_to_full() {
        assert!((get_serving_scale("salmon") - 1.0).abs() < f64::EPSILON);
        assert!((get_serving_scale("") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_scales_six_fields() {
        let mut row = NutrientRow::new("honey", None);
        row.calories = 304.0;
        row.sugar_g = 82.0;
        row.carbs_g = Some(82.0);
        let scaled = apply_serving_scale(&row);
        assert!((scaled.sugar_g - 82.0 * 0.21).abs() < 1e-9);
        assert_eq!(scaled.carbs_g, Some(82.0));

        let apple = NutrientRow::new("apple", None);
        assert_eq!(apply_serving_scale(&apple), apple);
    }

    #[test]
    fn test_category_scale_is_capped() {
        assert!((category_serving_scale(FoodCategory::Spice) - 0.03).abs() < 1e-9);
        assert!((category_serving_scale(FoodCategory::BeverageSoda) - 1.0).abs() < f64::EPSILON);
    }
}
