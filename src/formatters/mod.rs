// ABOUTME: Assembles scored result records returned to engine callers
// ABOUTME: Display names, brand fallback and removal of placeholder scores
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Result Formatting
//!
//! Every candidate the resolvers produce becomes a [`ScoredFood`]:
//! `{name, brand, vms_score, rating, raw}` plus the source it came from.
//! Candidates whose score is the neutral fallback are dropped here, because
//! that value means "data unavailable" rather than a measurement.

use crate::intelligence::insights::MetabolicReport;
use crate::intelligence::scoring::ScoreOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;
use vantage_core::models::{to_health_score, NutrientRow, Rating};

/// Brand shown when a product has none
pub const GENERIC_BRAND: &str = "Generic";

/// Where a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    /// Local product index
    Local,
    /// Remote fallback
    Remote,
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Remote => "remote",
        })
    }
}

/// One scored candidate as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFood {
    /// Display name: title-cased, brand prefixed unless the name already contains it
    pub name: String,
    /// Title-cased brand, or "Generic"
    pub brand: String,
    /// Metabolic stress score in `[-2.0, 10.0]`
    pub vms_score: f64,
    /// Rating bucket of the score
    pub rating: Rating,
    /// The row as the source returned it, before serving scaling
    pub raw: NutrientRow,
    /// Which resolver produced it
    pub source: MatchSource,
}

impl ScoredFood {
    /// Build a record, or `None` if the score is the neutral fallback
    #[must_use]
    pub fn new(raw: NutrientRow, outcome: ScoreOutcome, source: MatchSource) -> Option<Self> {
        let ScoreOutcome::Computed(vms_score) = outcome else {
            return None;
        };
        Some(Self {
            name: display_name(&raw.name, raw.brand_trimmed()),
            brand: display_brand(raw.brand_trimmed()),
            vms_score,
            rating: Rating::from_score(vms_score),
            raw,
            source,
        })
    }

    /// Score on the 0-100 higher-is-better scale
    #[must_use]
    pub fn health_score(&self) -> u8 {
        to_health_score(self.vms_score)
    }

    /// Zone label, gauges and insight for this result
    #[must_use]
    pub fn report(&self) -> MetabolicReport {
        MetabolicReport::new(&self.raw.name, self.vms_score)
    }
}

/// Build records for scored rows, dropping fallback scores
#[must_use]
pub fn format_results(
    scored: impl IntoIterator<Item = (NutrientRow, ScoreOutcome)>,
    source: MatchSource,
) -> Vec<ScoredFood> {
    scored
        .into_iter()
        .filter_map(|(raw, outcome)| ScoredFood::new(raw, outcome, source))
        .collect()
}

/// Uppercase the first letter of every word and lowercase the rest.
///
/// A word starts after any non-alphabetic character, so "coca-cola" becomes
/// "Coca-Cola".
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }
    result
}

/// Product name for display. The brand is prepended only when the name does
/// not already contain it (case-insensitive).
#[must_use]
pub fn display_name(name: &str, brand: Option<&str>) -> String {
    let name = name.trim();
    match brand.map(str::trim).filter(|b| !b.is_empty()) {
        Some(brand) if !name.to_lowercase().contains(&brand.to_lowercase()) => {
            title_case(&format!("{brand} {name}"))
        }
        _ => title_case(name),
    }
}

/// Brand for display, "Generic" when missing
#[must_use]
pub fn display_brand(brand: Option<&str>) -> String {
    brand
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map_or_else(|| GENERIC_BRAND.to_owned(), title_case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::scoring::ScoreError;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("coca-cola classic"), "Coca-Cola Classic");
        assert_eq!(title_case("GREEK yogurt, plain"), "Greek Yogurt, Plain");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_brand_prefix_only_when_absent() {
        assert_eq!(display_name("greek yogurt", Some("fage")), "Fage Greek Yogurt");
        assert_eq!(display_name("fage total 0%", Some("Fage")), "Fage Total 0%");
        assert_eq!(display_name("apple", None), "Apple");
        assert_eq!(display_name("apple", Some("  ")), "Apple");
    }

    #[test]
    fn test_brand_fallback() {
        assert_eq!(display_brand(None), GENERIC_BRAND);
        assert_eq!(display_brand(Some("ben & jerry's")), "Ben & Jerry'S");
    }

    #[test]
    fn test_fallback_scores_are_dropped() {
        let row = NutrientRow::new("olive oil", None);
        let results = format_results(
            vec![
                (row.clone(), ScoreOutcome::Computed(1.25)),
                (
                    row.clone(),
                    ScoreOutcome::Fallback {
                        reason: ScoreError::MissingName,
                    },
                ),
            ],
            MatchSource::Local,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Olive Oil");
        assert_eq!(results[0].brand, GENERIC_BRAND);
        assert_eq!(results[0].rating, Rating::Green);
        assert_eq!(results[0].raw, row);
    }

    #[test]
    fn test_health_score_conversion() {
        let food = ScoredFood::new(
            NutrientRow::new("cola", None),
            ScoreOutcome::Computed(7.5),
            MatchSource::Remote,
        )
        .unwrap();
        assert_eq!(food.health_score(), 21);
        assert_eq!(food.rating, Rating::Red);
    }
}
