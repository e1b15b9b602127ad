// ABOUTME: Local resolver: substring search over the product index with tiered ranking
// ABOUTME: Exact names first, then plain, then short names; shorter and sweeter break ties
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::score_rows;
use crate::constants::limits::SHORT_NAME_MAX_SPACES;
use crate::database::FoodStore;
use crate::formatters::{MatchSource, ScoredFood};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};
use vantage_core::errors::AppResult;
use vantage_core::models::NutrientRow;

/// Ranking tier of a candidate; lower ranks first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Name equals the query, ignoring case
    Exact,
    /// No comma in the name and no brand
    Plain,
    /// At most two spaces in the name
    Short,
    /// Everything else
    Other,
}

impl MatchTier {
    /// Tier of `row` for a lowercased, trimmed query
    #[must_use]
    pub fn of(row: &NutrientRow, query_lower: &str) -> Self {
        let name = row.name.trim();
        if name.to_lowercase() == query_lower {
            Self::Exact
        } else if !name.contains(',') && row.brand_trimmed().is_none() {
            Self::Plain
        } else if name.matches(' ').count() <= SHORT_NAME_MAX_SPACES {
            Self::Short
        } else {
            Self::Other
        }
    }
}

/// Order candidates for `query`.
///
/// Tier first, then shorter names, then higher sugar so the more concerning
/// variant of an ambiguous name comes first. Equal candidates keep store order.
#[must_use]
pub fn rank_candidates(mut rows: Vec<NutrientRow>, query: &str) -> Vec<NutrientRow> {
    let query_lower = query.trim().to_lowercase();
    rows.sort_by(|a, b| compare_candidates(a, b, &query_lower));
    rows
}

fn compare_candidates(a: &NutrientRow, b: &NutrientRow, query_lower: &str) -> Ordering {
    MatchTier::of(a, query_lower)
        .cmp(&MatchTier::of(b, query_lower))
        .then_with(|| {
            a.name
                .trim()
                .chars()
                .count()
                .cmp(&b.name.trim().chars().count())
        })
        .then_with(|| b.sugar_g.total_cmp(&a.sugar_g))
}

/// Outcome of a local lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LocalResolution {
    /// Ranked, scored candidates; never empty
    Matches(Vec<ScoredFood>),
    /// Nothing usable matched; consult the remote fallback
    NoMatch,
}

/// Resolves queries against the local product index
#[derive(Clone)]
pub struct LocalResolver {
    store: Arc<dyn FoodStore>,
    candidate_pool: usize,
}

impl LocalResolver {
    /// Create a resolver reading at most `candidate_pool` matches per query
    #[must_use]
    pub fn new(store: Arc<dyn FoodStore>, candidate_pool: usize) -> Self {
        Self {
            store,
            candidate_pool,
        }
    }

    /// Find, rank and score up to `limit` local candidates.
    ///
    /// The store applies the same ranking before cutting the pool, so the
    /// best candidates survive however many rows match.
    ///
    /// # Errors
    ///
    /// Returns a retryable error if the store is unavailable. Finding nothing
    /// is [`LocalResolution::NoMatch`], not an error.
    #[instrument(skip(self), fields(source = "local"))]
    pub async fn resolve(&self, query: &str, limit: usize) -> AppResult<LocalResolution> {
        let candidates = self
            .store
            .search(query, self.candidate_pool.max(limit))
            .await?;
        let candidate_count = candidates.len();

        let mut results = score_rows(rank_candidates(candidates, query), MatchSource::Local);
        results.truncate(limit);

        debug!(candidates = candidate_count, results = results.len(), "local resolution");
        if results.is_empty() {
            Ok(LocalResolution::NoMatch)
        } else {
            Ok(LocalResolution::Matches(results))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, brand: Option<&str>, sugar: f64) -> NutrientRow {
        let mut row = NutrientRow::new(name, brand.map(str::to_owned));
        row.sugar_g = sugar;
        row
    }

    #[test]
    fn test_tiers() {
        let q = "yogurt";
        assert_eq!(MatchTier::of(&candidate("Yogurt", Some("Fage"), 0.0), q), MatchTier::Exact);
        assert_eq!(MatchTier::of(&candidate("greek yogurt", None, 0.0), q), MatchTier::Plain);
        assert_eq!(
            MatchTier::of(&candidate("yogurt, greek", None, 0.0), q),
            MatchTier::Short
        );
        assert_eq!(
            MatchTier::of(&candidate("greek yogurt", Some("Fage"), 0.0), q),
            MatchTier::Short
        );
        assert_eq!(
            MatchTier::of(&candidate("low fat greek yogurt honey", Some("Fage"), 0.0), q),
            MatchTier::Other
        );
    }

    #[test]
    fn test_ranking_cascade() {
        let ranked = rank_candidates(
            vec![
                candidate("yogurt drink, strawberry flavour", Some("Acme"), 12.0),
                candidate("greek yogurt", Some("Fage"), 4.0),
                candidate("berry yogurt", None, 15.0),
                candidate("plain yogurt", None, 4.7),
                candidate("YOGURT", Some("Store"), 3.0),
            ],
            "Yogurt",
        );
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "YOGURT",
                "berry yogurt",
                "plain yogurt",
                "greek yogurt",
                "yogurt drink, strawberry flavour",
            ]
        );
    }

    #[test]
    fn test_shorter_name_beats_sugar() {
        let ranked = rank_candidates(
            vec![candidate("cola zero", None, 0.0), candidate("cola", None, 0.0)],
            "co",
        );
        assert_eq!(ranked[0].name, "cola");
    }
}
