// ABOUTME: Immutable taxonomy-enriched food records built once from the product index
// ABOUTME: Synonym generation, processing labels and lookups by id, name and category
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Food Knowledge Base
//!
//! Turns raw store rows into [`FoodRecord`]s: each row is classified, given a
//! typical serving and form from the taxonomy, a processing label from its NOVA
//! group, and a set of lowercase synonyms for search. Records are immutable
//! once built and owned by the knowledge base.

use super::classifier::classify;
use super::taxonomy;
use crate::constants::limits::MAX_KNOWLEDGE_BASE_ROWS;
use crate::database::FoodStore;
use std::collections::HashMap;
use tracing::info;
use vantage_core::errors::AppResult;
use vantage_core::models::{FoodCategory, FoodRecord, NutrientRow, ProcessingLabel};

/// Suffixes dropped to produce a shorter synonym
const STRIPPABLE_SUFFIXES: &[&str] = &[", raw", ", fresh", ", organic", ", natural", ", plain"];

/// Lowercase lookup variants for a product name.
///
/// Always contains the lowercased name itself, followed by a brand-stripped
/// variant, suffix-stripped variants and a singular or plural variant.
/// Duplicates are removed while keeping first-seen order.
#[must_use]
pub fn build_synonyms(name: &str, brand: &str) -> Vec<String> {
    let lowered = name.trim().to_lowercase();
    let mut synonyms = vec![lowered.clone()];

    let brand = brand.trim().to_lowercase();
    if !brand.is_empty() {
        let without_brand = lowered
            .replace(&brand, "")
            .trim()
            .trim_matches(',')
            .trim()
            .to_owned();
        if !without_brand.is_empty() && without_brand != lowered {
            synonyms.push(without_brand);
        }
    }

    for suffix in STRIPPABLE_SUFFIXES {
        if let Some(stem) = lowered.strip_suffix(suffix) {
            synonyms.push(stem.trim().to_owned());
        }
    }

    if let Some(singular) = lowered.strip_suffix('s') {
        if !singular.ends_with('s') {
            synonyms.push(singular.to_owned());
        }
    } else {
        synonyms.push(format!("{lowered}s"));
    }

    let mut unique = Vec::with_capacity(synonyms.len());
    for synonym in synonyms {
        if !synonym.is_empty() && !unique.contains(&synonym) {
            unique.push(synonym);
        }
    }
    unique
}

/// Build the record for the row at position `food_id`
#[must_use]
pub fn build_record(food_id: usize, row: &NutrientRow) -> FoodRecord {
    let canonical_name = row.name.trim().to_owned();
    let brand = row.brand_trimmed().unwrap_or_default().to_owned();
    let classification = classify(&canonical_name);
    let (processing_label, processing_confidence) = ProcessingLabel::from_nova(row.nova_group);

    FoodRecord {
        food_id,
        synonyms: build_synonyms(&canonical_name, &brand),
        original_name: row.name.clone(),
        category: classification.category,
        category_confidence: classification.confidence,
        nutrients_per_100g: row.clone().normalized(),
        serving_size_g: taxonomy::serving_grams(classification.category),
        processing_label,
        processing_confidence,
        nova_group: row.nova_group,
        form: taxonomy::form_of(classification.category),
        canonical_name,
        brand,
    }
}

/// All canonical food records loaded from one store
#[derive(Debug, Default)]
pub struct FoodKnowledgeBase {
    records: Vec<FoodRecord>,
    name_index: HashMap<String, Vec<usize>>,
}

impl FoodKnowledgeBase {
    /// Build records for `rows`; ids follow the input order
    #[must_use]
    pub fn from_rows(rows: &[NutrientRow]) -> Self {
        let records: Vec<FoodRecord> = rows
            .iter()
            .enumerate()
            .map(|(food_id, row)| build_record(food_id, row))
            .collect();

        let mut name_index: HashMap<String, Vec<usize>> = HashMap::new();
        for record in &records {
            name_index
                .entry(record.canonical_name.to_lowercase())
                .or_default()
                .push(record.food_id);
        }

        Self {
            records,
            name_index,
        }
    }

    /// Load up to 200 000 named rows from `store`
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    pub async fn load(store: &dyn FoodStore) -> AppResult<Self> {
        let rows = store.load_all(MAX_KNOWLEDGE_BASE_ROWS).await?;
        let knowledge_base = Self::from_rows(&rows);
        info!(records = knowledge_base.len(), "food knowledge base loaded");
        Ok(knowledge_base)
    }

    /// Record by id
    #[must_use]
    pub fn get_record(&self, food_id: usize) -> Option<&FoodRecord> {
        self.records.get(food_id)
    }

    /// Records whose canonical name equals `name`, ignoring case
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Vec<&FoodRecord> {
        self.name_index
            .get(&name.trim().to_lowercase())
            .map(|ids| ids.iter().filter_map(|id| self.records.get(*id)).collect())
            .unwrap_or_default()
    }

    /// Records in `category`
    #[must_use]
    pub fn get_by_category(&self, category: FoodCategory) -> Vec<&FoodRecord> {
        self.records
            .iter()
            .filter(|record| record.category == category)
            .collect()
    }

    /// Canonical names in id order
    #[must_use]
    pub fn all_names(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|record| record.canonical_name.as_str())
            .collect()
    }

    /// One lowercase search text per record: name, brand, synonyms and category phrase
    #[must_use]
    pub fn all_texts(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|record| {
                let category = record.category.search_phrase();
                let mut parts: Vec<&str> = vec![record.canonical_name.as_str()];
                if !record.brand.is_empty() {
                    parts.push(record.brand.as_str());
                }
                parts.extend(record.synonyms.iter().map(String::as_str));
                parts.push(category.as_str());
                parts.join(" ").to_lowercase()
            })
            .collect()
    }

    /// Record count per category, largest first
    #[must_use]
    pub fn category_counts(&self) -> Vec<(FoodCategory, usize)> {
        let mut counts: HashMap<FoodCategory, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.category).or_default() += 1;
        }
        let mut counts: Vec<(FoodCategory, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        counts
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in id order
    pub fn iter(&self) -> impl Iterator<Item = &FoodRecord> {
        self.records.iter()
    }
}
