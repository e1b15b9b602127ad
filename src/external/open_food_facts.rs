// ABOUTME: Open Food Facts search API client used as the remote nutrition fallback
// ABOUTME: Explicit optional-field response schema and its mapping into nutrient rows
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Open Food Facts API Client
//!
//! Queries the public Open Food Facts product search and maps results into the
//! engine's [`NutrientRow`] shape. The API is free and needs no key, but asks
//! clients to send an identifying user agent.
//!
//! Every field of the response is optional. Numbers arrive either as JSON
//! numbers or as numeric strings depending on the product, so nutriment fields
//! are decoded leniently and anything unreadable becomes "missing".
//!
//! # API Reference
//! <https://openfoodfacts.github.io/openfoodfacts-server/api/>
//!
//! # Example
//! ```rust,no_run
//! use food_vantage::config::OpenFoodFactsConfig;
//! use food_vantage::external::OpenFoodFactsClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenFoodFactsClient::new(OpenFoodFactsConfig::default())?;
//! let rows = client.search_rows("greek yogurt", 5).await?;
//! # Ok(())
//! # }
//! ```

use super::RemoteFoodSource;
use crate::config::OpenFoodFactsConfig;
use crate::constants::{limits, services};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use tracing::debug;
use vantage_core::errors::{AppError, AppResult};
use vantage_core::models::{normalize_nutrient, NovaGroup, NutrientRow};

/// NOVA group assumed for remote products that do not report one
pub const REMOTE_DEFAULT_NOVA: u8 = 3;

/// Grams to milligrams, for sodium
const MG_PER_G: f64 = 1000.0;

/// Fields requested from the search endpoint
const SEARCH_FIELDS: &str = "product_name,brands,nutriments,nova_group";

/// Search endpoint response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffSearchResponse {
    /// Matching products, possibly empty
    #[serde(default)]
    pub products: Vec<OffProduct>,
}

/// One product as returned by Open Food Facts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffProduct {
    /// Display name
    #[serde(default)]
    pub product_name: Option<String>,
    /// Comma-separated brand list
    #[serde(default)]
    pub brands: Option<String>,
    /// Per-100g nutrient values
    #[serde(default)]
    pub nutriments: OffNutriments,
    /// NOVA processing group
    #[serde(default, deserialize_with = "lenient_f64")]
    pub nova_group: Option<f64>,
}

/// Per-100g nutriments. Sodium is reported in grams.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffNutriments {
    /// Energy (kcal)
    #[serde(rename = "energy-kcal_100g", default, deserialize_with = "lenient_f64")]
    pub energy_kcal_100g: Option<f64>,
    /// Sugars (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sugars_100g: Option<f64>,
    /// Fiber (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fiber_100g: Option<f64>,
    /// Proteins (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub proteins_100g: Option<f64>,
    /// Fat (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fat_100g: Option<f64>,
    /// Sodium (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sodium_100g: Option<f64>,
    /// Carbohydrates (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub carbohydrates_100g: Option<f64>,
    /// NOVA group as some exports carry it inside the nutriments
    #[serde(rename = "nova-group_100g", default, deserialize_with = "lenient_f64")]
    pub nova_group_100g: Option<f64>,
}

/// Accept a JSON number, a numeric string, or anything else as "missing"
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

impl OffProduct {
    /// Trimmed product name, `None` when absent or blank
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.product_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Map into a nutrient row.
    ///
    /// Sodium is converted from grams to milligrams and missing nutriments
    /// become zero. `default_nova` stands in when the product carries no NOVA
    /// group. Products without a name map to `None`.
    #[must_use]
    pub fn to_nutrient_row(&self, default_nova: Option<NovaGroup>) -> Option<NutrientRow> {
        let name = self.name()?;
        let n = &self.nutriments;

        let mut row = NutrientRow::new(name, self.brands.as_deref().map(str::trim).map(str::to_owned));
        row.calories = normalize_nutrient(n.energy_kcal_100g);
        row.sugar_g = normalize_nutrient(n.sugars_100g);
        row.fiber_g = normalize_nutrient(n.fiber_100g);
        row.protein_g = normalize_nutrient(n.proteins_100g);
        row.fat_g = normalize_nutrient(n.fat_100g);
        row.sodium_mg = normalize_nutrient(n.sodium_100g.map(|grams| grams * MG_PER_G));
        row.carbs_g = n.carbohydrates_100g.map(|c| normalize_nutrient(Some(c)));
        row.nova_group = self
            .nova_group
            .or(n.nova_group_100g)
            .and_then(NovaGroup::from_lossy)
            .or(default_nova);
        Some(row)
    }
}

/// Map search results into at most `limit` rows, dropping unnamed products and
/// repeated names (case-insensitive, first occurrence wins)
#[must_use]
pub fn map_products(products: &[OffProduct], limit: usize) -> Vec<NutrientRow> {
    let default_nova = NovaGroup::new(REMOTE_DEFAULT_NOVA);
    let mut seen = HashSet::new();
    products
        .iter()
        .filter_map(|product| product.to_nutrient_row(default_nova))
        .filter(|row| seen.insert(row.name.to_lowercase()))
        .take(limit)
        .collect()
}

/// Open Food Facts API client
pub struct OpenFoodFactsClient {
    config: OpenFoodFactsConfig,
    http_client: reqwest::Client,
}

impl OpenFoodFactsClient {
    /// Create a client whose every request carries the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: OpenFoodFactsConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::config(format!("Failed to build Open Food Facts HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &OpenFoodFactsConfig {
        &self.config
    }

    /// Raw product search
    ///
    /// # Errors
    ///
    /// Returns an error for an empty query, a transport failure or timeout,
    /// a non-success status, or an unreadable body
    pub async fn search_products(&self, query: &str, page_size: usize) -> AppResult<Vec<OffProduct>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }

        let url = format!("{}/cgi/search.pl", self.config.base_url);
        let page_size = page_size.max(1).to_string();
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", page_size.as_str()),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await
            .map_err(|e| AppError::from(e).with_context("Open Food Facts request failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                services::OPEN_FOOD_FACTS,
                format!("HTTP {status}"),
            ));
        }

        let body: OffSearchResponse = response.json().await.map_err(|e| {
            AppError::external_service(services::OPEN_FOOD_FACTS, format!("JSON parse error: {e}"))
        })?;

        debug!(query, products = body.products.len(), "Open Food Facts search");
        Ok(body.products)
    }

    /// Search and map into at most `limit` distinct rows.
    ///
    /// Fetches twice as many products as requested to absorb duplicates.
    ///
    /// # Errors
    ///
    /// Same as [`Self::search_products`]
    pub async fn search_rows(&self, query: &str, limit: usize) -> AppResult<Vec<NutrientRow>> {
        let page_size = limit.saturating_mul(limits::REMOTE_OVERFETCH_FACTOR);
        let products = self.search_products(query, page_size).await?;
        Ok(map_products(&products, limit))
    }
}

#[async_trait]
impl RemoteFoodSource for OpenFoodFactsClient {
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<NutrientRow>> {
        self.search_rows(query, limit).await
    }

    fn name(&self) -> &'static str {
        services::OPEN_FOOD_FACTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "count": 3,
        "products": [
            {
                "product_name": "Greek Yogurt Honey",
                "brands": "Fage",
                "nova_group": 3,
                "nutriments": {
                    "energy-kcal_100g": 121,
                    "sugars_100g": "11.5",
                    "fiber_100g": 0,
                    "proteins_100g": 7.9,
                    "fat_100g": 5,
                    "sodium_100g": 0.04,
                    "carbohydrates_100g": 12
                }
            },
            {
                "product_name": "greek yogurt honey",
                "brands": "Store",
                "nutriments": {}
            },
            {
                "product_name": "Greek Yogurt",
                "nutriments": { "energy-kcal_100g": "n/a", "sodium_100g": -1 }
            },
            { "brands": "Nameless" }
        ]
    }"#;

    #[test]
    fn test_mapping_converts_sodium_and_strings() {
        let response: OffSearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let row = response.products[0]
            .to_nutrient_row(NovaGroup::new(REMOTE_DEFAULT_NOVA))
            .unwrap();
        assert_eq!(row.name, "Greek Yogurt Honey");
        assert_eq!(row.brand.as_deref(), Some("Fage"));
        assert!((row.sodium_mg - 40.0).abs() < 1e-9);
        assert!((row.sugar_g - 11.5).abs() < f64::EPSILON);
        assert_eq!(row.carbs_g, Some(12.0));
        assert_eq!(row.nova_group, NovaGroup::new(3));
    }

    #[test]
    fn test_missing_fields_default() {
        let response: OffSearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let row = response.products[2]
            .to_nutrient_row(NovaGroup::new(REMOTE_DEFAULT_NOVA))
            .unwrap();
        assert!(row.calories.abs() < f64::EPSILON);
        assert!(row.sodium_mg.abs() < f64::EPSILON);
        assert!(row.carbs_g.is_none());
        assert_eq!(row.nova_group, NovaGroup::new(REMOTE_DEFAULT_NOVA));
        assert!(response.products[3].to_nutrient_row(None).is_none());
    }

    #[test]
    fn test_map_products_dedups_and_limits() {
        let response: OffSearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let rows = map_products(&response.products, 10);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Greek Yogurt Honey", "Greek Yogurt"]);

        assert_eq!(map_products(&response.products, 1).len(), 1);
    }

    #[test]
    fn test_empty_body_has_no_products() {
        let response: OffSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.products.is_empty());
    }
}
