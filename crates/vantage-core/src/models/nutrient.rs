// ABOUTME: Canonical per-100g nutrient row consumed by the scoring engine
// ABOUTME: Coerces missing, non-finite and negative values to zero at construction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};
use std::fmt;

/// NOVA classification of industrial food processing (1 = unprocessed, 4 = ultra-processed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct NovaGroup(u8);

impl NovaGroup {
    /// Lowest (least processed) NOVA group
    pub const MIN: u8 = 1;
    /// Highest (ultra-processed) NOVA group
    pub const MAX: u8 = 4;

    /// Build a NOVA group, rejecting anything outside 1..=4
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Lenient conversion from a stored or remote value; out-of-range means unknown
    #[must_use]
    pub fn from_lossy(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let rounded = value.round();
        if rounded < f64::from(Self::MIN) || rounded > f64::from(Self::MAX) {
            return None;
        }
        Self::new(rounded as u8)
    }

    /// Numeric group value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for NovaGroup {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("NOVA group must be 1-4, got {value}"))
    }
}

impl From<NovaGroup> for u8 {
    fn from(group: NovaGroup) -> Self {
        group.0
    }
}

impl fmt::Display for NovaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NOVA {}", self.0)
    }
}

/// Coerce a raw nutrient reading into the engine's non-negative domain.
///
/// Missing, NaN, infinite and negative readings all become `0.0`.
#[must_use]
pub fn normalize_nutrient(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// One product's nutrient profile, all values per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientRow {
    /// Product name as stored (the local store keeps it lowercased)
    pub name: String,
    /// Brand, if the source knows one
    pub brand: Option<String>,
    /// Energy (kcal)
    pub calories: f64,
    /// Total sugars (g)
    pub sugar_g: f64,
    /// Dietary fiber (g)
    pub fiber_g: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Sodium (mg)
    pub sodium_mg: f64,
    /// Carbohydrates (g), not every source reports them
    pub carbs_g: Option<f64>,
    /// Degree of processing, unknown when the source omits it
    pub nova_group: Option<NovaGroup>,
}

impl NutrientRow {
    /// Create a row with every nutrient at zero
    pub fn new(name: impl Into<String>, brand: Option<String>) -> Self {
        Self {
            name: name.into(),
            brand: brand.filter(|b| !b.trim().is_empty()),
            calories: 0.0,
            sugar_g: 0.0,
            fiber_g: 0.0,
            protein_g: 0.0,
            fat_g: 0.0,
            sodium_mg: 0.0,
            carbs_g: None,
            nova_group: None,
        }
    }

    /// Re-apply the non-negative invariant to every numeric field
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.calories = normalize_nutrient(Some(self.calories));
        self.sugar_g = normalize_nutrient(Some(self.sugar_g));
        self.fiber_g = normalize_nutrient(Some(self.fiber_g));
        self.protein_g = normalize_nutrient(Some(self.protein_g));
        self.fat_g = normalize_nutrient(Some(self.fat_g));
        self.sodium_mg = normalize_nutrient(Some(self.sodium_mg));
        self.carbs_g = self.carbs_g.map(|c| normalize_nutrient(Some(c)));
        self
    }

    /// Multiply the six scored nutrients by `factor`; carbs and NOVA are left alone
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            sugar_g: self.sugar_g * factor,
            fiber_g: self.fiber_g * factor,
            protein_g: self.protein_g * factor,
            fat_g: self.fat_g * factor,
            sodium_mg: self.sodium_mg * factor,
            ..self.clone()
        }
    }

    /// Brand with surrounding whitespace removed, `None` when blank
    #[must_use]
    pub fn brand_trimmed(&self) -> Option<&str> {
        self.brand
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}
