// ABOUTME: Food taxonomy keys, physical forms, processing labels and knowledge-base records
// ABOUTME: Category keys are a closed enum so every consumer agrees on the same set
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::nutrient::{NovaGroup, NutrientRow};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category key in the food taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    /// Fresh fruit
    ProduceFruit,
    /// Fresh vegetables
    ProduceVegetable,
    /// Avocado and guacamole (high-fat produce)
    ProduceAvocado,
    /// Meat and poultry
    ProteinMeat,
    /// Fish and seafood
    ProteinFish,
    /// Beans, lentils and other legumes
    ProteinLegume,
    /// Eggs and egg dishes
    ProteinEgg,
    /// Dairy milk
    DairyMilk,
    /// Yogurt and fermented milk
    DairyYogurt,
    /// Cheese
    DairyCheese,
    /// Bread and baked dough
    GrainBread,
    /// Breakfast cereals and oats
    GrainCereal,
    /// Pasta and noodles
    GrainPasta,
    /// Rice and other cooked grains
    GrainRice,
    /// Fruit and vegetable juices, smoothies
    BeverageJuice,
    /// Soft drinks and energy drinks
    BeverageSoda,
    /// Tea and coffee
    BeverageTeaCoffee,
    /// Water
    BeverageWater,
    /// Alcoholic drinks
    BeverageAlcohol,
    /// Plant-based milk alternatives
    BeverageMilkAlt,
    /// Chips, crackers and bars
    Snack,
    /// Cakes, pastries and frozen desserts
    Dessert,
    /// Confectionery
    Candy,
    /// Sauces and dips
    Condiment,
    /// Oils and solid fats
    OilFat,
    /// Sweet spreads and syrups
    Spread,
    /// Seasonings
    Spice,
    /// Nuts and seeds
    NutsSeeds,
    /// Dried fruit
    DriedFruit,
    /// Composite prepared dishes
    PreparedMeal,
    /// Frozen ready meals and ices
    FrozenFood,
    /// Powders and supplements
    Supplement,
    /// No taxonomy keyword matched
    Unknown,
}

impl FoodCategory {
    /// Stable snake-case key, identical to the serde representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProduceFruit => "produce_fruit",
            Self::ProduceVegetable => "produce_vegetable",
            Self::ProduceAvocado => "produce_avocado",
            Self::ProteinMeat => "protein_meat",
            Self::ProteinFish => "protein_fish",
            Self::ProteinLegume => "protein_legume",
            Self::ProteinEgg => "protein_egg",
            Self::DairyMilk => "dairy_milk",
            Self::DairyYogurt => "dairy_yogurt",
            Self::DairyCheese => "dairy_cheese",
            Self::GrainBread => "grain_bread",
            Self::GrainCereal => "grain_cereal",
            Self::GrainPasta => "grain_pasta",
            Self::GrainRice => "grain_rice",
            Self::BeverageJuice => "beverage_juice",
            Self::BeverageSoda => "beverage_soda",
            Self::BeverageTeaCoffee => "beverage_tea_coffee",
            Self::BeverageWater => "beverage_water",
            Self::BeverageAlcohol => "beverage_alcohol",
            Self::BeverageMilkAlt => "beverage_milk_alt",
            Self::Snack => "snack",
            Self::Dessert => "dessert",
            Self::Candy => "candy",
            Self::Condiment => "condiment",
            Self::OilFat => "oil_fat",
            Self::Spread => "spread",
            Self::Spice => "spice",
            Self::NutsSeeds => "nuts_seeds",
            Self::DriedFruit => "dried_fruit",
            Self::PreparedMeal => "prepared_meal",
            Self::FrozenFood => "frozen_food",
            Self::Supplement => "supplement",
            Self::Unknown => "unknown",
        }
    }

    /// Category key with underscores replaced by spaces, for search text
    #[must_use]
    pub fn search_phrase(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typical physical form of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodForm {
    /// Eaten as a solid
    #[default]
    Solid,
    /// Drunk or poured
    Liquid,
}

/// Processing label derived from the NOVA group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingLabel {
    /// NOVA 4
    UltraProcessed,
    /// NOVA 3
    Processed,
    /// NOVA 2 (culinary ingredients such as oils, sugar, salt)
    ProcessedIngredient,
    /// NOVA 1
    Unprocessed,
    /// No NOVA information
    Unknown,
}

impl ProcessingLabel {
    /// Label and confidence for a NOVA group
    #[must_use]
    pub fn from_nova(nova: Option<NovaGroup>) -> (Self, f64) {
        match nova.map(NovaGroup::value) {
            Some(4) => (Self::UltraProcessed, 0.9),
            Some(3) => (Self::Processed, 0.85),
            Some(2) => (Self::ProcessedIngredient, 0.8),
            Some(1) => (Self::Unprocessed, 0.9),
            _ => (Self::Unknown, 0.0),
        }
    }
}

/// A taxonomy-enriched canonical food record.
///
/// Built once per store row by the knowledge base and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Position of the source row in the load order
    pub food_id: usize,
    /// Trimmed product name
    pub canonical_name: String,
    /// Name exactly as the store returned it
    pub original_name: String,
    /// Trimmed brand, empty when unknown
    pub brand: String,
    /// Lowercased lookup variants, always containing the lowercased canonical name
    pub synonyms: Vec<String>,
    /// Taxonomy category
    pub category: FoodCategory,
    /// Confidence of the category assignment
    pub category_confidence: f64,
    /// Nutrients per 100 g
    pub nutrients_per_100g: NutrientRow,
    /// Typical serving size for the category, in grams
    pub serving_size_g: f64,
    /// Processing label from NOVA
    pub processing_label: ProcessingLabel,
    /// Confidence of the processing label
    pub processing_confidence: f64,
    /// NOVA group, when known
    pub nova_group: Option<NovaGroup>,
    /// Typical physical form
    pub form: FoodForm,
}
