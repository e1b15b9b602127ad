// ABOUTME: Single source of truth for every food keyword list used by the engine
// ABOUTME: Category taxonomy, serving-scale table and the scorer's food-state keyword sets
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Food Taxonomy
//!
//! Static, read-only tables consumed by the classifier, the serving normalizer
//! and the scorer's food-state detection. Nothing outside this module declares
//! food keywords.
//!
//! Matching is plain lowercase substring containment. Callers that need
//! "most specific keyword wins" semantics go through [`longest_first`], which
//! orders keywords by length descending and keeps table order for ties.

use std::sync::LazyLock;
use vantage_core::models::{FoodCategory, FoodForm};

/// One category of the taxonomy
#[derive(Debug, Clone, Copy)]
pub struct CategoryEntry {
    /// Category key
    pub category: FoodCategory,
    /// Typical serving in grams
    pub serving_grams: f64,
    /// Typical physical form
    pub form: FoodForm,
    /// Lowercase keywords that identify the category
    pub keywords: &'static [&'static str],
}

/// Serving assumed for categories outside the taxonomy
pub const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// The category taxonomy, in priority order for equal-length keyword ties
pub static CATEGORY_TAXONOMY: &[CategoryEntry] = &[
    CategoryEntry {
        category: FoodCategory::ProduceFruit,
        serving_grams: 150.0,
        form: FoodForm::Solid,
        keywords: &[
            "apple", "banana", "orange", "grape", "strawberry", "blueberry", "raspberry",
            "mango", "pineapple", "watermelon", "melon", "kiwi", "peach", "pear", "plum",
            "cherry", "lime", "lemon", "grapefruit", "papaya", "guava", "passion fruit",
            "dragon fruit", "fig", "pomegranate", "apricot", "nectarine", "tangerine",
            "clementine", "cranberry", "blackberry", "gooseberry", "lychee", "persimmon",
            "starfruit", "jackfruit", "durian", "plantain", "date fruit",
        ],
    },
    CategoryEntry {
        category: FoodCategory::ProduceVegetable,
        serving_grams: 100.0,
        form: FoodForm::Solid,
        keywords: &[
            "broccoli", "spinach", "kale", "lettuce", "tomato", "cucumber", "carrot", "onion",
            "garlic", "pepper", "cauliflower", "cabbage", "celery", "zucchini", "eggplant",
            "asparagus", "artichoke", "beetroot", "beet", "radish", "turnip", "parsnip",
            "squash", "pumpkin", "sweet potato", "potato", "corn", "peas", "green bean",
            "mushroom", "okra", "leek", "chard", "arugula", "watercress", "endive", "fennel",
            "brussels sprout", "bok choy", "collard",
        ],
    },
    CategoryEntry {
        category: FoodCategory::ProteinMeat,
        serving_grams: 100.0,
        form: FoodForm::Solid,
        keywords: &[
            "chicken", "beef", "pork", "lamb", "turkey", "duck", "veal", "venison", "bison",
            "rabbit", "goat", "ham", "bacon", "sausage", "steak", "ground beef",
            "ground turkey", "meat", "prosciutto",
        ],
    },
    CategoryEntry {
        category: FoodCategory::ProteinFish,
        serving_grams: 100.0,
        form: FoodForm::Solid,
        keywords: &[
            "salmon", "tuna", "cod", "tilapia", "sardine", "mackerel", "trout", "halibut",
            "swordfish", "anchovy", "herring", "catfish", "bass", "perch", "snapper", "mahi",
            "shrimp", "prawn", "lobster", "crab", "clam", "mussel", "oyster", "scallop",
            "squid", "octopus", "fish", "seafood",
        ],
    },
    CategoryEntry {
        category: FoodCategory::ProteinLegume,
        serving_grams: 130.0,
        form: FoodForm::Solid,
        keywords: &[
            "lentil", "chickpea", "black bean", "kidney bean", "navy bean", "pinto bean",
            "lima bean", "edamame", "soybean", "split pea", "bean", "legume", "dal", "dhal",
            "hummus",
        ],
    },
    CategoryEntry {
        category: FoodCategory::ProteinEgg,
        serving_grams: 50.0,
        form: FoodForm::Solid,
        keywords: &["egg", "eggs", "omelette", "omelet", "frittata"],
    },
    CategoryEntry {
        category: FoodCategory::DairyMilk,
        serving_grams: 244.0,
        form: FoodForm::Liquid,
        keywords: &[
            "milk", "whole milk", "skim milk", "low-fat milk", "2% milk", "buttermilk",
            "goat milk",
        ],
    },
    CategoryEntry {
        category: FoodCategory::DairyYogurt,
        serving_grams: 170.0,
        form: FoodForm::Solid,
        keywords: &["yogurt", "yoghurt", "greek yogurt", "skyr", "kefir", "lassi"],
    },
    CategoryEntry {
        category: FoodCategory::DairyCheese,
        serving_grams: 30.0,
        form: FoodForm::Solid,
        keywords: &[
            "cheese", "cheddar", "mozzarella", "parmesan", "brie", "gouda", "swiss", "feta",
            "ricotta", "cottage cheese", "cream cheese", "provolone", "gruyere", "camembert",
            "blue cheese", "goat cheese",
        ],
    },
    CategoryEntry {
        category: FoodCategory::GrainBread,
        serving_grams: 30.0,
        form: FoodForm::Solid,
        keywords: &[
            "bread", "toast", "bagel", "muffin", "croissant", "baguette", "pita", "naan",
            "tortilla", "flatbread", "roll", "bun", "sourdough", "rye bread",
            "whole wheat bread",
        ],
    },
    CategoryEntry {
        category: FoodCategory::GrainCereal,
        serving_grams: 40.0,
        form: FoodForm::Solid,
        keywords: &[
            "cereal", "oat", "oatmeal", "granola", "muesli", "porridge", "cornflake", "bran",
        ],
    },
    CategoryEntry {
        category: FoodCategory::GrainPasta,
        serving_grams: 140.0,
        form: FoodForm::Solid,
        keywords: &[
            "pasta", "spaghetti", "penne", "fusilli", "macaroni", "linguine", "fettuccine",
            "noodle", "ramen", "udon", "rice noodle", "lasagna",
        ],
    },
    CategoryEntry {
        category: FoodCategory::GrainRice,
        serving_grams: 150.0,
        form: FoodForm::Solid,
        keywords: &[
            "rice", "brown rice", "white rice", "basmati", "jasmine rice", "wild rice",
            "risotto", "quinoa", "couscous", "bulgur",
        ],
    },
    CategoryEntry {
        category: FoodCategory::BeverageJuice,
        serving_grams: 250.0,
        form: FoodForm::Liquid,
        keywords: &[
            "juice", "orange juice", "apple juice", "grape juice", "cranberry juice",
            "tomato juice", "vegetable juice", "smoothie", "nectar",
        ],
    },
    CategoryEntry {
        category: FoodCategory::BeverageSoda,
        serving_grams: 330.0,
        form: FoodForm::Liquid,
        keywords: &[
            "soda", "cola", "pepsi", "coca cola", "coke", "sprite", "fanta", "mountain dew",
            "dr pepper", "ginger ale", "tonic", "root beer", "energy drink", "red bull",
            "monster",
        ],
    },
    CategoryEntry {
        category: FoodCategory::BeverageTeaCoffee,
        serving_grams: 240.0,
        form: FoodForm::Liquid,
        keywords: &[
            "tea", "coffee", "espresso", "latte", "cappuccino", "matcha", "green tea",
            "black tea", "herbal tea", "iced tea", "chai",
        ],
    },
    CategoryEntry {
        category: FoodCategory::BeverageWater,
        serving_grams: 250.0,
        form: FoodForm::Liquid,
        keywords: &["water", "sparkling water", "mineral water", "coconut water"],
    },
    CategoryEntry {
        category: FoodCategory::BeverageAlcohol,
        serving_grams: 150.0,
        form: FoodForm::Liquid,
        keywords: &[
            "beer", "wine", "vodka", "whiskey", "rum", "gin", "tequila", "sake", "cider",
            "champagne", "cocktail", "ale", "stout", "lager",
        ],
    },
    CategoryEntry {
        category: FoodCategory::BeverageMilkAlt,
        serving_grams: 244.0,
        form: FoodForm::Liquid,
        keywords: &[
            "oat milk", "almond milk", "soy milk", "coconut milk", "rice milk", "hemp milk",
            "cashew milk", "plant milk",
        ],
    },
    CategoryEntry {
        category: FoodCategory::Snack,
        serving_grams: 30.0,
        form: FoodForm::Solid,
        keywords: &[
            "chip", "chips", "crisp", "crisps", "cracker", "pretzel", "popcorn", "trail mix",
            "granola bar", "protein bar", "energy bar", "snack bar", "rice cake",
        ],
    },
    CategoryEntry {
        category: FoodCategory::Dessert,
        serving_grams: 80.0,
        form: FoodForm::Solid,
        keywords: &[
            "cake", "cookie", "brownie", "pie", "tart", "pastry", "donut", "doughnut",
            "ice cream", "gelato", "sorbet", "pudding", "mousse", "cupcake", "waffle",
            "pancake", "crepe", "churro", "eclair", "macaron", "tiramisu", "cheesecake",
            "flan", "custard",
        ],
    },
    CategoryEntry {
        category: FoodCategory::Candy,
        serving_grams: 30.0,
        form: FoodForm::Solid,
        keywords: &[
            "candy", "chocolate", "gummy", "lollipop", "caramel", "fudge", "toffee",
            "marshmallow", "licorice", "jelly bean", "skittles", "snickers", "mars", "twix",
            "kitkat", "reese", "oreo",
        ],
    },
    CategoryEntry {
        category: FoodCategory::Condiment,
        serving_grams: 15.0,
        form: FoodForm::Solid,
        keywords: &[
            "ketchup", "mustard", "mayonnaise", "mayo", "soy sauce", "hot sauce", "vinegar",
            "salsa", "guacamole", "hummus", "dressing", "bbq sauce", "teriyaki", "sriracha",
            "tabasco", "worcestershire", "pesto", "relish", "chutney", "aioli",
        ],
    },
    CategoryEntry {
        category: FoodCategory::OilFat,
        serving_grams: 14.0,
        form: FoodForm::Liquid,
        keywords: &[
            "oil", "olive oil", "coconut oil", "vegetable oil", "canola oil", "sesame oil",
            "avocado oil", "sunflower oil", "peanut oil", "butter", "margarine", "ghee", "lard",
            "shortening",
        ],
    },
    CategoryEntry {
        category: FoodCategory::Spread,
        serving_grams: 20.0,
        form: FoodForm::Solid,
        keywords: &[
            "jam", "jelly", "marmalade", "peanut butter", "almond butter", "nutella", "honey",
            "maple syrup", "syrup", "molasses", "agave",
        ],
    },
    CategoryEntry {
        category: FoodCategory::Spice,
        serving_grams: 3.0,
        form: FoodForm::Solid,
        keywords: &[
            "salt", "pepper", "sugar", "cinnamon", "paprika", "cumin", "turmeric", "oregano",
            "basil", "thyme", "rosemary", "ginger", "nutmeg", "clove", "cardamom",
            "chili powder", "curry powder",
        ],
    },
    CategoryEntry {
        category: FoodCategory::NutsSeeds,
        serving_grams: 30.0,
        form: FoodForm::Solid,
        keywords: &[
            "almond", "walnut", "cashew", "peanut", "pistachio", "pecan", "macadamia",
            "hazelnut", "brazil nut", "chestnut", "pine nut", "sunflower seed", "pumpkin seed",
            "chia seed", "flax seed", "hemp seed", "sesame seed", "nut", "nuts", "seed",
            "seeds",
        ],
    },
    CategoryEntry {
        category: FoodCategory::DriedFruit,
        serving_grams: 30.0,
        form: FoodForm::Solid,
        keywords: &[
            "raisin", "dried", "dehydrated", "prune", "dried apricot", "dried fig",
            "dried mango", "dried cranberry", "date",
        ],
    },
    CategoryEntry {
        category: FoodCategory::PreparedMeal,
        serving_grams: 250.0,
        form: FoodForm::Solid,
        keywords: &[
            "pizza", "burger", "sandwich", "wrap", "taco", "burrito", "bowl", "curry", "stew",
            "soup", "salad", "stir fry", "casserole", "lasagna", "quiche", "risotto", "paella",
            "biryani", "sushi", "gyoza", "dumpling", "spring roll", "egg roll", "empanada",
            "meal", "dish", "plate", "platter", "combo",
        ],
    },
    CategoryEntry {
        category: FoodCategory::FrozenFood,
        serving_grams: 200.0,
        form: FoodForm::Solid,
        keywords: &[
            "frozen", "tv dinner", "frozen pizza", "frozen meal", "frozen entree", "ice pop",
            "popsicle",
        ],
    },
    CategoryEntry {
        category: FoodCategory::Supplement,
        serving_grams: 10.0,
        form: FoodForm::Solid,
        keywords: &[
            "protein powder", "whey", "casein", "creatine", "bcaa", "supplement", "vitamin",
            "mineral", "spirulina", "chlorella",
        ],
    },
    CategoryEntry {
        category: FoodCategory::ProduceAvocado,
        serving_grams: 70.0,
        form: FoodForm::Solid,
        keywords: &["avocado", "guacamole"],
    },
];

/// Fraction of 100 g that makes up one realistic serving, for foods where the
/// per-100g profile overstates a real portion. Entries at 1.0 pin compound
/// names (e.g. "almond milk") so a shorter condiment keyword cannot claim them.
pub static SERVING_SCALES: &[(&str, f64)] = &[
    // Oils and solid fats: one tablespoon
    ("olive oil", 0.14),
    ("coconut oil", 0.14),
    ("vegetable oil", 0.14),
    ("canola oil", 0.14),
    ("sesame oil", 0.14),
    ("sunflower oil", 0.14),
    ("avocado oil", 0.14),
    ("oil", 0.14),
    ("boiled", 1.0),
    ("broiled", 1.0),
    ("butter", 0.14),
    ("margarine", 0.14),
    ("ghee", 0.14),
    ("lard", 0.13),
    ("buttermilk", 1.0),
    // Spreads and syrups
    ("peanut butter", 0.32),
    ("almond butter", 0.32),
    ("nutella", 0.37),
    ("jam", 0.20),
    ("marmalade", 0.20),
    ("honey", 0.21),
    ("maple syrup", 0.20),
    ("syrup", 0.20),
    // Condiments
    ("ketchup", 0.17),
    ("mustard", 0.05),
    ("mayonnaise", 0.14),
    ("mayo", 0.14),
    ("soy sauce", 0.16),
    ("hot sauce", 0.05),
    ("bbq sauce", 0.17),
    ("dressing", 0.30),
    ("vinegar", 0.15),
    ("salsa", 0.30),
    ("pesto", 0.16),
    // Spices and seasonings: one teaspoon or less
    ("salt", 0.02),
    ("salted", 1.0),
    ("black pepper", 0.01),
    ("granulated sugar", 0.04),
    ("brown sugar", 0.04),
    ("cane sugar", 0.04),
    ("icing sugar", 0.04),
    ("cinnamon", 0.03),
    ("paprika", 0.02),
    ("cumin", 0.02),
    ("turmeric", 0.03),
    ("chili powder", 0.03),
    ("curry powder", 0.02),
    // Nuts and seeds: a small handful
    ("almond", 0.28),
    ("almond milk", 1.0),
    ("walnut", 0.28),
    ("cashew", 0.28),
    ("cashew milk", 1.0),
    ("peanut", 0.28),
    ("pistachio", 0.28),
    ("pecan", 0.28),
    ("hazelnut", 0.28),
    ("macadamia", 0.28),
    ("sunflower seed", 0.28),
    ("pumpkin seed", 0.28),
    ("chia seed", 0.12),
    ("flax seed", 0.10),
    // Cheese: one slice or a grated portion
    ("cheese", 0.30),
    ("cheddar", 0.30),
    ("mozzarella", 0.30),
    ("feta", 0.30),
    ("parmesan", 0.10),
    ("cream cheese", 0.30),
    ("cottage cheese", 1.0),
    ("cheesecake", 1.0),
];

/// Scale used when no serving keyword matches
pub const DEFAULT_SERVING_SCALE: f64 = 1.0;

/// Names that mark a drink; liquids get no fiber/protein offset
pub static LIQUID_KEYWORDS: &[&str] = &[
    "juice", "soda", "cola", "drink", "beverage", "nectar", "smoothie",
];

/// Names that mark dried or sugar-concentrated fruit
pub static DRIED_KEYWORDS: &[&str] = &["dried", "dehydrated", "raisin", "mango", "date"];

/// Whole foods trusted as minimally processed unless the name says otherwise
pub static SUPERFOOD_KEYWORDS: &[&str] = &[
    "salmon", "lentils", "beans", "apple", "broccoli", "egg", "avocado",
];

/// Cooking, packaging and composite-dish words that rule out whole-fresh status
pub static HEAVILY_PROCESSED_KEYWORDS: &[&str] = &[
    "fried", "fries", "breaded", "battered", "grilled", "baked", "roasted", "cooked",
    "burger", "sandwich", "pizza", "nugget", "patty", "soup", "stew", "curry", "meal",
    "plate", "dish", "casserole", "lasagna", "stir fry",
];

/// Plain-dairy markers; combined with a sugar ceiling by the scorer
pub static PLAIN_DAIRY_KEYWORDS: &[&str] = &["milk", "yogurt"];

/// Whether `lowered` contains any keyword from `keywords`
#[must_use]
pub fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lowered.contains(kw))
}

/// Order `(keyword, value)` pairs by keyword length descending.
///
/// The sort is stable, so equal-length keywords keep their table order.
#[must_use]
pub fn longest_first<T: Copy>(pairs: impl IntoIterator<Item = (&'static str, T)>) -> Vec<(&'static str, T)> {
    let mut ordered: Vec<(&'static str, T)> = pairs.into_iter().collect();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    ordered
}

/// Every (keyword, category) pair of the taxonomy, longest keyword first
pub static CATEGORY_KEYWORDS: LazyLock<Vec<(&'static str, FoodCategory)>> = LazyLock::new(|| {
    longest_first(
        CATEGORY_TAXONOMY
            .iter()
            .flat_map(|entry| entry.keywords.iter().map(|kw| (*kw, entry.category))),
    )
});

/// Serving-scale table, longest keyword first
pub static SERVING_SCALE_KEYWORDS: LazyLock<Vec<(&'static str, f64)>> =
    LazyLock::new(|| longest_first(SERVING_SCALES.iter().copied()));

/// Look up the taxonomy entry for a category
#[must_use]
pub fn entry_for(category: FoodCategory) -> Option<&'static CategoryEntry> {
    CATEGORY_TAXONOMY
        .iter()
        .find(|entry| entry.category == category)
}

/// Typical serving in grams, 100 g for unknown categories
#[must_use]
pub fn serving_grams(category: FoodCategory) -> f64 {
    entry_for(category).map_or(DEFAULT_SERVING_GRAMS, |entry| entry.serving_grams)
}

/// Typical physical form, solid for unknown categories
#[must_use]
pub fn form_of(category: FoodCategory) -> FoodForm {
    entry_for(category).map_or(FoodForm::Solid, |entry| entry.form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_lowercase_and_trimmed() {
        let all = CATEGORY_TAXONOMY
            .iter()
            .flat_map(|e| e.keywords.iter().copied())
            .chain(SERVING_SCALES.iter().map(|(kw, _)| *kw))
            .chain(LIQUID_KEYWORDS.iter().copied())
            .chain(DRIED_KEYWORDS.iter().copied())
            .chain(SUPERFOOD_KEYWORDS.iter().copied())
            .chain(HEAVILY_PROCESSED_KEYWORDS.iter().copied());
        for kw in all {
            assert_eq!(kw, kw.to_lowercase(), "keyword {kw:?} is not lowercase");
            assert_eq!(kw, kw.trim(), "keyword {kw:?} has padding");
        }
    }

    #[test]
    fn test_keyword_index_is_longest_first() {
        let lengths: Vec<usize> = CATEGORY_KEYWORDS.iter().map(|(kw, _)| kw.len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
        let scales: Vec<usize> = SERVING_SCALE_KEYWORDS.iter().map(|(kw, _)| kw.len()).collect();
        assert!(scales.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_equal_length_ties_keep_table_order() {
        // "hummus" is both a legume and a condiment; the legume entry comes first
        let first = CATEGORY_KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == "hummus")
            .map(|(_, cat)| *cat);
        assert_eq!(first, Some(FoodCategory::ProteinLegume));
    }

    #[test]
    fn test_serving_scales_are_fractions() {
        for (kw, scale) in SERVING_SCALES {
            assert!(*scale > 0.0 && *scale <= 1.0, "{kw} has scale {scale}");
        }
    }

    #[test]
    fn test_serving_lookup_defaults() {
        assert!((serving_grams(FoodCategory::OilFat) - 14.0).abs() < f64::EPSILON);
        assert!((serving_grams(FoodCategory::Unknown) - DEFAULT_SERVING_GRAMS).abs() < f64::EPSILON);
        assert_eq!(form_of(FoodCategory::BeverageSoda), FoodForm::Liquid);
        assert_eq!(form_of(FoodCategory::Unknown), FoodForm::Solid);
    }
}
