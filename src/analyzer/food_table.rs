//! Built-in per-serving calorie table, used when the model answers with a
//! bare dish name instead of a structured estimate.

use super::{EstimateSource, MealEstimate};
use crate::models::Macros;

/// kcal used when a dish is not in the table.
pub const DEFAULT_KCAL: u32 = 300;

/// Dish name → kcal per serving. Order matters for partial matches: the
/// first key contained in (or containing) the detected name wins.
const FOOD_CALORIES: &[(&str, u32)] = &[
    // pizza
    ("pizza", 280),
    ("pizza margherita", 250),
    ("pizza pepperoni", 320),
    ("pizza hawaii", 270),
    // burgers
    ("burger", 350),
    ("hamburger", 350),
    ("cheeseburger", 400),
    ("big mac", 550),
    // pasta
    ("pasta", 220),
    ("spaghetti", 220),
    ("spaghetti bolognese", 320),
    ("carbonara", 400),
    ("lasagna", 380),
    // meat & fish
    ("chicken", 200),
    ("steak", 300),
    ("fish", 180),
    ("salmon", 250),
    // salads
    ("salad", 150),
    ("caesar salad", 200),
    ("greek salad", 180),
    // sandwiches
    ("sandwich", 250),
    ("club sandwich", 350),
    ("panini", 300),
    // asian
    ("sushi", 200),
    ("ramen", 400),
    ("fried rice", 300),
    ("pad thai", 350),
    // desserts
    ("cake", 350),
    ("ice cream", 200),
    ("donut", 250),
    ("cookie", 150),
    // breakfast
    ("croissant", 180),
    ("toast", 120),
    ("pancakes", 300),
    ("eggs", 150),
    // generic
    ("meal", 300),
    ("food", 300),
    ("dish", 300),
];

/// Share of energy from protein / carbs / fat and kcal per gram of each.
const PROTEIN_RATIO: f64 = 0.15;
const CARBS_RATIO: f64 = 0.50;
const FAT_RATIO: f64 = 0.35;
const PROTEIN_KCAL_PER_G: f64 = 4.0;
const CARBS_KCAL_PER_G: f64 = 4.0;
const FAT_KCAL_PER_G: f64 = 9.0;

/// Find the table row for a detected dish: exact match first, then the first
/// key that contains or is contained in the name.
pub fn lookup(detected: &str) -> Option<(&'static str, u32)> {
    let name = normalize(detected);
    if name.is_empty() {
        return None;
    }

    if let Some(&(key, kcal)) = FOOD_CALORIES.iter().find(|(k, _)| *k == name) {
        return Some((key, kcal));
    }

    FOOD_CALORIES
        .iter()
        .find(|(k, _)| name.contains(k) || k.contains(name.as_str()))
        .map(|&(k, kcal)| (k, kcal))
}

/// Typical macro split for a given energy amount.
pub fn macros_for(kcal: u32) -> Macros {
    let kcal = f64::from(kcal);
    Macros {
        protein: (kcal * PROTEIN_RATIO / PROTEIN_KCAL_PER_G).round() as u32,
        carbs: (kcal * CARBS_RATIO / CARBS_KCAL_PER_G).round() as u32,
        fat: (kcal * FAT_RATIO / FAT_KCAL_PER_G).round() as u32,
    }
}

/// Build an estimate from a bare dish name.
pub fn estimate_for(detected: &str) -> MealEstimate {
    let normalized = normalize(detected);

    let (name, kcal, reasoning) = match lookup(&normalized) {
        Some((key, kcal)) => (
            key.to_string(),
            kcal,
            format!("Matched \"{key}\" in the built-in calorie table."),
        ),
        None => {
            let name = if normalized.is_empty() {
                "unknown dish".to_string()
            } else {
                normalized
            };
            (
                name,
                DEFAULT_KCAL,
                "Dish not in the built-in calorie table; using a typical serving.".to_string(),
            )
        }
    };

    let macros = macros_for(kcal);
    let name = capitalize(&name);
    MealEstimate {
        description: Some(format!(
            "Detected: {name}. Estimated calories: ~{kcal} kcal per serving."
        )),
        name,
        kcal,
        protein: macros.protein,
        carbs: macros.carbs,
        fat: macros.fat,
        reasoning,
        source: EstimateSource::FoodTable,
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == '!')
        .trim()
        .to_lowercase()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
