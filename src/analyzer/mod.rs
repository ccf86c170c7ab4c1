//! Meal analysis: photo (+ optional hint) → nutrition estimate.
//!
//! Analysis never fails from the caller's point of view. A failed call
//! still yields a well-formed estimate, but it is tagged as
//! [`Analysis::Fallback`] together with the reason, so a guess can always be
//! told apart from a real estimate.

pub mod error;
pub mod food_table;
pub mod groq;
pub mod image;

pub use error::AnalyzerError;
pub use groq::GroqAnalyzer;
pub use image::ImagePayload;

use crate::models::{Macros, NewEntry};
use async_trait::async_trait;
use serde::Serialize;

/// Where an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    /// Structured answer of the vision model.
    Model,
    /// Dish name from the model, calories from the built-in table.
    FoodTable,
    /// Fixed default used when analysis failed.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealEstimate {
    pub name: String,
    pub kcal: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub reasoning: String,
    pub description: Option<String>,
    pub source: EstimateSource,
}

impl MealEstimate {
    /// The estimate used whenever analysis fails.
    pub fn fallback() -> Self {
        Self {
            name: "Unknown meal".to_string(),
            kcal: 300,
            protein: 15,
            carbs: 35,
            fat: 12,
            reasoning: "Could not analyze image. Estimated ~300 kcal.".to_string(),
            description: Some("Could not analyze image. Estimated ~300 kcal.".to_string()),
            source: EstimateSource::Fallback,
        }
    }

    pub fn macros(&self) -> Macros {
        Macros {
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

/// Outcome of one analysis.
#[derive(Debug)]
pub enum Analysis {
    Estimated(MealEstimate),
    Fallback {
        estimate: MealEstimate,
        reason: AnalyzerError,
    },
}

impl Analysis {
    pub fn fallback(reason: AnalyzerError) -> Self {
        Self::Fallback {
            estimate: MealEstimate::fallback(),
            reason,
        }
    }

    pub fn estimate(&self) -> &MealEstimate {
        match self {
            Self::Estimated(e) => e,
            Self::Fallback { estimate, .. } => estimate,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&AnalyzerError> {
        match self {
            Self::Estimated(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Journal entry candidate; `hint` is kept as the entry's additional
    /// details.
    pub fn into_new_entry(self, hint: Option<&str>) -> NewEntry {
        let estimate = match self {
            Self::Estimated(e) => e,
            Self::Fallback { estimate, .. } => estimate,
        };

        NewEntry {
            kcal: f64::from(estimate.kcal),
            macros: Some(estimate.macros()),
            description: estimate.description,
            reasoning: Some(estimate.reasoning),
            additional_details: hint.map(str::to_string),
            name: estimate.name,
        }
    }
}

/// Turns a meal photo into a nutrition estimate.
#[async_trait]
pub trait MealAnalyzer: Send + Sync {
    async fn analyze(&self, image: &ImagePayload, hint: Option<&str>) -> Analysis;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_tagged_and_well_formed() {
        let a = Analysis::fallback(AnalyzerError::MissingApiKey("GROQ_API_KEY".into()));
        assert!(a.is_fallback());
        assert!(a.fallback_reason().is_some());
        assert_eq!(a.estimate().kcal, 300);
        assert_eq!(a.estimate().source, EstimateSource::Fallback);
    }

    #[test]
    fn new_entry_carries_estimate_and_hint() {
        let est = MealEstimate {
            name: "Ramen".into(),
            kcal: 520,
            protein: 22,
            carbs: 70,
            fat: 16,
            reasoning: "Large bowl with pork".into(),
            description: None,
            source: EstimateSource::Model,
        };
        let entry = Analysis::Estimated(est).into_new_entry(Some("extra egg"));

        assert_eq!(entry.name, "Ramen");
        assert_eq!(entry.kcal, 520.0);
        assert_eq!(
            entry.macros,
            Some(Macros {
                protein: 22,
                carbs: 70,
                fat: 16
            })
        );
        assert_eq!(entry.reasoning.as_deref(), Some("Large bowl with pork"));
        assert_eq!(entry.additional_details.as_deref(), Some("extra egg"));
    }
}
