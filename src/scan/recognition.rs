//! Interpretation of classifier concepts
//!
//! One classifier response feeds both the food-image check and the
//! recognition result.

use serde::Serialize;

use crate::clients::Concept;

pub const FOOD_CONFIDENCE_THRESHOLD: f64 = 0.5;
pub const UNCLEAR_CONFIDENCE: f64 = 0.4;
pub const MIN_RECOGNITION_CONFIDENCE: f64 = 0.3;
pub const ALTERNATIVE_MIN_CONFIDENCE: f64 = 0.2;
pub const MAX_ALTERNATIVES: usize = 5;
pub const UNKNOWN_FOOD: &str = "unknown";

/// Does the photo look like food at all?
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoodCheck {
    pub is_food: bool,
    pub confidence: f64,
}

impl FoodCheck {
    /// Top concept confidence decides; no concepts means "not food", confidence 0
    pub fn from_concepts(concepts: &[Concept]) -> Self {
        let confidence = top_concept(concepts).map(|c| c.confidence).unwrap_or(0.0);
        Self {
            is_food: confidence >= FOOD_CONFIDENCE_THRESHOLD,
            confidence,
        }
    }

    pub fn is_unclear(&self) -> bool {
        !self.is_food || self.confidence < UNCLEAR_CONFIDENCE
    }
}

/// The recognized food plus alternative labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recognition {
    pub name: String,
    pub confidence: f64,
    pub alternatives: Vec<String>,
}

impl Recognition {
    pub fn unknown(confidence: f64) -> Self {
        Self {
            name: UNKNOWN_FOOD.to_string(),
            confidence,
            alternatives: Vec::new(),
        }
    }

    /// Top label when confident enough, otherwise "unknown".
    ///
    /// Alternatives come from the next five labels, keeping only named ones
    /// with confidence >= 0.2.
    pub fn from_concepts(concepts: &[Concept], min_confidence: f64) -> Self {
        let mut sorted: Vec<&Concept> = concepts.iter().collect();
        sorted.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let Some(main) = sorted.first() else {
            return Self::unknown(0.0);
        };
        let name = main.name.trim();
        if name.is_empty() || main.confidence < min_confidence {
            return Self::unknown(main.confidence);
        }

        let alternatives = sorted
            .iter()
            .skip(1)
            .take(MAX_ALTERNATIVES)
            .filter(|c| !c.name.trim().is_empty() && c.confidence >= ALTERNATIVE_MIN_CONFIDENCE)
            .map(|c| c.name.trim().to_string())
            .collect();

        Self {
            name: name.to_string(),
            confidence: main.confidence,
            alternatives,
        }
    }

    pub fn is_known(&self) -> bool {
        self.name != UNKNOWN_FOOD
    }
}

fn top_concept(concepts: &[Concept]) -> Option<&Concept> {
    concepts
        .iter()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
}
