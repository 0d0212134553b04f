//! Remote collaborators
//!
//! Both services sit behind a trait so the nutrition core and the scan
//! pipeline can be exercised with stubs.

pub mod clarifai;
mod error;
pub mod open_food_facts;

use serde::Serialize;

use crate::intake::FoodImage;
use crate::models::NutritionRecord;

pub use clarifai::ClarifaiClassifier;
pub use error::ClientError;
pub use open_food_facts::OpenFoodFactsClient;

/// One label predicted by the vision model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Concept {
    pub name: String,
    pub confidence: f64,
}

impl Concept {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Predicts food labels for an image
pub trait VisionClassifier: Send + Sync {
    /// Concepts sorted by confidence, highest first
    fn classify(&self, image: &FoodImage) -> Result<Vec<Concept>, ClientError>;
}

/// Looks up nutrition for a food name the curated table doesn't know
pub trait NutritionLookup: Send + Sync {
    /// `Ok(None)` when the service has nothing usable for the name
    fn lookup(&self, name: &str) -> Result<Option<NutritionRecord>, ClientError>;
}
