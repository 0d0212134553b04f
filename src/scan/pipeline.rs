//! End-to-end food photo analysis
//!
//! decode -> classify -> plate totals -> main item nutrition -> advice ->
//! weight impact -> pending meal. Only undecodable images and invalid
//! request values are errors; every collaborator failure degrades.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::recognition::{FoodCheck, Recognition, MIN_RECOGNITION_CONFIDENCE};
use crate::clients::VisionClassifier;
use crate::insights::{alternatives, recommend};
use crate::intake::{FoodImage, ImageError, THUMBNAIL_MAX_SIDE};
use crate::models::{
    CombinedNutrition, Goal, MealLogEntry, MealLogEntryCreate, NutritionRecord, PortionFactor,
    Thumbnail, ValidationError,
};
use crate::nutrition::{aggregate_plate, normalize_name, NutritionResolver, PlateAggregate};

pub const UNCLEAR_IMAGE_NOTE: &str =
    "📷 This looks like a **generic image or unclear food**. I'll still try to guess what it is.";

pub const RETAKE_HINT: &str = "🤔 I couldn't confidently recognize a specific food item in this image. \
It might not be food, or the photo is too unclear. \
Try a clearer, closer top-view photo of the food on your plate.";

pub const NO_PLATE_DATA_NOTE: &str = "I couldn't find nutrition data for the selected items. \
Try selecting a simpler item like 'pizza', 'rice', 'roti', etc.";

pub const NO_MAIN_DATA_NOTE: &str =
    "I recognized this as a food item but don't have nutrition data for it yet.";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// User choices that accompany a photo
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Plate items; `None` or empty means just the recognized food
    pub selected_items: Option<Vec<String>>,
    pub portion: f64,
    pub goal: Goal,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            selected_items: None,
            portion: PortionFactor::default().value(),
            goal: Goal::default(),
        }
    }
}

/// Calories and macros attributed to the meal, with the goal-specific note
#[derive(Debug, Clone, Serialize)]
pub struct WeightImpact {
    pub nutrition: CombinedNutrition,
    /// Whether the figures come from the plate totals or from the main item
    pub from_plate: bool,
    pub message: String,
}

/// A successful scan waiting for "log this meal"
#[derive(Debug, Clone, Serialize)]
pub struct PendingMeal {
    pub foods: Vec<String>,
    pub nutrition: CombinedNutrition,
    pub portion: PortionFactor,
    pub goal: Goal,
    #[serde(skip)]
    pub thumbnail: Option<Thumbnail>,
}

impl PendingMeal {
    pub fn into_entry(self, date: NaiveDate, time: NaiveTime) -> MealLogEntry {
        MealLogEntry::create(MealLogEntryCreate {
            date,
            time,
            foods: self.foods,
            nutrition: self.nutrition,
            portion: self.portion,
            goal: self.goal,
            thumbnail: self.thumbnail,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub food_check: FoodCheck,
    pub image_note: String,
    pub recognition: Recognition,
    pub recognized: bool,
    pub candidates: Vec<String>,
    pub selected: Vec<String>,
    pub portion: PortionFactor,
    pub goal: Goal,
    pub plate: Option<PlateAggregate>,
    pub notes: Vec<String>,
    pub main_nutrition: Option<NutritionRecord>,
    pub recommendations: Vec<String>,
    pub alternatives: Vec<String>,
    pub weight_impact: Option<WeightImpact>,
    #[serde(skip)]
    pub pending: Option<PendingMeal>,
}

impl ScanReport {
    fn new(food_check: FoodCheck, recognition: Recognition, portion: PortionFactor, goal: Goal) -> Self {
        let image_note = if food_check.is_unclear() {
            UNCLEAR_IMAGE_NOTE.to_string()
        } else {
            format!(
                "✅ This looks like a **food image** (model confidence ~{:.1}%).",
                food_check.confidence * 100.0
            )
        };
        Self {
            food_check,
            image_note,
            recognized: recognition.is_known(),
            recognition,
            candidates: Vec::new(),
            selected: Vec::new(),
            portion,
            goal,
            plate: None,
            notes: Vec::new(),
            main_nutrition: None,
            recommendations: Vec::new(),
            alternatives: Vec::new(),
            weight_impact: None,
            pending: None,
        }
    }

    /// True when the report carries a meal that can be logged
    pub fn is_loggable(&self) -> bool {
        self.pending.is_some()
    }
}

pub struct Scanner {
    classifier: Arc<dyn VisionClassifier>,
    resolver: NutritionResolver,
}

impl Scanner {
    pub fn new(classifier: Arc<dyn VisionClassifier>, resolver: NutritionResolver) -> Self {
        Self {
            classifier,
            resolver,
        }
    }

    pub fn resolver(&self) -> &NutritionResolver {
        &self.resolver
    }

    /// Analyze a food photo. Blocking: calls the classifier and possibly the
    /// nutrition lookup over HTTP.
    pub fn analyze(&self, image_bytes: &[u8], request: ScanRequest) -> Result<ScanReport, ScanError> {
        let portion = PortionFactor::new(request.portion)?;
        let goal = request.goal;
        let image = FoodImage::decode(image_bytes)?;
        let (width, height) = image.dimensions();
        debug!("Decoded {:?} photo, {}x{}", image.format(), width, height);

        let concepts = match self.classifier.classify(&image) {
            Ok(concepts) => concepts,
            Err(e) => {
                warn!("Classification unavailable: {}", e);
                Vec::new()
            }
        };
        let food_check = FoodCheck::from_concepts(&concepts);
        let recognition = Recognition::from_concepts(&concepts, MIN_RECOGNITION_CONFIDENCE);
        let mut report = ScanReport::new(food_check, recognition, portion, goal);

        if !report.recognized {
            info!("Scan: no food recognized (confidence {:.2})", report.recognition.confidence);
            report.notes.push(RETAKE_HINT.to_string());
            return Ok(report);
        }

        let main = report.recognition.name.clone();
        info!("Scan: recognized '{}' ({:.2})", main, report.recognition.confidence);

        report.candidates = std::iter::once(main.clone())
            .chain(report.recognition.alternatives.iter().cloned())
            .collect();
        report.selected = selection_or_main(request.selected_items, &main);

        let plate = aggregate_plate(&self.resolver, &report.selected, portion);
        if plate.has_data() {
            if !plate.missing.is_empty() {
                report.notes.push(format!(
                    "No nutrition data found for: {}. You can extend the database later.",
                    plate.missing.join(", ")
                ));
            }
            report.plate = Some(plate);
        } else {
            report.notes.push(NO_PLATE_DATA_NOTE.to_string());
        }

        let Some(main_nutrition) = self.resolver.resolve(&main) else {
            report.notes.push(NO_MAIN_DATA_NOTE.to_string());
            return Ok(report);
        };

        report.recommendations = recommend(&main, &main_nutrition, goal);
        report.alternatives = alternatives(&main);

        let (nutrition, from_plate) = match &report.plate {
            Some(plate) => (plate.totals, true),
            None => (main_nutrition.totals().scale(portion.value()), false),
        };
        report.weight_impact = Some(WeightImpact {
            nutrition,
            from_plate,
            message: weight_impact_message(nutrition.calories, portion, goal),
        });
        report.main_nutrition = Some(main_nutrition);

        report.pending = Some(PendingMeal {
            foods: report.selected.clone(),
            nutrition,
            portion,
            goal,
            thumbnail: thumbnail_for(&image),
        });

        Ok(report)
    }
}

fn selection_or_main(selected: Option<Vec<String>>, main: &str) -> Vec<String> {
    let items: Vec<String> = selected
        .unwrap_or_default()
        .into_iter()
        .filter(|item| !normalize_name(item).is_empty())
        .map(|item| item.trim().to_string())
        .collect();
    if items.is_empty() {
        vec![main.to_string()]
    } else {
        items
    }
}

fn thumbnail_for(image: &FoodImage) -> Option<Thumbnail> {
    match image.thumbnail_png(THUMBNAIL_MAX_SIDE) {
        Ok(png) => Some(Thumbnail::from_png(png)),
        Err(e) => {
            warn!("Could not create thumbnail: {}", e);
            None
        }
    }
}

pub fn weight_impact_message(calories: f64, portion: PortionFactor, goal: Goal) -> String {
    let lead = format!(
        "This plate (with portion factor {}x) is about **{:.0} kcal**",
        portion,
        calories
    );
    match goal {
        Goal::Lose => format!(
            "{}. For weight loss, stay in a daily calorie deficit and \
             balance this with lighter meals and activity.",
            lead
        ),
        Goal::Gain => format!(
            "{}. For healthy weight gain, combine it with enough protein and strength training.",
            lead
        ),
        Goal::Maintain => format!(
            "{} and can fit into a balanced diet if it matches your total daily calorie needs.",
            lead
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::{StubClassifier, StubLookup};
    use crate::intake::tests::sample_png;
    use crate::models::NutritionRecord;

    fn scanner(classifier: StubClassifier, lookup: StubLookup) -> Scanner {
        Scanner::new(
            Arc::new(classifier),
            NutritionResolver::with_lookup(Arc::new(lookup)),
        )
    }

    fn request(selected: Option<&[&str]>, portion: f64, goal: Goal) -> ScanRequest {
        ScanRequest {
            selected_items: selected.map(|items| items.iter().map(|s| s.to_string()).collect()),
            portion,
            goal,
        }
    }

    #[test]
    fn test_malformed_image_is_hard_error() {
        let scanner = scanner(StubClassifier::returning(&[("pizza", 0.9)]), StubLookup::default());
        let result = scanner.analyze(b"not an image", ScanRequest::default());
        assert!(matches!(result, Err(ScanError::Image(_))));
    }

    #[test]
    fn test_invalid_portion_is_validation_error() {
        let scanner = scanner(StubClassifier::returning(&[("pizza", 0.9)]), StubLookup::default());
        let result = scanner.analyze(&sample_png(8, 8), request(None, 0.1, Goal::Lose));
        assert!(matches!(
            result,
            Err(ScanError::Validation(ValidationError::PortionOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_classifier_failure_degrades_to_unknown() {
        let scanner = scanner(StubClassifier::unavailable(), StubLookup::default());
        let report = scanner.analyze(&sample_png(8, 8), ScanRequest::default()).unwrap();
        assert!(!report.recognized);
        assert_eq!(report.recognition.name, "unknown");
        assert_eq!(report.recognition.confidence, 0.0);
        assert_eq!(report.image_note, UNCLEAR_IMAGE_NOTE);
        assert_eq!(report.notes, vec![RETAKE_HINT.to_string()]);
        assert!(!report.is_loggable());
    }

    #[test]
    fn test_full_scan_with_plate_selection() {
        let scanner = scanner(
            StubClassifier::returning(&[("pizza", 0.93), ("salad", 0.41), ("sushi", 0.3)]),
            StubLookup::default(),
        );
        let report = scanner
            .analyze(
                &sample_png(64, 64),
                request(Some(&["pizza", "salad", "sushi"]), 0.75, Goal::Lose),
            )
            .unwrap();

        assert!(report.recognized);
        assert!(report.image_note.starts_with("✅ This looks like a **food image** (model confidence ~93.0%)"));
        assert_eq!(report.candidates, vec!["pizza", "salad", "sushi"]);

        let plate = report.plate.as_ref().unwrap();
        assert_eq!(plate.totals.calories, 273.75);
        assert_eq!(plate.missing, vec!["sushi"]);
        assert_eq!(
            report.notes,
            vec!["No nutrition data found for: sushi. You can extend the database later.".to_string()]
        );

        assert_eq!(report.main_nutrition.as_ref().unwrap().calories, 285);
        assert_eq!(report.recommendations.len(), 2);
        assert_eq!(report.alternatives.len(), 3);

        let impact = report.weight_impact.as_ref().unwrap();
        assert!(impact.from_plate);
        assert!(impact
            .message
            .starts_with("This plate (with portion factor 0.75x) is about **274 kcal**. For weight loss"));

        let pending = report.pending.clone().unwrap();
        assert_eq!(pending.foods, vec!["pizza", "salad", "sushi"]);
        assert!(pending.thumbnail.is_some());
    }

    #[test]
    fn test_default_selection_is_main_item() {
        let scanner = scanner(StubClassifier::returning(&[("Roti", 0.8)]), StubLookup::default());
        let report = scanner
            .analyze(&sample_png(16, 16), request(Some(&["  "]), 1.0, Goal::Maintain))
            .unwrap();
        assert_eq!(report.selected, vec!["Roti"]);
        assert_eq!(report.pending.unwrap().nutrition.calories, 110.0);
    }

    #[test]
    fn test_plate_without_data_falls_back_to_main_item() {
        let lookup = StubLookup::default().with("ramen", NutritionRecord::new(450, 15.0, 60.0, 16.0, 3.0));
        let scanner = scanner(StubClassifier::returning(&[("ramen", 0.88)]), lookup);
        let report = scanner
            .analyze(&sample_png(16, 16), request(Some(&["gyoza"]), 2.0, Goal::Gain))
            .unwrap();

        assert!(report.plate.is_none());
        assert_eq!(report.notes, vec![NO_PLATE_DATA_NOTE.to_string()]);
        let impact = report.weight_impact.unwrap();
        assert!(!impact.from_plate);
        assert_eq!(impact.nutrition.calories, 900.0);
        assert!(impact.message.starts_with("This plate (with portion factor 2.0x) is about **900 kcal**."));
        assert_eq!(report.pending.unwrap().foods, vec!["gyoza"]);
    }

    #[test]
    fn test_no_nutrition_for_main_item() {
        let scanner = scanner(StubClassifier::returning(&[("durian", 0.77)]), StubLookup::default());
        let report = scanner.analyze(&sample_png(16, 16), ScanRequest::default()).unwrap();
        assert!(report.recognized);
        assert!(report.main_nutrition.is_none());
        assert_eq!(
            report.notes,
            vec![NO_PLATE_DATA_NOTE.to_string(), NO_MAIN_DATA_NOTE.to_string()]
        );
        assert!(!report.is_loggable());
    }

    #[test]
    fn test_pending_meal_into_entry() {
        let pending = PendingMeal {
            foods: vec!["pizza".to_string()],
            nutrition: CombinedNutrition {
                calories: 213.75,
                protein: 9.0,
                carbs: 27.04,
                fat: 7.5,
                fiber: 1.5,
            },
            portion: PortionFactor::new(0.75).unwrap(),
            goal: Goal::Lose,
            thumbnail: None,
        };
        let entry = pending.into_entry(
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            NaiveTime::from_hms_opt(19, 45, 30).unwrap(),
        );
        assert_eq!(entry.calories, 214);
        assert_eq!(entry.carbs, 27.0);
        assert_eq!(entry.time_label(), "19:45");
    }

    #[test]
    fn test_weight_impact_messages() {
        let portion = PortionFactor::new(1.25).unwrap();
        assert_eq!(
            weight_impact_message(356.25, portion, Goal::Maintain),
            "This plate (with portion factor 1.25x) is about **356 kcal** and can fit into a \
             balanced diet if it matches your total daily calorie needs."
        );
        assert!(weight_impact_message(100.0, PortionFactor::default(), Goal::Gain)
            .ends_with("combine it with enough protein and strength training."));
    }
}
