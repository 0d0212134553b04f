//! Scan and nutrition lookup tools
//!
//! Everything here may block on HTTP; callers run it on a blocking thread.

use std::path::Path;

use base64::{engine::general_purpose, Engine};
use serde::Serialize;

use crate::insights::{alternatives, recommend};
use crate::models::{Goal, NutritionRecord};
use crate::nutrition::{normalize_name, NutritionResolver, NutritionSource};
use crate::scan::{ScanReport, ScanRequest, Scanner};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AnalyzeImageResponse {
    #[serde(flatten)]
    pub report: ScanReport,
    pub can_log: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ResolveNutritionResponse {
    pub name: String,
    pub found: bool,
    pub source: Option<NutritionSource>,
    pub nutrition: Option<NutritionRecord>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub food: String,
    pub goal: Goal,
    pub nutrition: Option<NutritionRecord>,
    pub recommendations: Vec<String>,
    pub alternatives: Vec<String>,
    pub message: Option<String>,
}

// ============================================================================
// Image Input
// ============================================================================

/// Raw image bytes from exactly one of a file path or a base64 string.
///
/// A `data:image/...;base64,` prefix on the base64 input is accepted.
pub fn read_image_input(image_path: Option<&str>, image_base64: Option<&str>) -> Result<Vec<u8>, String> {
    match (image_path, image_base64) {
        (Some(_), Some(_)) => Err("Provide either image_path or image_base64, not both".to_string()),
        (None, None) => Err("Provide image_path or image_base64".to_string()),
        (Some(path), None) => std::fs::read(Path::new(path))
            .map_err(|e| format!("Failed to read image file '{}': {}", path, e)),
        (None, Some(encoded)) => {
            let data = match encoded.split_once(";base64,") {
                Some((prefix, data)) if prefix.starts_with("data:") => data,
                _ => encoded,
            };
            let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
            general_purpose::STANDARD
                .decode(compact)
                .map_err(|e| format!("Invalid base64 image data: {}", e))
        }
    }
}

// ============================================================================
// Tool Functions
// ============================================================================

/// Run the full scan pipeline on image bytes
pub fn analyze_image(
    scanner: &Scanner,
    image_bytes: &[u8],
    request: ScanRequest,
) -> Result<AnalyzeImageResponse, String> {
    let report = scanner
        .analyze(image_bytes, request)
        .map_err(|e| format!("Failed to analyze image: {}", e))?;

    let can_log = report.is_loggable();
    let message = if can_log {
        match &report.weight_impact {
            Some(impact) => format!(
                "Recognized {}. About {:.0} kcal for this plate. Call log_scanned_meal to add it to today's log.",
                report.recognition.name, impact.nutrition.calories
            ),
            None => format!("Recognized {}.", report.recognition.name),
        }
    } else if report.recognized {
        format!("Recognized {}, but there is no nutrition data to log.", report.recognition.name)
    } else {
        "No food recognized. Try a clearer, closer photo.".to_string()
    };

    Ok(AnalyzeImageResponse {
        report,
        can_log,
        message,
    })
}

pub fn resolve_nutrition(resolver: &NutritionResolver, name: &str) -> Result<ResolveNutritionResponse, String> {
    if normalize_name(name).is_empty() {
        return Err("Food name is required".to_string());
    }
    let resolved = resolver.resolve_detailed(name);
    Ok(ResolveNutritionResponse {
        name: name.trim().to_string(),
        found: resolved.is_some(),
        source: resolved.as_ref().map(|r| r.source.clone()),
        nutrition: resolved.map(|r| r.record),
    })
}

pub fn get_recommendations(
    resolver: &NutritionResolver,
    food: &str,
    goal: Goal,
) -> Result<RecommendationsResponse, String> {
    if normalize_name(food).is_empty() {
        return Err("Food name is required".to_string());
    }
    let nutrition = resolver.resolve(food);
    let (recommendations, message) = match &nutrition {
        Some(record) => (recommend(food, record, goal), None),
        None => (
            Vec::new(),
            Some(format!("No nutrition data for '{}'; showing alternatives only.", food.trim())),
        ),
    };
    Ok(RecommendationsResponse {
        food: food.trim().to_string(),
        goal,
        nutrition,
        recommendations,
        alternatives: alternatives(food),
        message,
    })
}
