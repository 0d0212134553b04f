//! ScanEat Status Tool
//!
//! Provides runtime status information about the ScanEat service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::models::Goal;

/// Usage guide for AI assistants
pub const SCANEAT_INSTRUCTIONS: &str = r#"
# ScanEat Instructions

ScanEat recognizes food in a photo, estimates nutrition for the plate and keeps
a meal log for this session. The log lives in memory only: it is gone when the
server restarts.

## Typical Flow

1. `set_goal` once per session: `lose`, `maintain` (default) or `gain`.
2. `analyze_food_image` with either `image_path` or `image_base64`.
   - Optional `selected_items`: every food actually on the plate. Pick from the
     returned `candidates`, or name items yourself.
   - Optional `portion`: 0.25 to 2.0 (0.5 = half plate, 2.0 = double serving).
3. Show the user the plate totals, recommendations and alternatives.
4. If the user ate it, call `log_scanned_meal`. Only the most recent scan can be
   logged, and only once.

No photo? Use `log_meal` with a list of foods and a portion.

## Reading the Scan Report

- `recognized: false` means the model was not confident. Ask for a clearer,
  closer top-view photo.
- `plate` is missing when none of the selected items has nutrition data.
- `notes` lists items without data and other hints.
- `weight_impact` holds the figures that will be logged.

## Nutrition Sources

A small curated table (pizza, burger, idli, dosa, biryani, paneer butter masala,
salad, rice, roti) is matched first, including partial names ("cheese pizza"
matches pizza). Anything else goes to Open Food Facts (values per 100 g).

## Reviewing the Day and Week

- `get_today_log`: today's totals and the most recent meals. Pass
  `include_thumbnails: true` to also get the photo of each scanned meal.
- `get_coaching`: coaching text for today against the current goal.
- `get_weekly_summary` / `get_weekly_chart`: last 7 days.
- `get_history`, `list_entries_between`, `export_log_csv` for raw entries.

## Notes

- Dates use ISO format: YYYY-MM-DD. Omitted dates mean today (server local time).
- Changing the goal never rewrites meals that are already logged.
- Coaching thresholds are rough daily bands, not medical advice.
"#;

/// Runtime status of the ScanEat service
#[derive(Debug, Clone, Serialize)]
pub struct ScanEatStatus {
    #[serde(flatten)]
    pub build: BuildInfo,

    /// Session information
    pub goal: Goal,
    pub meals_logged: usize,
    pub has_pending_meal: bool,

    /// Collaborators
    pub classifier_configured: bool,
    pub nutrition_fallback_enabled: bool,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Snapshot of session state passed in by the service
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot {
    pub goal: Goal,
    pub meals_logged: usize,
    pub has_pending_meal: bool,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    classifier_configured: bool,
    nutrition_fallback_enabled: bool,
}

impl StatusTracker {
    pub fn new(classifier_configured: bool, nutrition_fallback_enabled: bool) -> Self {
        Self {
            start_time: Instant::now(),
            classifier_configured,
            nutrition_fallback_enabled,
        }
    }

    /// Get the current status
    pub fn get_status(&self, session: SessionSnapshot) -> ScanEatStatus {
        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ScanEatStatus {
            build: BuildInfo::current(),
            goal: session.goal,
            meals_logged: session.meals_logged,
            has_pending_meal: session.has_pending_meal,
            classifier_configured: self.classifier_configured,
            nutrition_fallback_enabled: self.nutrition_fallback_enabled,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
