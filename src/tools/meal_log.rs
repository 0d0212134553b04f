//! Goal and meal log tools

use std::path::Path;

use base64::{engine::general_purpose, Engine};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::insights::{daily_totals, DailyTotals};
use crate::models::{Goal, MealLogEntry, MealLogEntryCreate, PortionFactor};
use crate::nutrition::{aggregate_plate, normalize_name, NutritionResolver, PlateAggregate};
use crate::session::Session;

pub const RECENT_MEALS_LIMIT: usize = 5;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub goal: Goal,
    pub previous_goal: Option<Goal>,
    pub calorie_band: (u32, u32),
}

#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    pub success: bool,
    pub entry: MealLogEntry,
    pub missing: Vec<String>,
    pub meals_today: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TodayLogResponse {
    pub date: NaiveDate,
    pub goal: Goal,
    pub totals: DailyTotals,
    /// Most recent first
    pub recent_meals: Vec<MealLogEntry>,
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub count: usize,
    pub entries: Vec<MealLogEntry>,
}

/// Photo of a logged meal, for display next to the entry
#[derive(Debug)]
pub struct MealThumbnail {
    pub caption: String,
    pub png_base64: String,
}

#[derive(Debug, Serialize)]
pub struct ExportCsvResponse {
    pub rows: usize,
    pub file_path: Option<String>,
    pub csv: String,
}

// ============================================================================
// Helpers
// ============================================================================

/// Parse an optional YYYY-MM-DD date, defaulting to `today`
pub fn parse_date_or(date: Option<&str>, today: NaiveDate) -> Result<NaiveDate, String> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(today),
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD", d)),
    }
}

// ============================================================================
// Tool Functions
// ============================================================================

pub fn set_goal(session: &mut Session, goal: &str) -> Result<GoalResponse, String> {
    let goal: Goal = goal.parse().map_err(|e| format!("{}", e))?;
    let previous = session.set_goal(goal);
    Ok(GoalResponse {
        goal,
        previous_goal: Some(previous),
        calorie_band: goal.calorie_band(),
    })
}

pub fn get_goal(session: &Session) -> GoalResponse {
    let goal = session.goal();
    GoalResponse {
        goal,
        previous_goal: None,
        calorie_band: goal.calorie_band(),
    }
}

pub fn log_scanned_meal(session: &mut Session, now: NaiveDateTime) -> Result<LogMealResponse, String> {
    let entry = session
        .log_pending_meal(now.date(), now.time())
        .cloned()
        .ok_or("No scanned meal to log. Analyze a food image first (each scan can be logged once).")?;
    Ok(logged_response(session, entry, Vec::new()))
}

/// Resolve and aggregate a hand-entered plate. May block on the nutrition lookup.
pub fn prepare_meal(
    resolver: &NutritionResolver,
    foods: &[String],
    portion: f64,
) -> Result<(Vec<String>, PlateAggregate), String> {
    let portion = PortionFactor::new(portion).map_err(|e| e.to_string())?;
    let foods: Vec<String> = foods
        .iter()
        .filter(|f| !normalize_name(f).is_empty())
        .map(|f| f.trim().to_string())
        .collect();
    if foods.is_empty() {
        return Err("At least one food is required".to_string());
    }

    let plate = aggregate_plate(resolver, &foods, portion);
    if !plate.has_data() {
        return Err(format!(
            "No nutrition data found for: {}. Nothing was logged.",
            plate.missing.join(", ")
        ));
    }
    Ok((foods, plate))
}

/// Append a prepared plate to the log under the current goal
pub fn record_meal(
    session: &mut Session,
    foods: Vec<String>,
    plate: PlateAggregate,
    now: NaiveDateTime,
) -> LogMealResponse {
    let entry = MealLogEntry::create(MealLogEntryCreate {
        date: now.date(),
        time: now.time(),
        foods,
        nutrition: plate.totals,
        portion: plate.portion,
        goal: session.goal(),
        thumbnail: None,
    });
    let entry = session.append(entry).clone();
    logged_response(session, entry, plate.missing)
}

fn logged_response(session: &Session, entry: MealLogEntry, missing: Vec<String>) -> LogMealResponse {
    let meals_today = session.log().entries_on(entry.date).len();
    let message = format!(
        "Logged {} ({} kcal) at {}",
        entry.foods_label(),
        entry.calories,
        entry.time_label()
    );
    LogMealResponse {
        success: true,
        entry,
        missing,
        meals_today,
        message,
    }
}

pub fn get_today_log(session: &Session, today: NaiveDate) -> TodayLogResponse {
    let log = session.log();
    TodayLogResponse {
        date: today,
        goal: session.goal(),
        totals: daily_totals(log, today),
        recent_meals: log
            .recent_on(today, RECENT_MEALS_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    }
}

/// Every entry of one day, oldest first
pub fn get_history(session: &Session, day: NaiveDate) -> EntriesResponse {
    let entries: Vec<MealLogEntry> = session.log().entries_on(day).into_iter().cloned().collect();
    EntriesResponse {
        start: Some(day),
        end: Some(day),
        count: entries.len(),
        entries,
    }
}

/// Thumbnails of the scanned meals logged on `day`, oldest first.
/// Meals logged without a photo are skipped.
pub fn meal_thumbnails(session: &Session, day: NaiveDate) -> Vec<MealThumbnail> {
    session
        .log()
        .entries_on(day)
        .into_iter()
        .filter_map(|entry| {
            let thumbnail = entry.thumbnail.as_ref()?;
            Some(MealThumbnail {
                caption: format!("{} {} ({} kcal)", entry.time_label(), entry.foods_label(), entry.calories),
                png_base64: general_purpose::STANDARD.encode(thumbnail.as_bytes()),
            })
        })
        .collect()
}

pub fn list_entries_between(session: &Session, start: NaiveDate, end: NaiveDate) -> Result<EntriesResponse, String> {
    if start > end {
        return Err(format!("Start date {} is after end date {}", start, end));
    }
    let entries: Vec<MealLogEntry> = session
        .log()
        .entries_between(start, end)
        .into_iter()
        .cloned()
        .collect();
    Ok(EntriesResponse {
        start: Some(start),
        end: Some(end),
        count: entries.len(),
        entries,
    })
}

pub fn export_log_csv(session: &Session, file_path: Option<&str>) -> Result<ExportCsvResponse, String> {
    let log = session.log();
    let csv = log.to_csv().map_err(|e| format!("Failed to build CSV: {}", e))?;
    if let Some(path) = file_path {
        log.export_csv(Path::new(path))
            .map_err(|e| format!("Failed to write CSV to '{}': {}", path, e))?;
    }
    Ok(ExportCsvResponse {
        rows: log.len(),
        file_path: file_path.map(str::to_string),
        csv,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    use crate::models::CombinedNutrition;
    use crate::scan::PendingMeal;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
    }

    fn foods(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn log(session: &mut Session, items: &[&str], portion: f64, when: NaiveDateTime) -> LogMealResponse {
        let (foods, plate) = prepare_meal(&NutritionResolver::curated_only(), &foods(items), portion).unwrap();
        record_meal(session, foods, plate, when)
    }

    #[test]
    fn test_parse_date_or() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_date_or(None, today).unwrap(), today);
        assert_eq!(parse_date_or(Some(" "), today).unwrap(), today);
        assert_eq!(
            parse_date_or(Some("2025-01-02"), today).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
        );
        assert!(parse_date_or(Some("14/03/2025"), today).is_err());
    }

    #[test]
    fn test_set_and_get_goal() {
        let mut session = Session::new();
        let response = set_goal(&mut session, "Lose Weight").unwrap();
        assert_eq!(response.goal, Goal::Lose);
        assert_eq!(response.previous_goal, Some(Goal::Maintain));
        assert_eq!(get_goal(&session).calorie_band, (1400, 1900));
        assert!(set_goal(&mut session, "bulk").is_err());
        assert_eq!(session.goal(), Goal::Lose);
    }

    #[test]
    fn test_log_meal_rounds_and_reports_missing() {
        let mut session = Session::new();
        let response = log(&mut session, &["Pizza", "sushi", "salad"], 0.75, at(14, 13, 5));
        assert_eq!(response.entry.calories, 274);
        assert_eq!(response.entry.protein, 10.5);
        assert_eq!(response.entry.foods, foods(&["Pizza", "sushi", "salad"]));
        assert_eq!(response.missing, foods(&["sushi"]));
        assert_eq!(response.meals_today, 1);
        assert_eq!(response.message, "Logged Pizza, sushi, salad (274 kcal) at 13:05");
    }

    #[test]
    fn test_log_meal_rejects_unusable_input() {
        let resolver = NutritionResolver::curated_only();
        assert!(prepare_meal(&resolver, &foods(&["sushi"]), 1.0).is_err());
        assert!(prepare_meal(&resolver, &foods(&[" "]), 1.0).is_err());
        assert!(prepare_meal(&resolver, &foods(&["rice"]), 3.0).is_err());
    }

    #[test]
    fn test_log_scanned_meal() {
        let mut session = Session::new();
        assert!(log_scanned_meal(&mut session, at(14, 9, 0)).is_err());

        session.set_pending_meal(Some(PendingMeal {
            foods: foods(&["dosa"]),
            nutrition: CombinedNutrition {
                calories: 168.0,
                protein: 4.0,
                carbs: 27.0,
                fat: 4.5,
                fiber: 1.5,
            },
            portion: PortionFactor::default(),
            goal: Goal::Maintain,
            thumbnail: None,
        }));
        let response = log_scanned_meal(&mut session, at(14, 9, 0)).unwrap();
        assert_eq!(response.entry.calories, 168);
        assert!(log_scanned_meal(&mut session, at(14, 9, 1)).is_err());
    }

    #[test]
    fn test_today_history_and_range() {
        let mut session = Session::new();
        for (day, hour) in [(12, 8), (13, 8), (14, 8), (14, 12), (14, 19), (14, 21), (14, 22), (14, 23)] {
            log(&mut session, &["roti"], 1.0, at(day, hour, 0));
        }
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

        let today_log = get_today_log(&session, today);
        assert_eq!(today_log.totals.meal_count, 6);
        assert_eq!(today_log.totals.calories, 660);
        assert_eq!(today_log.recent_meals.len(), 5);
        assert_eq!(today_log.recent_meals[0].time_label(), "23:00");

        assert_eq!(get_history(&session, today).count, 6);

        let range = list_entries_between(
            &session,
            NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 13).unwrap(),
        )
        .unwrap();
        assert_eq!(range.count, 2);
        assert!(list_entries_between(&session, today, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()).is_err());
    }

    #[test]
    fn test_export_log_csv() {
        let mut session = Session::new();
        log(&mut session, &["idli"], 1.0, at(14, 8, 30));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let response = export_log_csv(&session, path.to_str()).unwrap();

        assert_eq!(response.rows, 1);
        assert!(response.csv.contains("2025-03-14,08:30,idli,60,2.0,12.0,0.4,0.6,1.0,maintain"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), response.csv);
    }

    #[test]
    fn test_scanned_meal_thumbnail_reads_back() {
        use std::sync::Arc;

        use crate::clients::testing::StubClassifier;
        use crate::intake::tests::sample_png;
        use crate::intake::THUMBNAIL_MAX_SIDE;
        use crate::scan::{ScanRequest, Scanner};

        let scanner = Scanner::new(
            Arc::new(StubClassifier::returning(&[("dosa", 0.9)])),
            NutritionResolver::curated_only(),
        );
        let mut report = scanner.analyze(&sample_png(16, 8), ScanRequest::default()).unwrap();

        let mut session = Session::new();
        session.set_pending_meal(report.pending.take());
        log_scanned_meal(&mut session, at(14, 8, 0)).unwrap();
        log(&mut session, &["idli"], 1.0, at(14, 9, 0));

        let thumbnails = meal_thumbnails(&session, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(thumbnails.len(), 1);
        assert_eq!(thumbnails[0].caption, "08:00 dosa (168 kcal)");

        let png = general_purpose::STANDARD.decode(&thumbnails[0].png_base64).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert!(decoded.width() <= THUMBNAIL_MAX_SIDE && decoded.height() <= THUMBNAIL_MAX_SIDE);

        assert!(meal_thumbnails(&session, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()).is_empty());
    }
}
