//! Weekly summary, chart and coaching tools

use base64::{engine::general_purpose, Engine};
use chrono::NaiveDate;
use serde::Serialize;

use crate::insights::{
    advice_paragraphs, daily_totals, render_weekly_chart, weekly_summary, CalorieBand, DailyTotals,
    WeeklySummary, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH,
};
use crate::models::Goal;
use crate::session::Session;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct WeeklySummaryResponse {
    #[serde(flatten)]
    pub summary: WeeklySummary,
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct WeeklyChart {
    pub summary: WeeklySummary,
    /// Base64 PNG
    pub png_base64: String,
}

#[derive(Debug, Serialize)]
pub struct CoachingResponse {
    pub date: NaiveDate,
    pub goal: Goal,
    pub calorie_band: (u32, u32),
    /// None when nothing was logged
    pub position: Option<CalorieBand>,
    pub totals: DailyTotals,
    pub paragraphs: Vec<String>,
    pub advice: String,
}

// ============================================================================
// Tool Functions
// ============================================================================

pub fn get_weekly_summary(session: &Session, end_day: NaiveDate) -> WeeklySummaryResponse {
    let summary = weekly_summary(session.log(), end_day);
    let message = if summary.has_entries {
        None
    } else {
        Some(format!(
            "No meals logged between {} and {}.",
            summary.start, summary.end
        ))
    };
    WeeklySummaryResponse { summary, message }
}

/// Render a weekly summary as a PNG bar chart. CPU bound; callers run it
/// off the async executor.
pub fn render_chart(
    summary: WeeklySummary,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<WeeklyChart, String> {
    let width = width.unwrap_or(DEFAULT_CHART_WIDTH);
    let height = height.unwrap_or(DEFAULT_CHART_HEIGHT);
    let png = render_weekly_chart(&summary.series, width, height)
        .map_err(|e| format!("Failed to render chart: {}", e))?;

    Ok(WeeklyChart {
        summary,
        png_base64: general_purpose::STANDARD.encode(png),
    })
}

pub fn get_coaching(session: &Session, day: NaiveDate) -> CoachingResponse {
    let goal = session.goal();
    let entries = session.log().entries_on(day);
    let totals = daily_totals(session.log(), day);
    let paragraphs = advice_paragraphs(entries.iter().copied(), goal);

    CoachingResponse {
        date: day,
        goal,
        calorie_band: goal.calorie_band(),
        position: (totals.meal_count > 0).then(|| CalorieBand::classify(totals.calories, goal)),
        totals,
        advice: paragraphs.join("\n\n"),
        paragraphs,
    }
}
