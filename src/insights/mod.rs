//! Insights derived from the meal log: summaries, coaching, per-food advice
//! and the weekly chart.

pub mod chart;
pub mod coach;
pub mod recommendations;
pub mod summary;

pub use chart::{render_weekly_chart, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, MAX_CHART_SIDE};
pub use coach::{advice_paragraphs, advise, CalorieBand, NO_MEALS_MESSAGE};
pub use recommendations::{alternatives, recommend};
pub use summary::{
    daily_totals, top_foods, week_start, weekly_series, weekly_summary, DailyTotals, DayCalories,
    FoodCount, WeeklySummary,
};
