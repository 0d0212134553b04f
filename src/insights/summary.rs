//! Daily and weekly reductions over the meal log

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::meal_log::MealLogStore;
use crate::models::{round_one_decimal, MealLogEntry};
use crate::nutrition::normalize_name;

pub const WEEK_DAYS: u64 = 7;
pub const TOP_FOODS_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyTotals {
    pub meal_count: usize,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl DailyTotals {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a MealLogEntry>,
    {
        let mut totals = Self::default();
        for entry in entries {
            totals.meal_count += 1;
            totals.calories = totals.calories.saturating_add(entry.calories);
            totals.protein += entry.protein;
            totals.carbs += entry.carbs;
            totals.fat += entry.fat;
            totals.fiber += entry.fiber;
        }
        totals.protein = round_one_decimal(totals.protein);
        totals.carbs = round_one_decimal(totals.carbs);
        totals.fat = round_one_decimal(totals.fat);
        totals.fiber = round_one_decimal(totals.fiber);
        totals
    }
}

/// Totals for every entry logged on `day`
pub fn daily_totals(store: &MealLogStore, day: NaiveDate) -> DailyTotals {
    DailyTotals::from_entries(store.entries_on(day))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayCalories {
    pub date: NaiveDate,
    pub calories: u32,
}

/// First day of the 7-day window ending on `end_day`
pub fn week_start(end_day: NaiveDate) -> NaiveDate {
    end_day
        .checked_sub_days(Days::new(WEEK_DAYS - 1))
        .unwrap_or(NaiveDate::MIN)
}

/// Calories for each of the 7 days ending on `end_day`, oldest first, zero-filled
pub fn weekly_series(store: &MealLogStore, end_day: NaiveDate) -> Vec<DayCalories> {
    week_start(end_day)
        .iter_days()
        .take(WEEK_DAYS as usize)
        .map(|date| DayCalories {
            date,
            calories: store
                .entries_on(date)
                .iter()
                .fold(0u32, |sum, e| sum.saturating_add(e.calories)),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodCount {
    pub name: String,
    pub count: usize,
}

/// Food occurrence counts, most frequent first.
///
/// Names are grouped by their normalized form and reported with the first
/// spelling seen. Ties keep first-encountered order.
pub fn top_foods<'a, I>(entries: I, limit: usize) -> Vec<FoodCount>
where
    I: IntoIterator<Item = &'a MealLogEntry>,
{
    let mut counts: Vec<(String, FoodCount)> = Vec::new();
    for food in entries.into_iter().flat_map(|e| e.foods.iter()) {
        let key = normalize_name(food);
        if key.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => existing.count += 1,
            None => counts.push((
                key,
                FoodCount {
                    name: food.trim().to_string(),
                    count: 1,
                },
            )),
        }
    }
    // stable sort keeps first-encountered order among equal counts
    counts.sort_by(|a, b| b.1.count.cmp(&a.1.count));
    counts.into_iter().take(limit).map(|(_, fc)| fc).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklySummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub series: Vec<DayCalories>,
    pub total_calories: u32,
    pub average_per_day: f64,
    pub top_foods: Vec<FoodCount>,
    pub has_entries: bool,
}

pub fn weekly_summary(store: &MealLogStore, end_day: NaiveDate) -> WeeklySummary {
    let start = week_start(end_day);
    let series = weekly_series(store, end_day);
    let window = store.entries_between(start, end_day);
    let total_calories = series.iter().fold(0u32, |sum, d| sum.saturating_add(d.calories));

    WeeklySummary {
        start,
        end: end_day,
        total_calories,
        average_per_day: round_one_decimal(f64::from(total_calories) / WEEK_DAYS as f64),
        top_foods: top_foods(window.iter().copied(), TOP_FOODS_LIMIT),
        has_entries: !window.is_empty(),
        series,
    }
}
