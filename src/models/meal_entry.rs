//! Meal log entry model
//!
//! A logged plate. Entries are immutable once created.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use super::{round_one_decimal, CombinedNutrition, Goal, PortionFactor};

/// Opaque display-only image handle (PNG bytes)
#[derive(Clone, PartialEq)]
pub struct Thumbnail(Vec<u8>);

impl Thumbnail {
    pub fn from_png(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Thumbnail({} bytes)", self.0.len())
    }
}

/// A logged meal
#[derive(Debug, Clone, Serialize)]
pub struct MealLogEntry {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_hour_minute")]
    pub time: NaiveTime,
    pub foods: Vec<String>,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub portion: PortionFactor,
    pub goal: Goal,
    #[serde(skip)]
    pub thumbnail: Option<Thumbnail>,
}

/// Data for creating a meal log entry
#[derive(Debug, Clone)]
pub struct MealLogEntryCreate {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub foods: Vec<String>,
    /// Already portion-scaled totals
    pub nutrition: CombinedNutrition,
    pub portion: PortionFactor,
    pub goal: Goal,
    pub thumbnail: Option<Thumbnail>,
}

impl MealLogEntry {
    /// Create an entry, rounding calories to an integer and macros to one decimal
    pub fn create(data: MealLogEntryCreate) -> Self {
        let calories = data.nutrition.calories.round().max(0.0) as u32;
        Self {
            date: data.date,
            time: truncate_to_minute(data.time),
            foods: data.foods,
            calories,
            protein: round_one_decimal(data.nutrition.protein),
            carbs: round_one_decimal(data.nutrition.carbs),
            fat: round_one_decimal(data.nutrition.fat),
            fiber: round_one_decimal(data.nutrition.fiber),
            portion: data.portion,
            goal: data.goal,
            thumbnail: data.thumbnail,
        }
    }

    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Foods joined for display and CSV ("pizza, salad")
    pub fn foods_label(&self) -> String {
        self.foods.join(", ")
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

fn serialize_hour_minute<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%H:%M"))
}
