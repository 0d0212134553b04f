//! Data models
//!
//! Plain value types shared by the nutrition core, the meal log and the tools.

mod goal;
mod meal_entry;
mod nutrition;

pub use goal::{Goal, PortionFactor, ValidationError};
pub use meal_entry::{MealLogEntry, MealLogEntryCreate, Thumbnail};
pub use nutrition::{round_one_decimal, CombinedNutrition, NutrientAmount, NutritionRecord};
