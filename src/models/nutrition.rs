//! Shared nutrition data structures
//!
//! `NutritionRecord` is what a lookup resolves for one food item;
//! `CombinedNutrition` is the running f64 total used while aggregating plates.

use serde::{Deserialize, Serialize};

/// A named micronutrient with its display amount (e.g. "Vit A" -> "10%")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientAmount {
    pub name: String,
    pub amount: String,
}

impl NutrientAmount {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }
}

/// Per-serving nutrition for one named food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub calories: u32,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
    pub fiber: f64,   // grams
    #[serde(default)]
    pub vitamins: Vec<NutrientAmount>,
    #[serde(default)]
    pub minerals: Vec<NutrientAmount>,
}

impl NutritionRecord {
    /// Build a record with no micronutrient data.
    ///
    /// Negative or non-finite gram values are clamped to zero.
    pub fn new(calories: u32, protein: f64, carbs: f64, fat: f64, fiber: f64) -> Self {
        Self {
            calories,
            protein: non_negative(protein),
            carbs: non_negative(carbs),
            fat: non_negative(fat),
            fiber: non_negative(fiber),
            vitamins: Vec::new(),
            minerals: Vec::new(),
        }
    }

    pub fn with_vitamins(mut self, vitamins: Vec<NutrientAmount>) -> Self {
        self.vitamins = vitamins;
        self
    }

    pub fn with_minerals(mut self, minerals: Vec<NutrientAmount>) -> Self {
        self.minerals = minerals;
        self
    }

    /// The macro fields as an aggregatable total
    pub fn totals(&self) -> CombinedNutrition {
        CombinedNutrition {
            calories: f64::from(self.calories),
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Summed (and possibly portion-scaled) macro totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedNutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl CombinedNutrition {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale every field by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
            fiber: self.fiber * multiplier,
        }
    }

    pub fn add(&self, other: &CombinedNutrition) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            fiber: self.fiber + other.fiber,
        }
    }

    /// Zero calories means "no usable data", never "food has zero calories"
    pub fn has_data(&self) -> bool {
        self.calories > 0.0
    }
}

impl std::ops::Add for CombinedNutrition {
    type Output = CombinedNutrition;

    fn add(self, other: CombinedNutrition) -> CombinedNutrition {
        CombinedNutrition::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for CombinedNutrition {
    type Output = CombinedNutrition;

    fn mul(self, multiplier: f64) -> CombinedNutrition {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for CombinedNutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CombinedNutrition::zero(), |acc, n| acc + n)
    }
}

/// Round to one decimal place, the precision macros are logged with
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_clamps_negative_grams() {
        let record = NutritionRecord::new(100, -1.0, f64::NAN, 2.5, 0.0);
        assert_eq!(record.protein, 0.0);
        assert_eq!(record.carbs, 0.0);
        assert_eq!(record.fat, 2.5);
    }

    #[test]
    fn test_sum_and_scale() {
        let a = NutritionRecord::new(285, 12.0, 36.0, 10.0, 2.0).totals();
        let b = NutritionRecord::new(80, 2.0, 12.0, 3.0, 3.0).totals();
        let total: CombinedNutrition = vec![a, b].into_iter().sum();
        let half = total * 0.5;
        assert_eq!(half.calories, 182.5);
        assert_eq!(half.protein, 7.0);
        assert_eq!(half.carbs, 24.0);
        assert_eq!(half.fat, 6.5);
        assert_eq!(half.fiber, 2.5);
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(3.04), 3.0);
        assert_eq!(round_one_decimal(3.06), 3.1);
        assert_eq!(round_one_decimal(12.0), 12.0);
    }

    #[test]
    fn test_has_data() {
        assert!(!CombinedNutrition::zero().has_data());
        assert!(NutritionRecord::new(1, 0.0, 0.0, 0.0, 0.0).totals().has_data());
    }
}
