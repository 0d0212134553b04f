//! Curated per-serving nutrition table
//!
//! Curated values always win over the remote fallback. Declaration order is
//! the substring-match order.

use crate::models::{NutrientAmount, NutritionRecord};

#[derive(Debug, Clone, Copy)]
pub struct CuratedFood {
    pub name: &'static str,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub vitamins: [(&'static str, &'static str); 3],
    pub minerals: [(&'static str, &'static str); 3],
}

impl CuratedFood {
    pub fn to_record(&self) -> NutritionRecord {
        let amounts = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(name, amount)| NutrientAmount::new(*name, *amount))
                .collect::<Vec<_>>()
        };
        NutritionRecord::new(self.calories, self.protein, self.carbs, self.fat, self.fiber)
            .with_vitamins(amounts(&self.vitamins[..]))
            .with_minerals(amounts(&self.minerals[..]))
    }
}

pub static CURATED_FOODS: [CuratedFood; 9] = [
    CuratedFood {
        name: "pizza",
        calories: 285,
        protein: 12.0,
        carbs: 36.0,
        fat: 10.0,
        fiber: 2.0,
        vitamins: [("Vit A", "10%"), ("Vit C", "0%"), ("Vit B12", "15%")],
        minerals: [("Calcium", "18%"), ("Iron", "10%"), ("Sodium", "25%")],
    },
    CuratedFood {
        name: "burger",
        calories: 295,
        protein: 17.0,
        carbs: 30.0,
        fat: 13.0,
        fiber: 1.0,
        vitamins: [("Vit B12", "30%"), ("Vit B6", "20%"), ("Vit A", "6%")],
        minerals: [("Iron", "20%"), ("Zinc", "15%"), ("Sodium", "23%")],
    },
    CuratedFood {
        name: "idli",
        calories: 60,
        protein: 2.0,
        carbs: 12.0,
        fat: 0.4,
        fiber: 0.6,
        vitamins: [("Vit B1", "5%"), ("Vit B2", "4%"), ("Folate", "6%")],
        minerals: [("Iron", "2%"), ("Calcium", "2%"), ("Potassium", "2%")],
    },
    CuratedFood {
        name: "dosa",
        calories: 168,
        protein: 4.0,
        carbs: 27.0,
        fat: 4.5,
        fiber: 1.5,
        vitamins: [("Vit B1", "5%"), ("Vit B2", "5%"), ("Folate", "6%")],
        minerals: [("Iron", "5%"), ("Calcium", "3%"), ("Sodium", "4%")],
    },
    CuratedFood {
        name: "biryani",
        calories: 350,
        protein: 12.0,
        carbs: 45.0,
        fat: 12.0,
        fiber: 2.5,
        vitamins: [("Vit A", "5%"), ("Vit B12", "10%"), ("Vit C", "4%")],
        minerals: [("Iron", "10%"), ("Sodium", "18%"), ("Potassium", "8%")],
    },
    CuratedFood {
        name: "paneer butter masala",
        calories: 400,
        protein: 15.0,
        carbs: 20.0,
        fat: 28.0,
        fiber: 2.0,
        vitamins: [("Vit A", "15%"), ("Vit B12", "20%"), ("Vit D", "10%")],
        minerals: [("Calcium", "25%"), ("Iron", "6%"), ("Sodium", "12%")],
    },
    CuratedFood {
        name: "salad",
        calories: 80,
        protein: 2.0,
        carbs: 12.0,
        fat: 3.0,
        fiber: 3.0,
        vitamins: [("Vit A", "60%"), ("Vit C", "40%"), ("Vit K", "70%")],
        minerals: [("Potassium", "8%"), ("Calcium", "4%"), ("Iron", "6%")],
    },
    CuratedFood {
        name: "rice",
        calories: 200,
        protein: 4.0,
        carbs: 44.0,
        fat: 0.4,
        fiber: 0.6,
        vitamins: [("Vit B1", "12%"), ("Vit B3", "15%"), ("Folate", "8%")],
        minerals: [("Iron", "2%"), ("Magnesium", "5%"), ("Selenium", "15%")],
    },
    CuratedFood {
        name: "roti",
        calories: 110,
        protein: 3.0,
        carbs: 20.0,
        fat: 2.0,
        fiber: 2.0,
        vitamins: [("Vit B1", "5%"), ("Vit B3", "6%"), ("Folate", "4%")],
        minerals: [("Iron", "4%"), ("Magnesium", "6%"), ("Potassium", "2%")],
    },
];

/// Curated entry for a name, using exact-then-substring matching
pub fn find_curated(name: &str) -> Option<&'static CuratedFood> {
    super::names::match_name(name, &CURATED_FOODS, |food| food.name)
}
