//! Daily coaching text
//!
//! Deterministic rules over the absolute totals of one day's meals.

use serde::Serialize;

use super::summary::DailyTotals;
use crate::models::{Goal, MealLogEntry};

pub const NO_MEALS_MESSAGE: &str = "You haven't logged any meals today yet. \
Scan and log your meals to get personalized coaching.";

const LOW_PROTEIN_GRAMS: f64 = 50.0;
const HIGH_PROTEIN_GRAMS: f64 = 120.0;

const CLOSING_TIP: &str = "💡 Tip: Try to spread your calories across the day \
(breakfast, lunch, dinner, 1–2 snacks) instead of having one very heavy meal.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalorieBand {
    Below,
    Within,
    Above,
}

impl CalorieBand {
    /// Position of `calories` relative to the goal's inclusive band
    pub fn classify(calories: u32, goal: Goal) -> Self {
        let (min, max) = goal.calorie_band();
        if calories < min {
            CalorieBand::Below
        } else if calories > max {
            CalorieBand::Above
        } else {
            CalorieBand::Within
        }
    }
}

fn band_message(band: CalorieBand, goal: Goal) -> &'static str {
    match (band, goal) {
        (CalorieBand::Below, Goal::Lose) => {
            "You're **below** the typical calorie range for weight loss. \
             Make sure you're not undereating; add some nutrient-dense foods like dal, paneer, eggs, nuts."
        }
        (CalorieBand::Below, Goal::Gain) => {
            "You're well **below** the calorie range needed for weight gain. \
             Add at least one more solid meal or calorie-dense snacks."
        }
        (CalorieBand::Below, Goal::Maintain) => {
            "You're **under** a typical maintenance range. \
             If you feel low on energy, consider adding an extra balanced meal."
        }
        (CalorieBand::Above, Goal::Lose) => {
            "You're **above** the usual calorie range for weight loss today. \
             Balance it tomorrow with lighter meals and more activity."
        }
        (CalorieBand::Above, Goal::Gain) => {
            "You're on the **higher** side of calories, which can support weight gain, \
             but ensure they come from quality foods, not just junk."
        }
        (CalorieBand::Above, Goal::Maintain) => {
            "You're **above** a typical maintenance range. \
             If days like this are frequent, it may slowly lead to weight gain."
        }
        (CalorieBand::Within, Goal::Lose) => {
            "Nice! Your total calories are within a reasonable range for weight loss today. \
             Keep focusing on protein and fiber to stay full."
        }
        (CalorieBand::Within, Goal::Gain) => {
            "Good! Your total calories are in a decent range for weight gain. \
             Combine this with strength training to gain mostly muscle."
        }
        (CalorieBand::Within, Goal::Maintain) => {
            "You're roughly in a **maintenance** range today. \
             If your weight stays stable over weeks, this is likely your sweet spot."
        }
    }
}

fn protein_message(protein: f64) -> &'static str {
    if protein < LOW_PROTEIN_GRAMS {
        "Protein intake looks on the **lower side**. \
         Try to include more dal, paneer, chana, rajma, eggs or lean meat."
    } else if protein > HIGH_PROTEIN_GRAMS {
        "Protein intake is **quite high**, which is okay if you train regularly, \
         but keep hydration up and balance with veggies."
    } else {
        "Protein intake looks **okay** for a typical day. \
         Good job including some protein sources."
    }
}

/// Carb/fat balance note. The two checks are asymmetric: carb-heavy compares
/// against four times the fat grams, fat-heavy against plain carb grams.
fn macro_balance_message(carbs: f64, fat: f64) -> Option<&'static str> {
    if carbs > fat * 4.0 {
        Some(
            "Your day leaned more towards **carb-heavy** meals. \
             Try adding some healthy fats (nuts, seeds, ghee in moderation) and protein.",
        )
    } else if fat > carbs {
        Some(
            "Your day is a bit **fat-heavy**. \
             Reduce deep-fried and creamy foods and replace them with grilled/steamed options.",
        )
    } else {
        None
    }
}

/// Coaching paragraphs for one day's entries
pub fn advice_paragraphs<'a, I>(entries: I, goal: Goal) -> Vec<String>
where
    I: IntoIterator<Item = &'a MealLogEntry>,
{
    let totals = DailyTotals::from_entries(entries);
    if totals.meal_count == 0 {
        return vec![NO_MEALS_MESSAGE.to_string()];
    }

    let mut paragraphs = vec![
        format!(
            "📊 You logged **{}** meal(s) today with about **{} kcal** in total.",
            totals.meal_count, totals.calories
        ),
        format!(
            "Approx macros: **Protein** {:.0} g, **Carbs** {:.0} g, **Fat** {:.0} g.",
            totals.protein, totals.carbs, totals.fat
        ),
        band_message(CalorieBand::classify(totals.calories, goal), goal).to_string(),
        protein_message(totals.protein).to_string(),
    ];
    if let Some(note) = macro_balance_message(totals.carbs, totals.fat) {
        paragraphs.push(note.to_string());
    }
    paragraphs.push(CLOSING_TIP.to_string());
    paragraphs
}

/// Coaching text for one day's entries, paragraphs separated by a blank line
pub fn advise<'a, I>(entries: I, goal: Goal) -> String
where
    I: IntoIterator<Item = &'a MealLogEntry>,
{
    advice_paragraphs(entries, goal).join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    use crate::models::{CombinedNutrition, MealLogEntryCreate, PortionFactor};

    fn meal(calories: f64, protein: f64, carbs: f64, fat: f64) -> MealLogEntry {
        MealLogEntry::create(MealLogEntryCreate {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            time: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            foods: vec!["thali".to_string()],
            nutrition: CombinedNutrition {
                calories,
                protein,
                carbs,
                fat,
                fiber: 4.0,
            },
            portion: PortionFactor::default(),
            goal: Goal::Maintain,
            thumbnail: None,
        })
    }

    #[test]
    fn test_empty_day() {
        let entries: Vec<MealLogEntry> = Vec::new();
        assert_eq!(advise(&entries, Goal::Lose), NO_MEALS_MESSAGE);
        assert_eq!(advice_paragraphs(&entries, Goal::Gain).len(), 1);
    }

    #[test]
    fn test_lose_below_band() {
        let entries = vec![meal(600.0, 30.0, 70.0, 15.0), meal(400.0, 20.0, 50.0, 10.0)];
        let paragraphs = advice_paragraphs(&entries, Goal::Lose);
        assert_eq!(
            paragraphs[0],
            "📊 You logged **2** meal(s) today with about **1000 kcal** in total."
        );
        assert_eq!(
            paragraphs[1],
            "Approx macros: **Protein** 50 g, **Carbs** 120 g, **Fat** 25 g."
        );
        assert!(paragraphs[2].starts_with("You're **below** the typical calorie range for weight loss."));
        assert!(paragraphs[3].contains("looks **okay**"));
        assert!(paragraphs[4].contains("**carb-heavy**"));
        assert!(paragraphs.last().unwrap().starts_with("💡 Tip:"));
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        assert_eq!(CalorieBand::classify(1400, Goal::Lose), CalorieBand::Within);
        assert_eq!(CalorieBand::classify(1900, Goal::Lose), CalorieBand::Within);
        assert_eq!(CalorieBand::classify(1399, Goal::Lose), CalorieBand::Below);
        assert_eq!(CalorieBand::classify(2801, Goal::Gain), CalorieBand::Above);
        assert_eq!(CalorieBand::classify(2000, Goal::Maintain), CalorieBand::Within);
    }

    #[test]
    fn test_nine_distinct_band_messages() {
        let mut seen = std::collections::HashSet::new();
        for band in [CalorieBand::Below, CalorieBand::Within, CalorieBand::Above] {
            for goal in [Goal::Lose, Goal::Maintain, Goal::Gain] {
                seen.insert(band_message(band, goal));
            }
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_protein_verdicts() {
        assert!(protein_message(49.9).contains("**lower side**"));
        assert!(protein_message(50.0).contains("**okay**"));
        assert!(protein_message(120.0).contains("**okay**"));
        assert!(protein_message(120.1).contains("**quite high**"));
    }

    #[test]
    fn test_carb_fat_asymmetry() {
        // 100 g carbs vs 25 g fat is exactly 4x: not carb-heavy, and not fat-heavy either
        assert_eq!(macro_balance_message(100.0, 25.0), None);
        assert!(macro_balance_message(100.1, 25.0).unwrap().contains("carb-heavy"));
        assert!(macro_balance_message(30.0, 31.0).unwrap().contains("fat-heavy"));
        assert_eq!(macro_balance_message(30.0, 30.0), None);
        assert_eq!(macro_balance_message(0.0, 0.0), None);
    }

    #[test]
    fn test_paragraphs_joined_by_blank_line() {
        let entries = vec![meal(2000.0, 80.0, 200.0, 60.0)];
        let text = advise(&entries, Goal::Maintain);
        assert!(text.contains("\n\nYou're roughly in a **maintenance** range today."));
        assert!(!text.contains("carb-heavy"));
        assert!(!text.contains("fat-heavy"));
    }
}
