//! Per-food advice and healthier alternatives

use crate::models::{Goal, NutritionRecord};
use crate::nutrition::{match_name, normalize_name};

struct Alternatives {
    food: &'static str,
    suggestions: [&'static str; 3],
}

static ALTERNATIVES: [Alternatives; 9] = [
    Alternatives {
        food: "pizza",
        suggestions: [
            "Thin-crust veggie pizza with less cheese.",
            "Whole-wheat base pizza with extra veggies.",
            "Grilled paneer wrap instead of heavy cheese pizza.",
        ],
    },
    Alternatives {
        food: "burger",
        suggestions: [
            "Grilled paneer or chicken burger without mayo.",
            "Whole-wheat bun with extra salad and less cheese.",
            "Veggie burger with baked patty instead of fried.",
        ],
    },
    Alternatives {
        food: "biryani",
        suggestions: [
            "Veg pulao with less oil and more vegetables.",
            "Grilled chicken + rice instead of oily biryani.",
            "Brown rice biryani with less ghee.",
        ],
    },
    Alternatives {
        food: "paneer butter masala",
        suggestions: [
            "Paneer tikka (grilled) instead of heavy gravy.",
            "Paneer curry with less cream and oil.",
            "Dal + sabzi + roti instead of rich gravy.",
        ],
    },
    Alternatives {
        food: "idli",
        suggestions: [
            "Plain idli with sambar and less chutney.",
            "Rava idli with less oil.",
            "Steamed dhokla as another light option.",
        ],
    },
    Alternatives {
        food: "dosa",
        suggestions: [
            "Plain dosa with less oil instead of masala dosa.",
            "Ragi dosa for more fiber.",
            "Utthapam loaded with veggies.",
        ],
    },
    Alternatives {
        food: "salad",
        suggestions: [
            "Add protein like boiled egg / paneer / chana.",
            "Use olive oil + lemon instead of creamy dressing.",
            "Mix fruits + veggies for micronutrients.",
        ],
    },
    Alternatives {
        food: "rice",
        suggestions: [
            "Switch to brown rice sometimes for more fiber.",
            "Mix rice with dal and veggies for better balance.",
            "Control portion size and add salad on the side.",
        ],
    },
    Alternatives {
        food: "roti",
        suggestions: [
            "Use multi-grain atta instead of maida.",
            "Use ghee in small quantity if needed.",
            "Pair 2 rotis with sabzi + dal instead of many rotis alone.",
        ],
    },
];

const GENERIC_ALTERNATIVES: [&str; 3] = [
    "Reduce portion size slightly and add more salad or vegetables.",
    "Avoid sugary drinks with this meal; choose water, buttermilk, or lemon water.",
    "Replace deep-fried sides with grilled, steamed, or roasted options.",
];

const HEAVY_KEYWORDS: [&str; 3] = ["biryani", "butter", "fried"];
const LIGHT_KEYWORDS: [&str; 3] = ["salad", "idli", "dosa"];

/// Advice for one food item, in a fixed order and never deduplicated
pub fn recommend(food: &str, nutrition: &NutritionRecord, goal: Goal) -> Vec<String> {
    let mut recs: Vec<String> = Vec::new();
    let NutritionRecord {
        calories,
        protein,
        carbs,
        fat,
        fiber,
        ..
    } = *nutrition;

    match goal {
        Goal::Lose => {
            if calories > 600 {
                recs.push(format!(
                    "This looks like a high-calorie meal (~{} kcal). \
                     For weight loss, reduce portion size, share it, or balance with very light meals.",
                    calories
                ));
            } else {
                recs.push(format!(
                    "At around {} kcal, this can fit a weight loss plan \
                     if your daily calories remain in deficit.",
                    calories
                ));
            }
            if fat > 20.0 {
                recs.push(
                    "Fat is on the higher side. Avoid adding extra ghee, butter, or fried sides."
                        .to_string(),
                );
            }
            if fiber < 3.0 {
                recs.push(
                    "Fiber is low. Add salad, fruits, or vegetables with this meal to stay full longer."
                        .to_string(),
                );
            }
        }
        Goal::Gain => {
            if calories < 400 {
                recs.push(format!(
                    "This meal has only ~{} kcal. For healthy weight gain, \
                     consider adding an extra roti, rice, or a protein-rich side.",
                    calories
                ));
            } else {
                recs.push(format!(
                    "With ~{} kcal, this supports a calorie surplus if combined with your other meals.",
                    calories
                ));
            }
            if protein < 15.0 {
                recs.push(
                    "Protein is on the lower side. For muscle gain, add paneer, lentils, eggs, or whey."
                        .to_string(),
                );
            }
        }
        Goal::Maintain => {
            recs.push(format!(
                "With ~{} kcal, this can fit into a balanced diet \
                 if your overall daily intake is around your maintenance level.",
                calories
            ));
            if fat > 25.0 {
                recs.push(
                    "Fat is slightly high. Reduce cream-based gravies or deep-fried items.".to_string(),
                );
            }
            if carbs > 50.0 {
                recs.push(
                    "Carbs are high. Balance with more protein and fiber in other meals.".to_string(),
                );
            }
        }
    }

    if protein < 10.0 {
        recs.push(
            "Add a protein-rich side (dal, paneer, chana, rajma, eggs) to make this meal \
             more filling and muscle-friendly."
                .to_string(),
        );
    }
    if fiber < 2.0 {
        recs.push(
            "Very low fiber. Add salad, fruits, or whole grains for better digestion and satiety."
                .to_string(),
        );
    }

    let key = normalize_name(food);
    if HEAVY_KEYWORDS.iter().any(|k| key.contains(k)) {
        recs.push(
            "Try to avoid very heavy, oily foods late at night. \
             If you eat this for dinner, keep the portion small."
                .to_string(),
        );
    }
    if LIGHT_KEYWORDS.iter().any(|k| key.contains(k)) {
        recs.push(
            "This can be a good choice for breakfast or dinner when paired with some protein."
                .to_string(),
        );
    }

    recs
}

/// Three healthier swaps for a food, or generic swaps when it's unknown
pub fn alternatives(food: &str) -> Vec<String> {
    let suggestions = match_name(food, &ALTERNATIVES, |alt| alt.food)
        .map(|alt| alt.suggestions)
        .unwrap_or(GENERIC_ALTERNATIVES);
    suggestions.iter().map(|s| s.to_string()).collect()
}
