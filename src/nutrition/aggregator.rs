//! Plate aggregation
//!
//! Sums the nutrition of every resolvable item on a plate and scales the
//! total by the portion factor.

use std::collections::HashMap;

use serde::Serialize;

use super::resolver::NutritionResolver;
use crate::models::{CombinedNutrition, NutritionRecord, PortionFactor};

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedItem {
    pub name: String,
    pub record: NutritionRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlateAggregate {
    /// Portion-scaled totals over resolved items
    pub totals: CombinedNutrition,
    pub portion: PortionFactor,
    pub resolved: Vec<ResolvedItem>,
    /// Unresolved names, deduplicated in first-seen order
    pub missing: Vec<String>,
}

impl PlateAggregate {
    /// Zero calories means nothing on the plate was usable
    pub fn has_data(&self) -> bool {
        self.totals.has_data()
    }
}

/// Aggregate a plate selection. Duplicate items count once per occurrence.
pub fn aggregate_plate(
    resolver: &NutritionResolver,
    items: &[String],
    portion: PortionFactor,
) -> PlateAggregate {
    let mut cache: HashMap<&str, Option<NutritionRecord>> = HashMap::new();
    let mut resolved = Vec::new();
    let mut missing: Vec<String> = Vec::new();

    for item in items {
        let record = cache
            .entry(item.as_str())
            .or_insert_with(|| resolver.resolve(item))
            .clone();

        match record {
            Some(record) => resolved.push(ResolvedItem {
                name: item.clone(),
                record,
            }),
            None => {
                if !missing.contains(item) {
                    missing.push(item.clone());
                }
            }
        }
    }

    let totals: CombinedNutrition = resolved.iter().map(|r| r.record.totals()).sum();

    PlateAggregate {
        totals: totals.scale(portion.value()),
        portion,
        resolved,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::clients::testing::StubLookup;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sums_and_scales() {
        let resolver = NutritionResolver::curated_only();
        let plate = aggregate_plate(
            &resolver,
            &names(&["pizza", "salad"]),
            PortionFactor::new(0.5).unwrap(),
        );
        assert!(plate.has_data());
        assert!(close(plate.totals.calories, 182.5));
        assert!(close(plate.totals.protein, 7.0));
        assert!(close(plate.totals.carbs, 24.0));
        assert!(close(plate.totals.fat, 6.5));
        assert!(close(plate.totals.fiber, 2.5));
        assert!(plate.missing.is_empty());
    }

    #[test]
    fn test_order_independent() {
        let resolver = NutritionResolver::curated_only();
        let portion = PortionFactor::new(1.5).unwrap();
        let a = aggregate_plate(&resolver, &names(&["dosa", "idli", "rice", "sushi"]), portion);
        let b = aggregate_plate(&resolver, &names(&["sushi", "rice", "idli", "dosa"]), portion);
        assert!(close(a.totals.calories, b.totals.calories));
        assert!(close(a.totals.protein, b.totals.protein));
        assert!(close(a.totals.carbs, b.totals.carbs));
        assert!(close(a.totals.fat, b.totals.fat));
        assert!(close(a.totals.fiber, b.totals.fiber));
        assert_eq!(a.missing, b.missing);
    }

    #[test]
    fn test_all_unresolved() {
        let resolver = NutritionResolver::curated_only();
        let plate = aggregate_plate(&resolver, &names(&["sushi", "ramen"]), PortionFactor::default());
        assert_eq!(plate.totals.calories, 0.0);
        assert!(!plate.has_data());
        assert_eq!(plate.missing, names(&["sushi", "ramen"]));
    }

    #[test]
    fn test_duplicates_count_twice_and_missing_dedupes() {
        let stub = Arc::new(StubLookup::default());
        let resolver = NutritionResolver::with_lookup(stub.clone());
        let plate = aggregate_plate(
            &resolver,
            &names(&["roti", "sushi", "roti", "sushi"]),
            PortionFactor::default(),
        );
        assert!(close(plate.totals.calories, 220.0));
        assert_eq!(plate.resolved.len(), 2);
        assert_eq!(plate.missing, names(&["sushi"]));
        assert_eq!(stub.call_count(), 1);
    }

    #[test]
    fn test_empty_selection() {
        let plate = aggregate_plate(&NutritionResolver::curated_only(), &[], PortionFactor::default());
        assert!(!plate.has_data());
        assert!(plate.resolved.is_empty());
        assert!(plate.missing.is_empty());
    }
}
