//! Session-scoped meal log
//!
//! Append-only; insertion order is chronological order.

use chrono::NaiveDate;
use tracing::info;

use crate::models::MealLogEntry;

#[derive(Debug, Clone, Default)]
pub struct MealLogStore {
    entries: Vec<MealLogEntry>,
}

impl MealLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return a reference to the stored copy
    pub fn append(&mut self, entry: MealLogEntry) -> &MealLogEntry {
        info!(
            "Logged meal on {} at {}: {} ({} kcal)",
            entry.date,
            entry.time_label(),
            entry.foods_label(),
            entry.calories
        );
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn all(&self) -> &[MealLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries logged on `day`, oldest first
    pub fn entries_on(&self, day: NaiveDate) -> Vec<&MealLogEntry> {
        self.entries.iter().filter(|e| e.date == day).collect()
    }

    /// Entries with `start <= date <= end`, in log order. Empty when start > end.
    pub fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&MealLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect()
    }

    /// The last `limit` entries of `day`, newest first
    pub fn recent_on(&self, day: NaiveDate, limit: usize) -> Vec<&MealLogEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.date == day)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveTime;

    use crate::models::{CombinedNutrition, Goal, MealLogEntryCreate, PortionFactor};

    pub(crate) fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    pub(crate) fn entry(date: NaiveDate, hour: u32, foods: &[&str], calories: f64) -> MealLogEntry {
        MealLogEntry::create(MealLogEntryCreate {
            date,
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            foods: foods.iter().map(|s| s.to_string()).collect(),
            nutrition: CombinedNutrition {
                calories,
                protein: calories / 20.0,
                carbs: calories / 8.0,
                fat: calories / 30.0,
                fiber: 2.0,
            },
            portion: PortionFactor::default(),
            goal: Goal::Maintain,
            thumbnail: None,
        })
    }

    #[test]
    fn test_append_and_query_by_day() {
        let mut store = MealLogStore::new();
        assert!(store.is_empty());
        store.append(entry(day(10), 8, &["idli"], 120.0));
        store.append(entry(day(11), 9, &["dosa"], 168.0));
        store.append(entry(day(10), 13, &["pizza"], 285.0));

        assert_eq!(store.len(), 3);
        let today: Vec<&str> = store
            .entries_on(day(10))
            .iter()
            .map(|e| e.foods[0].as_str())
            .collect();
        assert_eq!(today, vec!["idli", "pizza"]);
        assert!(store.entries_on(day(12)).is_empty());
    }

    #[test]
    fn test_entries_between_inclusive() {
        let mut store = MealLogStore::new();
        for d in 1..=5 {
            store.append(entry(day(d), 12, &["rice"], 200.0));
        }
        assert_eq!(store.entries_between(day(2), day(4)).len(), 3);
        assert_eq!(store.entries_between(day(5), day(5)).len(), 1);
        assert!(store.entries_between(day(4), day(2)).is_empty());
    }

    #[test]
    fn test_recent_on_is_newest_first() {
        let mut store = MealLogStore::new();
        for hour in 7..14 {
            store.append(entry(day(10), hour, &["roti"], 110.0));
        }
        store.append(entry(day(11), 8, &["salad"], 80.0));

        let recent = store.recent_on(day(10), 5);
        let hours: Vec<String> = recent.iter().map(|e| e.time_label()).collect();
        assert_eq!(hours, vec!["13:00", "12:00", "11:00", "10:00", "09:00"]);
    }

    #[test]
    fn test_logged_values_are_rounded() {
        let mut store = MealLogStore::new();
        store.append(entry(day(10), 12, &["pizza"], 213.75));
        let logged = store.entries_on(day(10))[0];
        assert_eq!(logged.calories, 214);
        assert_eq!(logged.protein, 10.7);
        assert_eq!(logged.carbs, 26.7);
        assert_eq!(logged.fat, 7.1);
    }
}
