//! Per-process user session
//!
//! One MCP server process serves one user. The session owns the meal log,
//! the current goal and the most recent loggable scan.

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use crate::meal_log::MealLogStore;
use crate::models::{Goal, MealLogEntry};
use crate::scan::PendingMeal;

#[derive(Debug, Default)]
pub struct Session {
    log: MealLogStore,
    goal: Goal,
    last_scan: Option<PendingMeal>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// Returns the previous goal
    pub fn set_goal(&mut self, goal: Goal) -> Goal {
        let previous = std::mem::replace(&mut self.goal, goal);
        if previous != goal {
            info!("Goal changed from {} to {}", previous, goal);
        }
        previous
    }

    pub fn log(&self) -> &MealLogStore {
        &self.log
    }

    pub fn pending_meal(&self) -> Option<&PendingMeal> {
        self.last_scan.as_ref()
    }

    /// Replace the pending meal; a scan without loggable data clears it
    pub fn set_pending_meal(&mut self, pending: Option<PendingMeal>) {
        self.last_scan = pending;
    }

    pub fn append(&mut self, entry: MealLogEntry) -> &MealLogEntry {
        self.log.append(entry)
    }

    /// Log the pending meal under the current goal. The pending meal is consumed.
    pub fn log_pending_meal(&mut self, date: NaiveDate, time: NaiveTime) -> Option<&MealLogEntry> {
        let mut pending = self.last_scan.take()?;
        pending.goal = self.goal;
        Some(self.log.append(pending.into_entry(date, time)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CombinedNutrition, PortionFactor};

    fn pending() -> PendingMeal {
        PendingMeal {
            foods: vec!["idli".to_string(), "dosa".to_string()],
            nutrition: CombinedNutrition {
                calories: 228.0,
                protein: 6.0,
                carbs: 39.0,
                fat: 4.9,
                fiber: 2.1,
            },
            portion: PortionFactor::default(),
            goal: Goal::Maintain,
            thumbnail: None,
        }
    }

    fn at() -> (NaiveDate, NaiveTime) {
        (
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            NaiveTime::from_hms_opt(8, 15, 0).unwrap(),
        )
    }

    #[test]
    fn test_default_goal_is_maintain() {
        assert_eq!(Session::new().goal(), Goal::Maintain);
    }

    #[test]
    fn test_log_pending_consumes_it() {
        let mut session = Session::new();
        let (date, time) = at();
        assert!(session.log_pending_meal(date, time).is_none());

        session.set_pending_meal(Some(pending()));
        let entry = session.log_pending_meal(date, time).unwrap();
        assert_eq!(entry.calories, 228);
        assert_eq!(entry.foods_label(), "idli, dosa");

        assert!(session.pending_meal().is_none());
        assert!(session.log_pending_meal(date, time).is_none());
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_goal_change_applies_to_later_logging_only() {
        let mut session = Session::new();
        let (date, time) = at();

        session.set_pending_meal(Some(pending()));
        session.log_pending_meal(date, time);

        assert_eq!(session.set_goal(Goal::Lose), Goal::Maintain);
        session.set_pending_meal(Some(pending()));
        session.log_pending_meal(date, time);

        let goals: Vec<Goal> = session.log().all().iter().map(|e| e.goal).collect();
        assert_eq!(goals, vec![Goal::Maintain, Goal::Lose]);
    }
}
