//! Food photo scanning

pub mod pipeline;
pub mod recognition;

pub use pipeline::{
    weight_impact_message, PendingMeal, ScanError, ScanReport, ScanRequest, Scanner, WeightImpact,
};
pub use recognition::{FoodCheck, Recognition};
