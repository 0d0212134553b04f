//! Dietary goal and portion factor
//!
//! Both are user-supplied values validated at the boundary where they enter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for user-supplied values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("portion factor must be between {min} and {max}, got {value}")]
    PortionOutOfRange { value: f64, min: f64, max: f64 },

    #[error("unknown goal '{0}' (expected lose, maintain or gain)")]
    UnknownGoal(String),
}

/// The user's declared dietary objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }

    /// Target daily calorie band (inclusive) used by the coach
    pub fn calorie_band(&self) -> (u32, u32) {
        match self {
            Goal::Lose => (1400, 1900),
            Goal::Gain => (2200, 2800),
            Goal::Maintain => (1800, 2300),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose" | "lose weight" => Ok(Goal::Lose),
            "maintain" | "maintain weight" => Ok(Goal::Maintain),
            "gain" | "gain weight" => Ok(Goal::Gain),
            _ => Err(ValidationError::UnknownGoal(s.to_string())),
        }
    }
}

/// Multiplier scaling a plate to the amount actually eaten (0.25 - 2.0)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PortionFactor(f64);

impl PortionFactor {
    pub const MIN: f64 = 0.25;
    pub const MAX: f64 = 2.0;

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::PortionOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for PortionFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TryFrom<f64> for PortionFactor {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// As the user would type it: "1.0", "0.75", "2.0"
impl fmt::Display for PortionFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
