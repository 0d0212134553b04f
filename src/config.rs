//! Runtime configuration
//!
//! Environment-only. An optional `.env` file is loaded first.

use std::time::Duration;

use thiserror::Error;

pub const CLARIFAI_API_KEY_VAR: &str = "CLARIFAI_API_KEY";
pub const CLARIFAI_URL_VAR: &str = "SCANEAT_CLARIFAI_URL";
pub const OFF_URL_VAR: &str = "SCANEAT_OFF_URL";
pub const CLASSIFIER_TIMEOUT_VAR: &str = "SCANEAT_CLASSIFIER_TIMEOUT_SECS";
pub const LOOKUP_TIMEOUT_VAR: &str = "SCANEAT_LOOKUP_TIMEOUT_SECS";
pub const USER_AGENT_VAR: &str = "SCANEAT_USER_AGENT";

pub const DEFAULT_CLARIFAI_URL: &str =
    "https://api.clarifai.com/v2/models/food-item-recognition/outputs";
pub const DEFAULT_OFF_URL: &str = "https://world.openfoodfacts.org/cgi/search.pl";
const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 20;
const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Settings for both outbound collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub clarifai_api_key: Option<String>,
    pub clarifai_url: String,
    pub open_food_facts_url: String,
    pub classifier_timeout: Duration,
    pub lookup_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clarifai_api_key: None,
            clarifai_url: DEFAULT_CLARIFAI_URL.to_string(),
            open_food_facts_url: DEFAULT_OFF_URL.to_string(),
            classifier_timeout: Duration::from_secs(DEFAULT_CLASSIFIER_TIMEOUT_SECS),
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("ScanEat/{}", crate::build_info::VERSION)
}

impl Config {
    /// Read configuration from the process environment (after `.env`)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            clarifai_api_key: non_empty(CLARIFAI_API_KEY_VAR),
            clarifai_url: non_empty(CLARIFAI_URL_VAR).unwrap_or(defaults.clarifai_url),
            open_food_facts_url: non_empty(OFF_URL_VAR).unwrap_or(defaults.open_food_facts_url),
            classifier_timeout: parse_timeout(
                CLASSIFIER_TIMEOUT_VAR,
                non_empty(CLASSIFIER_TIMEOUT_VAR),
                defaults.classifier_timeout,
            )?,
            lookup_timeout: parse_timeout(
                LOOKUP_TIMEOUT_VAR,
                non_empty(LOOKUP_TIMEOUT_VAR),
                defaults.lookup_timeout,
            )?,
            user_agent: non_empty(USER_AGENT_VAR).unwrap_or(defaults.user_agent),
        })
    }

    pub fn has_classifier_key(&self) -> bool {
        self.clarifai_api_key.is_some()
    }
}

fn parse_timeout(
    var: &'static str,
    value: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ConfigError::InvalidTimeout { var, value: raw }),
        },
    }
}
