//! Open Food Facts product search, used as the nutrition fallback

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{ClientError, NutritionLookup};
use crate::config::Config;
use crate::models::{round_one_decimal, NutrientAmount, NutritionRecord};

const CORE_KEYS: [&str; 5] = ["energy-kcal", "proteins", "carbohydrates", "fat", "fiber"];

/// Pure fat is ~900 kcal per 100 g; anything above this is a data entry error
const MAX_KCAL_PER_100G: f64 = 1000.0;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    #[serde(default)]
    nutriments: Map<String, Value>,
}

/// Blocking Open Food Facts search client
pub struct OpenFoodFactsClient {
    client: Client,
    search_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(
        search_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            search_url: search_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(
            config.open_food_facts_url.clone(),
            config.lookup_timeout,
            &config.user_agent,
        )
    }
}

impl NutritionLookup for OpenFoodFactsClient {
    fn lookup(&self, name: &str) -> Result<Option<NutritionRecord>, ClientError> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("search_terms", name),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", "1"),
            ])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)?;
        let record = parsed
            .products
            .into_iter()
            .next()
            .and_then(|product| record_from_nutriments(&product.nutriments));
        debug!("Open Food Facts lookup for '{}': found={}", name, record.is_some());
        Ok(record)
    }
}

/// Per-100g value for a nutriment key; accepts numbers and numeric strings
fn nutriment(nutriments: &Map<String, Value>, key: &str) -> Option<f64> {
    match nutriments.get(&format!("{}_100g", key))? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn plausible_calories(kcal: f64) -> u32 {
    if kcal.is_finite() && kcal <= MAX_KCAL_PER_100G {
        kcal.max(0.0).trunc() as u32
    } else {
        warn!("Ignoring implausible energy value: {} kcal/100g", kcal);
        0
    }
}

fn record_from_nutriments(nutriments: &Map<String, Value>) -> Option<NutritionRecord> {
    if CORE_KEYS.iter().all(|key| nutriment(nutriments, key).is_none()) {
        return None;
    }
    let value = |key: &str| nutriment(nutriments, key).unwrap_or(0.0);

    let calories = plausible_calories(value("energy-kcal"));
    let record = NutritionRecord::new(
        calories,
        round_one_decimal(value("proteins")),
        round_one_decimal(value("carbohydrates")),
        round_one_decimal(value("fat")),
        round_one_decimal(value("fiber")),
    );

    let mut vitamins = Vec::new();
    push_positive(&mut vitamins, "Vit A", value("vitamin-a"), "µg");
    push_positive(&mut vitamins, "Vit C", value("vitamin-c"), "mg");

    let mut minerals = Vec::new();
    push_positive(&mut minerals, "Calcium", value("calcium"), "mg");
    push_positive(&mut minerals, "Iron", value("iron"), "mg");
    push_positive(&mut minerals, "Sodium", value("sodium"), "mg");
    push_positive(&mut minerals, "Potassium", value("potassium"), "mg");

    Some(
        record
            .with_vitamins(or_not_available(vitamins))
            .with_minerals(or_not_available(minerals)),
    )
}

fn push_positive(list: &mut Vec<NutrientAmount>, label: &str, amount: f64, unit: &str) {
    if amount > 0.0 {
        list.push(NutrientAmount::new(label, format!("{:.1} {}", amount, unit)));
    }
}

fn or_not_available(list: Vec<NutrientAmount>) -> Vec<NutrientAmount> {
    if list.is_empty() {
        vec![NutrientAmount::new("Info", "Not available")]
    } else {
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const SEARCH_PATH: &str = "/cgi/search.pl";

    fn client(server: &mockito::Server) -> OpenFoodFactsClient {
        OpenFoodFactsClient::new(
            format!("{}{}", server.url(), SEARCH_PATH),
            Duration::from_secs(5),
            "ScanEat-test",
        )
        .unwrap()
    }

    fn search_query(term: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("search_terms".into(), term.into()),
            Matcher::UrlEncoded("search_simple".into(), "1".into()),
            Matcher::UrlEncoded("action".into(), "process".into()),
            Matcher::UrlEncoded("json".into(), "1".into()),
            Matcher::UrlEncoded("page_size".into(), "1".into()),
        ])
    }

    #[test]
    fn test_lookup_maps_first_product() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", SEARCH_PATH)
            .match_query(search_query("greek yogurt"))
            .match_header("user-agent", "ScanEat-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"products":[{"nutriments":{
                    "energy-kcal_100g": 97.8,
                    "proteins_100g": "9.04",
                    "carbohydrates_100g": 3.6,
                    "fat_100g": 5,
                    "calcium_100g": 0.11,
                    "vitamin-c_100g": 0
                }}]}"#,
            )
            .create();

        let record = client(&server).lookup("greek yogurt").unwrap().unwrap();
        mock.assert();

        assert_eq!(record.calories, 97);
        assert_eq!(record.protein, 9.0);
        assert_eq!(record.carbs, 3.6);
        assert_eq!(record.fat, 5.0);
        assert_eq!(record.fiber, 0.0);
        assert_eq!(record.vitamins, vec![NutrientAmount::new("Info", "Not available")]);
        assert_eq!(record.minerals, vec![NutrientAmount::new("Calcium", "0.1 mg")]);
    }

    #[test]
    fn test_no_products_is_none() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"count":0,"products":[]}"#)
            .create();

        assert!(client(&server).lookup("unobtainium").unwrap().is_none());
    }

    #[test]
    fn test_product_without_core_fields_is_none() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"products":[{"nutriments":{"sodium_100g":0.4}}]}"#)
            .create();

        assert!(client(&server).lookup("salt").unwrap().is_none());
    }

    #[test]
    fn test_server_error_is_reported() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("down")
            .create();

        let result = client(&server).lookup("pizza");
        assert!(matches!(result, Err(ClientError::Status { status: 503, .. })));
    }

    #[test]
    fn test_micronutrient_formatting() {
        let mut nutriments = Map::new();
        nutriments.insert("energy-kcal_100g".into(), Value::from(50));
        nutriments.insert("vitamin-a_100g".into(), Value::from(1.5));
        nutriments.insert("iron_100g".into(), Value::from(2.04));
        nutriments.insert("potassium_100g".into(), Value::from("0.3"));

        let record = record_from_nutriments(&nutriments).unwrap();
        assert_eq!(record.vitamins, vec![NutrientAmount::new("Vit A", "1.5 µg")]);
        assert_eq!(
            record.minerals,
            vec![
                NutrientAmount::new("Iron", "2.0 mg"),
                NutrientAmount::new("Potassium", "0.3 mg"),
            ]
        );
    }

    #[test]
    fn test_implausible_energy_is_not_available() {
        let mut nutriments = Map::new();
        nutriments.insert("energy-kcal_100g".into(), Value::from("99999999999"));
        nutriments.insert("proteins_100g".into(), Value::from(3.2));

        let record = record_from_nutriments(&nutriments).unwrap();
        assert_eq!(record.calories, 0);
        assert_eq!(record.protein, 3.2);

        nutriments.insert("energy-kcal_100g".into(), Value::from(884));
        assert_eq!(record_from_nutriments(&nutriments).unwrap().calories, 884);
    }
}
