//! Clarifai food-item-recognition client

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{ClientError, Concept, VisionClassifier};
use crate::config::Config;
use crate::intake::FoodImage;

#[derive(Debug, Deserialize)]
struct OutputsResponse {
    #[serde(default)]
    outputs: Vec<Output>,
}

#[derive(Debug, Deserialize)]
struct Output {
    #[serde(default)]
    data: OutputData,
}

#[derive(Debug, Default, Deserialize)]
struct OutputData {
    #[serde(default)]
    concepts: Vec<RawConcept>,
}

#[derive(Debug, Deserialize)]
struct RawConcept {
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: f64,
}

/// Blocking client for the Clarifai food model
pub struct ClarifaiClassifier {
    client: Client,
    api_key: Option<String>,
    url: String,
}

impl ClarifaiClassifier {
    pub fn new(
        api_key: Option<String>,
        url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            api_key,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(
            config.clarifai_api_key.clone(),
            config.clarifai_url.clone(),
            config.classifier_timeout,
            &config.user_agent,
        )
    }
}

impl VisionClassifier for ClarifaiClassifier {
    fn classify(&self, image: &FoodImage) -> Result<Vec<Concept>, ClientError> {
        let api_key = self.api_key.as_deref().ok_or(ClientError::MissingApiKey)?;

        let payload = json!({
            "inputs": [
                { "data": { "image": { "base64": image.to_jpeg_base64()? } } }
            ]
        });

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Key {}", api_key))
            .json(&payload)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OutputsResponse = serde_json::from_str(&body)?;
        let concepts = parse_concepts(parsed);
        debug!("Clarifai returned {} concepts", concepts.len());
        Ok(concepts)
    }
}

fn parse_concepts(response: OutputsResponse) -> Vec<Concept> {
    let mut concepts: Vec<Concept> = response
        .outputs
        .into_iter()
        .next()
        .map(|output| output.data.concepts)
        .unwrap_or_default()
        .into_iter()
        .map(|c| Concept::new(c.name, c.value))
        .collect();
    concepts.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    concepts
}
