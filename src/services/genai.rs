use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::services::errors::SuggestError;

/// Text-generation backend asked for a JSON style suggestion.
#[async_trait]
pub trait StyleModel: Send + Sync {
    /// Return the model's raw text answer for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, SuggestError>;
}

/// Client for a `generateContent` style REST endpoint.
pub struct GenAiModel {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GenAiModel {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for style model")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl StyleModel for GenAiModel {
    async fn generate(&self, prompt: &str) -> Result<String, SuggestError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestError::Status(status.as_u16()));
        }

        let value: Value = response.json().await?;
        extract_text(&value).ok_or(SuggestError::Empty)
    }
}

fn extract_text(value: &Value) -> Option<String> {
    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_owned)
}
