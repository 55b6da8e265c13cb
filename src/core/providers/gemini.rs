//! Google Gemini `generateContent` client

use async_trait::async_trait;
use tracing::debug;

use super::{error_for_status, TextGenerator};
use crate::core::errors::ProviderError;
use crate::core::models::Prompt;

/// Gemini text generator
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl GeminiGenerator {
    /// Create a generator; an empty key counts as missing
    pub fn new(
        client: reqwest::Client,
        api_key: Option<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.filter(|key| !key.is_empty()),
            model: model.into(),
            api_base: api_base.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials {
                variable: "GEMINI_API_KEY",
            })?;

        let body = serde_json::json!({
            "systemInstruction": {
                "parts": [{ "text": prompt.system }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt.user }]
            }]
        });

        debug!("Sending Gemini request to model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let json: serde_json::Value = response.json().await?;

        let parts = json["candidates"]
            .get(0)
            .and_then(|c| c["content"]["parts"].as_array())
            .ok_or_else(|| ProviderError::InvalidResponseError {
                message: "No candidates in response".to_string(),
            })?;

        let text: String = parts
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect();

        if text.is_empty() {
            return Err(ProviderError::InvalidResponseError {
                message: "No text in response".to_string(),
            });
        }

        Ok(text)
    }
}
