//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use tracing::debug;

use super::{error_for_status, TextGenerator};
use crate::core::errors::ProviderError;
use crate::core::models::Prompt;

/// Low temperature keeps medical wording literal
const TEMPERATURE: f32 = 0.3;

/// OpenAI-compatible text generator
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl OpenAiGenerator {
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
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials {
                variable: "OPENAI_API_KEY",
            })?;

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user }
            ],
            "temperature": TEMPERATURE
        });

        debug!("Sending chat completion request to model {}", self.model);

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.api_base.trim_end_matches('/')
            ))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let json: serde_json::Value = response.json().await?;

        json["choices"]
            .get(0)
            .and_then(|c| c["message"]["content"].as_str())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::InvalidResponseError {
                message: "No message content in response".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_sends_system_and_user_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Translated text"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generator = OpenAiGenerator::new(
            reqwest::Client::new(),
            Some("test_key".to_string()),
            "gpt-4o",
            server.uri(),
        );
        let prompt = Prompt {
            system: "You are a medical translator.".to_string(),
            user: "Text to translate:\nHello".to_string(),
        };

        let text = generator.generate(&prompt).await.unwrap();
        assert_eq!(text, "Translated text");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["model"], "gpt-4o");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert!(messages[1]["content"].as_str().unwrap().contains("Hello"));
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_generate_missing_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": []
            })))
            .mount(&server)
            .await;

        let generator = OpenAiGenerator::new(
            reqwest::Client::new(),
            Some("test_key".to_string()),
            "gpt-4o",
            server.uri(),
        );
        let prompt = Prompt {
            system: String::new(),
            user: "Hello".to_string(),
        };
        let err = generator.generate(&prompt).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponseError { .. }));
    }
}
