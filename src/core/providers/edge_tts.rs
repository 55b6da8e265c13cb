//! Client for an edge-tts compatible `/v1/audio/speech` service

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use super::{error_for_status, SpeechSynthesizer};
use crate::core::errors::ProviderError;

/// HTTP speech synthesizer accepting edge-tts voice names
#[derive(Debug, Clone)]
pub struct EdgeTtsSynthesizer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl EdgeTtsSynthesizer {
    /// Create a synthesizer posting to `endpoint`
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for EdgeTtsSynthesizer {
    async fn save(&self, text: &str, voice: &str, path: &Path) -> Result<(), ProviderError> {
        let body = serde_json::json!({
            "model": "tts-1",
            "input": text,
            "voice": voice,
            "response_format": "mp3",
            "speed": 1.0
        });

        debug!("Requesting speech with voice {}", voice);

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(ProviderError::InvalidResponseError {
                message: "No audio in response".to_string(),
            });
        }

        tokio::fs::write(path, &audio).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_save_writes_audio_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/speech"))
            .and(header("authorization", "Bearer tts_key"))
            .and(body_partial_json(serde_json::json!({
                "input": "Hola",
                "voice": "es-ES-AlvaroNeural",
                "response_format": "mp3"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3audio".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let synthesizer = EdgeTtsSynthesizer::new(
            reqwest::Client::new(),
            format!("{}/v1/audio/speech", server.uri()),
            Some("tts_key".to_string()),
        );
        let file = tempfile::NamedTempFile::new().unwrap();

        synthesizer
            .save("Hola", "es-ES-AlvaroNeural", file.path())
            .await
            .unwrap();
        assert_eq!(std::fs::read(file.path()).unwrap(), b"ID3audio");
    }

    #[tokio::test]
    async fn test_save_reports_service_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("voice not found"))
            .mount(&server)
            .await;

        let synthesizer = EdgeTtsSynthesizer::new(reqwest::Client::new(), server.uri(), None);
        let file = tempfile::NamedTempFile::new().unwrap();

        let err = synthesizer
            .save("Hello", "xx-XX-Nobody", file.path())
            .await
            .unwrap_err();
        match err {
            ProviderError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "voice not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
