//! External provider interfaces and their HTTP implementations

pub mod edge_tts;
pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use std::path::Path;

use crate::core::errors::ProviderError;
use crate::core::models::Prompt;

pub use edge_tts::EdgeTtsSynthesizer;
pub use gemini::GeminiGenerator;
pub use openai::OpenAiGenerator;

/// Text-generation backend: prompt in, text out
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &str;

    /// Generate a completion for the prompt
    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError>;
}

/// Speech-synthesis backend
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with `voice` and write the audio to `path`
    async fn save(&self, text: &str, voice: &str, path: &Path) -> Result<(), ProviderError>;
}

/// Turn a non-success response into an `ApiError`
pub(crate) async fn error_for_status(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    ProviderError::ApiError { status, message }
}
