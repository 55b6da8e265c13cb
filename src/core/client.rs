//! Medical translation client

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::core::config::{AppConfig, TranslationProvider};
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{Prompt, TranslationRequest, TranslationResult};
use crate::core::providers::{GeminiGenerator, OpenAiGenerator, TextGenerator};

const SYSTEM_PROMPT: &str = "You are a professional medical translator. \
You translate patient and clinician speech accurately, keeping medical terminology precise.";

/// Translation client wrapping a text-generation provider
#[derive(Clone)]
pub struct TranslationClient {
    generator: Arc<dyn TextGenerator>,
}

impl TranslationClient {
    /// Create a client around any provider
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Create the provider selected by configuration
    pub fn from_config(config: &AppConfig, http: reqwest::Client) -> Self {
        let generator: Arc<dyn TextGenerator> = match config.translation_provider {
            TranslationProvider::Gemini => Arc::new(GeminiGenerator::new(
                http,
                config.gemini_api_key.clone(),
                config.gemini_model.clone(),
                config.gemini_api_base.clone(),
            )),
            TranslationProvider::OpenAi => Arc::new(OpenAiGenerator::new(
                http,
                config.openai_api_key.clone(),
                config.openai_model.clone(),
                config.openai_api_base.clone(),
            )),
        };

        info!("Using {} for translation", generator.name());
        Self::new(generator)
    }

    /// Translate `text` from `source_lang` to `target_lang`
    pub async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let prompt = build_prompt(text, source_lang, target_lang);

        debug!(
            "Translating {} chars from {} to {} via {}",
            text.len(),
            source_lang,
            target_lang,
            self.generator.name()
        );

        let response = self.generator.generate(&prompt).await.map_err(|e| {
            error!("Translation error: {}", e);
            TranslationError::from(e)
        })?;

        let translated = response.trim();
        if translated.is_empty() {
            error!("Translation error: empty response from {}", self.generator.name());
            return Err(TranslationError::EmptyResponse);
        }

        Ok(translated.to_string())
    }

    /// Translate a request into a full result
    pub async fn translate_request(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let translated_text = self
            .translate(&request.text, &request.source_lang, &request.target_lang)
            .await?;

        Ok(TranslationResult {
            original_text: request.text.clone(),
            translated_text,
            source_lang: request.source_lang.clone(),
            target_lang: request.target_lang.clone(),
        })
    }
}

/// Prompt asking for a medically accurate, commentary-free translation
pub fn build_prompt(text: &str, source_lang: &str, target_lang: &str) -> Prompt {
    let user = format!(
        "Translate the following {source_lang} text to {target_lang}.\n\
         This is for a healthcare conversation, so medical terminology must be translated accurately.\n\
         Maintain the original meaning, tone, and medical context.\n\
         Please respond ONLY with the translated text, no explanations or additional information.\n\
         \n\
         Text to translate:\n\
         {text}"
    );

    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
