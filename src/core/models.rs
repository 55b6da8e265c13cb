//! Core data models for translation and speech requests

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::core::errors::ValidationError;

/// Translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranslationRequest {
    /// Text to translate
    #[schema(example = "I have a sharp pain in my chest")]
    pub text: String,
    /// Language code of `text`
    #[schema(example = "en")]
    pub source_lang: String,
    /// Language code to translate into
    #[schema(example = "es")]
    pub target_lang: String,
}

impl TranslationRequest {
    /// Build from a decoded JSON object, rejecting missing or empty fields
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
        match (
            required_field(payload, "text"),
            required_field(payload, "source_lang"),
            required_field(payload, "target_lang"),
        ) {
            (Some(text), Some(source_lang), Some(target_lang)) => Ok(Self {
                text: text.to_string(),
                source_lang: source_lang.to_string(),
                target_lang: target_lang.to_string(),
            }),
            _ => Err(ValidationError::MissingFields {
                expected: "text, source_lang, or target_lang",
            }),
        }
    }
}

/// Translation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranslationResult {
    /// Text as submitted
    #[schema(example = "I have a sharp pain in my chest")]
    pub original_text: String,
    /// Trimmed provider output
    #[schema(example = "Tengo un dolor agudo en el pecho")]
    pub translated_text: String,
    /// Echo of the request
    pub source_lang: String,
    /// Echo of the request
    pub target_lang: String,
}

/// Text-to-speech request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SpeechRequest {
    /// Text to read aloud
    #[schema(example = "Take two tablets after meals")]
    pub text: String,
    /// Language code; selects the voice
    #[schema(example = "en")]
    pub language: String,
}

impl SpeechRequest {
    /// Build from a decoded JSON object, rejecting missing or empty fields
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
        match (
            required_field(payload, "text"),
            required_field(payload, "language"),
        ) {
            (Some(text), Some(language)) => Ok(Self {
                text: text.to_string(),
                language: language.to_string(),
            }),
            _ => Err(ValidationError::MissingFields {
                expected: "text or language",
            }),
        }
    }
}

/// Text-to-speech result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SpeechResult {
    /// `data:audio/mp3;base64,...`
    pub audio_data_url: String,
    /// Echo of the request
    pub text: String,
    /// Echo of the request
    pub language: String,
}

/// Prompt handed to a text-generation provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Role framing for the model
    pub system: String,
    /// Instructions followed by the text
    pub user: String,
}

/// Decode a request body into a non-empty JSON object
pub fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(ValidationError::NoData),
    }
}

/// Non-empty string field, or None
fn required_field<'a>(payload: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    payload
        .get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}
