//! Healthcare Translator - medical translation and speech synthesis backend
//!
//! This library translates clinical conversations through a text-generation
//! provider and reads text aloud through a speech-synthesis provider, exposed
//! over a small HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    client::TranslationClient,
    config::AppConfig,
    errors::{ConfigError, ProviderError, SpeechError, TranslationError, ValidationError},
    models::{SpeechRequest, SpeechResult, TranslationRequest, TranslationResult},
    speech::SpeechClient,
    voices::VoiceMap,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
