//! Custom error types for translation and speech operations

use thiserror::Error;

/// Errors raised by an external text or speech provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Credential for the provider is unset or empty
    #[error("{variable} environment variable is not set")]
    MissingCredentials {
        /// Environment variable that should hold the key
        variable: &'static str,
    },

    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Transport error text
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What was missing or malformed
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::InvalidResponseError {
                message: err.to_string(),
            }
        } else {
            ProviderError::NetworkError {
                message: err.to_string(),
            }
        }
    }
}

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Provider call failed
    #[error("Translation failed: {0}")]
    Provider(#[from] ProviderError),

    /// Provider answered with nothing but whitespace
    #[error("Translation failed: provider returned an empty translation")]
    EmptyResponse,
}

/// Speech synthesis errors
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Provider call failed
    #[error("Speech generation failed: {0}")]
    Provider(#[from] ProviderError),

    /// Temporary audio storage failed
    #[error("Speech generation failed: {0}")]
    Storage(#[from] std::io::Error),
}

/// Request payload rejected before any provider call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body missing, unparseable or empty
    #[error("No data provided")]
    NoData,

    /// One or more required fields missing or empty
    #[error("Missing required fields: {expected}")]
    MissingFields {
        /// Field list quoted in the message
        expected: &'static str,
    },
}

/// Startup configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Secret key unset or left at the development default
    #[error("SECRET_KEY environment variable not set or using default value in production")]
    InsecureSecretKey,

    /// Provider key required in production
    #[error("{variable} environment variable not set in production")]
    MissingApiKey {
        /// Environment variable that should hold the key
        variable: &'static str,
    },

    /// Unparseable value
    #[error("Invalid value for {variable}: {value}")]
    InvalidValue {
        /// Offending variable
        variable: &'static str,
        /// Value as read
        value: String,
    },
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
