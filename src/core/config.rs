//! Configuration management

use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::core::errors::ConfigError;

/// Secret shipped for local development; refused in production
pub const DEV_SECRET_KEY: &str = "dev-key-for-development-only";

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TTS_ENDPOINT: &str = "http://localhost:5050/v1/audio/speech";

/// Deployment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Test runs
    Testing,
    /// Deployed; secrets are enforced
    Production,
}

impl Environment {
    /// Parse `APP_ENV`; unknown names fall back to development
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" => Environment::Production,
            "testing" => Environment::Testing,
            "development" => Environment::Development,
            other => {
                warn!("Unknown APP_ENV '{}', using development", other);
                Environment::Development
            }
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Testing => write!(f, "testing"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which text-generation backend handles translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationProvider {
    /// Google Gemini `generateContent`
    #[default]
    Gemini,
    /// OpenAI-compatible chat completions
    OpenAi,
}

impl TranslationProvider {
    /// Environment variable holding this provider's key
    pub fn key_variable(self) -> &'static str {
        match self {
            TranslationProvider::Gemini => "GEMINI_API_KEY",
            TranslationProvider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl FromStr for TranslationProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(TranslationProvider::Gemini),
            "openai" => Ok(TranslationProvider::OpenAi),
            _ => Err(ConfigError::InvalidValue {
                variable: "TRANSLATION_PROVIDER",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationProvider::Gemini => write!(f, "gemini"),
            TranslationProvider::OpenAi => write!(f, "openai"),
        }
    }
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `APP_ENV`
    pub environment: Environment,
    /// `SECRET_KEY`
    pub secret_key: String,
    /// `TRANSLATION_PROVIDER`
    pub translation_provider: TranslationProvider,
    /// `GEMINI_API_KEY`
    pub gemini_api_key: Option<String>,
    /// `GEMINI_MODEL`
    pub gemini_model: String,
    /// `GEMINI_API_BASE`
    pub gemini_api_base: String,
    /// `OPENAI_API_KEY`
    pub openai_api_key: Option<String>,
    /// `OPENAI_MODEL`
    pub openai_model: String,
    /// `OPENAI_API_BASE`
    pub openai_api_base: String,
    /// `TTS_ENDPOINT`
    pub tts_endpoint: String,
    /// `TTS_API_KEY`
    pub tts_api_key: Option<String>,
    /// `LOG_LEVEL`, as written
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            secret_key: DEV_SECRET_KEY.to_string(),
            translation_provider: TranslationProvider::Gemini,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            tts_endpoint: DEFAULT_TTS_ENDPOINT.to_string(),
            tts_api_key: None,
            log_level: "INFO".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let translation_provider = match get("TRANSLATION_PROVIDER") {
            Some(name) => name.parse()?,
            None => TranslationProvider::default(),
        };

        Ok(Self {
            environment: get("APP_ENV")
                .map(|name| Environment::from_name(&name))
                .unwrap_or_default(),
            secret_key: get("SECRET_KEY").unwrap_or(defaults.secret_key),
            translation_provider,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_base: get("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_api_base: get("OPENAI_API_BASE").unwrap_or(defaults.openai_api_base),
            tts_endpoint: get("TTS_ENDPOINT").unwrap_or(defaults.tts_endpoint),
            tts_api_key: get("TTS_API_KEY"),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Load from environment and validate in one step
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration; production refuses insecure or missing secrets
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment != Environment::Production {
            if self.active_api_key().is_none() {
                warn!(
                    "{} is not set; translation requests will fail",
                    self.translation_provider.key_variable()
                );
            }
            return Ok(());
        }

        if self.secret_key.is_empty() || self.secret_key == DEV_SECRET_KEY {
            return Err(ConfigError::InsecureSecretKey);
        }

        if self.active_api_key().is_none() {
            return Err(ConfigError::MissingApiKey {
                variable: self.translation_provider.key_variable(),
            });
        }

        Ok(())
    }

    /// Key for the selected translation provider
    pub fn active_api_key(&self) -> Option<&str> {
        match self.translation_provider {
            TranslationProvider::Gemini => self.gemini_api_key.as_deref(),
            TranslationProvider::OpenAi => self.openai_api_key.as_deref(),
        }
    }

    /// `tracing` filter directive for `LOG_LEVEL`
    pub fn log_directive(&self) -> &'static str {
        log_directive(&self.log_level)
    }
}

/// Map a log level name, accepting Python-style names, to a `tracing` directive
pub fn log_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" | "critical" | "fatal" => "error",
        _ => "info",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.secret_key, DEV_SECRET_KEY);
        assert_eq!(config.translation_provider, TranslationProvider::Gemini);
        assert_eq!(config.gemini_model, "gemini-1.5-flash-latest");
        assert_eq!(config.log_directive(), "info");
        assert!(config.validate().is_ok());
    }

    /// Collects formatted log output
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_environment_falls_back_with_warning() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            config_from(&[("APP_ENV", "prod")]).unwrap()
        });
        assert_eq!(config.environment, Environment::Development);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Unknown APP_ENV 'prod'"));
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = config_from(&[
            ("APP_ENV", "production"),
            ("SECRET_KEY", DEV_SECRET_KEY),
            ("GEMINI_API_KEY", "key"),
        ])
        .unwrap();
        assert_eq!(config.validate(), Err(ConfigError::InsecureSecretKey));

        let config = config_from(&[("APP_ENV", "production"), ("GEMINI_API_KEY", "key")]).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::InsecureSecretKey));
    }

    #[test]
    fn test_production_requires_provider_key() {
        let config = config_from(&[("APP_ENV", "production"), ("SECRET_KEY", "s3cret")]).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingApiKey {
                variable: "GEMINI_API_KEY"
            })
        );

        let config = config_from(&[
            ("APP_ENV", "production"),
            ("SECRET_KEY", "s3cret"),
            ("TRANSLATION_PROVIDER", "openai"),
            ("GEMINI_API_KEY", "key"),
        ])
        .unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingApiKey {
                variable: "OPENAI_API_KEY"
            })
        );
    }

    #[test]
    fn test_production_accepts_complete_settings() {
        let config = config_from(&[
            ("APP_ENV", "Production"),
            ("SECRET_KEY", "s3cret"),
            ("GEMINI_API_KEY", "key"),
            ("LOG_LEVEL", "WARNING"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.log_directive(), "warn");
        assert_eq!(log_directive("CRITICAL"), "error");
        assert_eq!(log_directive(""), "info");
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_from(&[("GEMINI_API_KEY", "  "), ("SECRET_KEY", "")]).unwrap();
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.secret_key, DEV_SECRET_KEY);
    }

    #[test]
    fn test_invalid_provider_name() {
        let err = config_from(&[("TRANSLATION_PROVIDER", "llama")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                variable: "TRANSLATION_PROVIDER",
                value: "llama".to_string()
            }
        );
    }
}
