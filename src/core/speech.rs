//! Text-to-speech client producing base64 audio data URLs

use base64::Engine;
use std::sync::Arc;
use tracing::{debug, error};

use crate::core::config::AppConfig;
use crate::core::errors::SpeechError;
use crate::core::providers::{EdgeTtsSynthesizer, SpeechSynthesizer};
use crate::core::voices::VoiceMap;

const DATA_URL_PREFIX: &str = "data:audio/mp3;base64,";

/// Speech client wrapping a synthesis provider
#[derive(Clone)]
pub struct SpeechClient {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    voices: VoiceMap,
}

impl SpeechClient {
    /// Create a client around any synthesizer and voice table
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, voices: VoiceMap) -> Self {
        Self { synthesizer, voices }
    }

    /// Create the HTTP synthesizer described by configuration
    pub fn from_config(config: &AppConfig, http: reqwest::Client) -> Self {
        let synthesizer = EdgeTtsSynthesizer::new(
            http,
            config.tts_endpoint.clone(),
            config.tts_api_key.clone(),
        );
        Self::new(Arc::new(synthesizer), VoiceMap::builtin())
    }

    /// Voice table used for language lookup
    pub fn voices(&self) -> &VoiceMap {
        &self.voices
    }

    /// Synthesize `text` and return a `data:audio/mp3;base64,...` URL
    pub async fn synthesize(&self, text: &str, language: &str) -> Result<String, SpeechError> {
        let audio = self.synthesize_audio(text, language).await?;
        Ok(to_data_url(&audio))
    }

    /// Synthesize `text` and return the raw mp3 bytes
    pub async fn synthesize_audio(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        self.render(text, language).await.map_err(|e| {
            error!("Speech generation error: {}", e);
            e
        })
    }

    async fn render(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        let voice = self.voices.voice_for(language);
        debug!("Synthesizing {} chars in {} with {}", text.len(), language, voice);

        // Removed when dropped, on every return path
        let audio_file = tempfile::Builder::new()
            .prefix("speech-")
            .suffix(".mp3")
            .tempfile()?;

        self.synthesizer.save(text, voice, audio_file.path()).await?;

        let audio = tokio::fs::read(audio_file.path()).await?;
        Ok(audio)
    }
}

/// Wrap mp3 bytes as a data URL
pub fn to_data_url(audio: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(audio);
    format!("{DATA_URL_PREFIX}{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ProviderError;
    use crate::core::voices::DEFAULT_VOICE;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// Writes fixed bytes and records the voice and file used
    struct StubSynthesizer {
        audio: Option<&'static [u8]>,
        calls: Mutex<Vec<(String, PathBuf)>>,
    }

    impl StubSynthesizer {
        fn new(audio: Option<&'static [u8]>) -> Arc<Self> {
            Arc::new(Self {
                audio,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn last_call(&self) -> (String, PathBuf) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for StubSynthesizer {
        async fn save(&self, _text: &str, voice: &str, path: &Path) -> Result<(), ProviderError> {
            self.calls
                .lock()
                .unwrap()
                .push((voice.to_string(), path.to_path_buf()));
            match self.audio {
                Some(audio) => {
                    tokio::fs::write(path, audio).await?;
                    Ok(())
                }
                None => Err(ProviderError::NetworkError {
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_synthesize_returns_data_url() {
        let stub = StubSynthesizer::new(Some(b"ABC"));
        let client = SpeechClient::new(stub.clone(), VoiceMap::builtin());

        let url = client.synthesize("Hello", "en").await.unwrap();
        assert_eq!(url, "data:audio/mp3;base64,QUJD");
    }

    #[tokio::test]
    async fn test_synthesize_selects_mapped_voice() {
        let stub = StubSynthesizer::new(Some(b"ABC"));
        let client = SpeechClient::new(stub.clone(), VoiceMap::builtin());

        client.synthesize("Bonjour", "fr").await.unwrap();
        assert_eq!(stub.last_call().0, "fr-FR-HenriNeural");

        client.synthesize("Jambo", "sw").await.unwrap();
        assert_eq!(stub.last_call().0, DEFAULT_VOICE);
    }

    #[tokio::test]
    async fn test_temporary_file_removed_after_success() {
        let stub = StubSynthesizer::new(Some(b"ABC"));
        let client = SpeechClient::new(stub.clone(), VoiceMap::builtin());

        let audio = client.synthesize_audio("Hello", "en").await.unwrap();
        assert_eq!(audio, b"ABC");

        let (_, path) = stub.last_call();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp3"));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_temporary_file_removed_after_failure() {
        let stub = StubSynthesizer::new(None);
        let client = SpeechClient::new(stub.clone(), VoiceMap::builtin());

        let err = client.synthesize("Hello", "en").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Speech generation failed: Network error: connection refused"
        );

        let (_, path) = stub.last_call();
        assert!(!path.exists());
    }

    #[test]
    fn test_data_url_encoding() {
        assert_eq!(to_data_url(b""), "data:audio/mp3;base64,");
        assert_eq!(to_data_url(b"hi"), "data:audio/mp3;base64,aGk=");
    }
}
