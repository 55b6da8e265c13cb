//! Language code to edge-tts voice mapping

/// Voice used when a language has no entry
pub const DEFAULT_VOICE: &str = "en-US-ChristopherNeural";

const VOICES: &[(&str, &str)] = &[
    ("en", "en-US-ChristopherNeural"),
    ("es", "es-ES-AlvaroNeural"),
    ("fr", "fr-FR-HenriNeural"),
    ("de", "de-DE-ConradNeural"),
    ("it", "it-IT-DiegoNeural"),
    ("pt", "pt-BR-AntonioNeural"),
    ("ru", "ru-RU-DmitryNeural"),
    ("zh", "zh-CN-YunxiNeural"),
    ("ja", "ja-JP-KeitaNeural"),
    ("ko", "ko-KR-InJoonNeural"),
    ("ar", "ar-EG-ShakirNeural"),
    ("hi", "hi-IN-MadhurNeural"),
    ("bn", "bn-BD-NabanitaNeural"),
];

/// Read-only voice lookup
#[derive(Debug, Clone, Copy)]
pub struct VoiceMap {
    entries: &'static [(&'static str, &'static str)],
    default_voice: &'static str,
}

impl Default for VoiceMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl VoiceMap {
    /// The built-in table
    pub const fn builtin() -> Self {
        Self {
            entries: VOICES,
            default_voice: DEFAULT_VOICE,
        }
    }

    /// Voice for `language`, or the default voice
    pub fn voice_for(&self, language: &str) -> &'static str {
        self.get(language).unwrap_or(self.default_voice)
    }

    /// Exact lookup without fallback
    pub fn get(&self, language: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(code, _)| *code == language)
            .map(|(_, voice)| *voice)
    }

    /// Fallback voice
    pub fn default_voice(&self) -> &'static str {
        self.default_voice
    }

    /// All `(language, voice)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}
