//! Static voice tables keyed by language-region code.

use super::types::Voice;

pub const DEFAULT_LANGUAGE_CODE: &str = "en-IN";

const EDGE_VOICES: &[(&str, &str)] = &[
    ("en-IN", "en-IN-NeerjaNeural"),
    ("en-US", "en-US-AriaNeural"),
    ("en-GB", "en-GB-SoniaNeural"),
    ("hi-IN", "hi-IN-SwaraNeural"),
    ("bn-IN", "bn-IN-TanishaaNeural"),
    ("gu-IN", "gu-IN-DhwaniNeural"),
    ("kn-IN", "kn-IN-SapnaNeural"),
    ("ml-IN", "ml-IN-SobhanaNeural"),
    ("mr-IN", "mr-IN-AarohiNeural"),
    ("ta-IN", "ta-IN-PallaviNeural"),
    ("te-IN", "te-IN-ShrutiNeural"),
];

const GOOGLE_CLOUD_VOICES: &[(&str, &str)] = &[
    ("en-IN", "en-IN-Neural2-A"),
    ("en-US", "en-US-Neural2-F"),
    ("en-GB", "en-GB-Neural2-A"),
    ("hi-IN", "hi-IN-Neural2-A"),
    ("bn-IN", "bn-IN-Wavenet-A"),
    ("gu-IN", "gu-IN-Wavenet-A"),
    ("kn-IN", "kn-IN-Wavenet-A"),
    ("ml-IN", "ml-IN-Wavenet-A"),
    ("mr-IN", "mr-IN-Wavenet-A"),
    ("ta-IN", "ta-IN-Wavenet-A"),
    ("te-IN", "te-IN-Standard-A"),
];

/// Maps language-region codes to voice ids, falling back to the `en-IN` voice.
#[derive(Debug, Clone, Copy)]
pub struct VoiceTable {
    provider: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl VoiceTable {
    /// Neural voices for the `edge-tts` command-line tool.
    pub const fn edge() -> Self {
        Self {
            provider: "edge-tts",
            entries: EDGE_VOICES,
        }
    }

    /// Voices for the Google Cloud Text-to-Speech API.
    pub const fn google_cloud() -> Self {
        Self {
            provider: "google-cloud-tts",
            entries: GOOGLE_CLOUD_VOICES,
        }
    }

    /// Voice id for `language_code`, or the default voice when unknown.
    ///
    /// Matching ignores ASCII case and accepts `_` in place of `-`.
    pub fn voice_id(&self, language_code: &str) -> &'static str {
        self.lookup(language_code)
            .or_else(|| self.lookup(DEFAULT_LANGUAGE_CODE))
            .unwrap_or(self.entries[0].1)
    }

    pub fn voice(&self, language_code: &str) -> Voice {
        Voice {
            id: self.voice_id(language_code).to_string(),
            provider: self.provider.to_string(),
        }
    }

    /// Whether `language_code` has its own entry.
    pub fn contains(&self, language_code: &str) -> bool {
        self.lookup(language_code).is_some()
    }

    pub fn language_codes(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(code, _)| *code)
    }

    fn lookup(&self, language_code: &str) -> Option<&'static str> {
        let wanted = language_code.trim().replace('_', "-");
        self.entries
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(&wanted))
            .map(|(_, voice)| *voice)
    }
}

impl Default for VoiceTable {
    fn default() -> Self {
        Self::edge()
    }
}
