//! Audio-related types.

use serde::{Deserialize, Serialize};

/// Content type of every uploaded narration file.
pub const MP3_CONTENT_TYPE: &str = "audio/mpeg";

/// Voice for text-to-speech.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Voice {
    pub id: String,
    pub provider: String,
}

/// Request for speech synthesis.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: Voice,
    /// Language-region code such as `en-IN`.
    pub language_code: String,
}

/// Outcome of the synthesize-and-upload step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeechUpload {
    pub success: bool,
    pub filename: String,
    pub public_url: Option<String>,
    /// Length of the uploaded payload; zero when synthesis degraded.
    pub audio_bytes: usize,
    /// Synthesis failed or was skipped and an empty payload was uploaded.
    pub degraded: bool,
}
