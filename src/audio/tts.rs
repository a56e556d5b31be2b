//! Text-to-speech trait.

use async_trait::async_trait;

use super::types::SpeechRequest;
use super::voices::VoiceTable;
use crate::error::MindvoiceError;

/// Trait for text-to-speech providers.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Short provider name used in logs and [`Voice::provider`](super::Voice).
    fn provider_name(&self) -> &str;

    /// Voice table whose ids this provider accepts.
    fn default_voices(&self) -> VoiceTable;

    /// Generate speech audio from text.
    async fn generate_speech(&self, request: &SpeechRequest) -> Result<Vec<u8>, MindvoiceError>;
}

pub(crate) fn validate_request(request: &SpeechRequest) -> Result<(), MindvoiceError> {
    if request.text.trim().is_empty() {
        return Err(MindvoiceError::InvalidArgument(
            "Speech text cannot be empty".to_string(),
        ));
    }
    if request.voice.id.trim().is_empty() {
        return Err(MindvoiceError::InvalidArgument(
            "Voice id cannot be empty".to_string(),
        ));
    }
    Ok(())
}
