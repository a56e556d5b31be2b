//! Synthesize narration for a piece of text and upload it.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::tts::SpeechProvider;
use super::types::{SpeechRequest, SpeechUpload, MP3_CONTENT_TYPE};
use super::voices::VoiceTable;
use crate::error::MindvoiceError;
use crate::policy::FailurePolicy;
use crate::storage::{audio_filename, upload_artifact, ObjectStore};

/// Voice lookup, synthesis, and upload in one step.
///
/// Voices come from the provider's own table unless overridden with
/// [`with_voices`](Self::with_voices). With no provider configured (for
/// example when cloud credentials are absent) every call uploads an empty
/// payload.
pub struct SpeechSynthesizer {
    provider: Option<Arc<dyn SpeechProvider>>,
    voices: VoiceTable,
    store: Arc<dyn ObjectStore>,
    policy: FailurePolicy,
}

impl SpeechSynthesizer {
    pub fn new(provider: Option<Arc<dyn SpeechProvider>>, store: Arc<dyn ObjectStore>) -> Self {
        let voices = provider
            .as_ref()
            .map(|p| p.default_voices())
            .unwrap_or_default();
        Self {
            provider,
            voices,
            store,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_voices(mut self, voices: VoiceTable) -> Self {
        self.voices = voices;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn voices(&self) -> &VoiceTable {
        &self.voices
    }

    /// Convert `text` to MP3 audio in the voice for `language_code` and upload it
    /// as `audio_{YYYYMMDD_HHMMSS}.mp3`.
    pub async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<SpeechUpload, MindvoiceError> {
        let (audio, degraded) = self.synthesize_audio(text, language_code).await?;

        let filename = audio_filename(&chrono::Local::now());
        let audio_bytes = audio.len();

        match upload_artifact(
            self.store.as_ref(),
            &filename,
            audio,
            MP3_CONTENT_TYPE,
        )
        .await
        {
            Ok(artifact) => {
                info!(filename = %artifact.file_path, audio_bytes, degraded, "TTS audio uploaded");
                Ok(SpeechUpload {
                    success: true,
                    filename: artifact.file_path,
                    public_url: Some(artifact.public_url),
                    audio_bytes,
                    degraded,
                })
            }
            Err(e) if self.policy.degrades() => {
                error!(filename = %filename, error = %e, "Failed to upload TTS audio");
                Ok(SpeechUpload {
                    success: false,
                    filename,
                    public_url: None,
                    audio_bytes,
                    degraded: true,
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn synthesize_audio(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<(Vec<u8>, bool), MindvoiceError> {
        let Some(provider) = &self.provider else {
            info!("No speech provider configured; uploading empty audio");
            return Ok((Vec::new(), true));
        };

        let request = SpeechRequest {
            text: text.to_string(),
            voice: self.voices.voice(language_code),
            language_code: language_code.to_string(),
        };

        match provider.generate_speech(&request).await {
            Ok(audio) => Ok((audio, false)),
            Err(e) if self.policy.degrades() => {
                warn!(
                    provider = provider.provider_name(),
                    voice = %request.voice.id,
                    error = %e,
                    "Speech synthesis failed; uploading empty audio"
                );
                Ok((Vec::new(), true))
            }
            Err(e) => Err(e),
        }
    }
}
