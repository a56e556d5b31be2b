//! Google Cloud Text-to-Speech provider (`/text:synthesize`).

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use super::tts::{validate_request, SpeechProvider};
use super::types::SpeechRequest;
use super::voices::VoiceTable;
use crate::error::MindvoiceError;
use crate::provider::http::{shared_client, status_to_error, trim_trailing_slash};
use crate::util::timeout::with_timeout;

pub const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct GoogleCloudTtsProvider {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GoogleCloudTtsProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_payload(request: &SpeechRequest) -> serde_json::Value {
        serde_json::json!({
            "input": { "text": request.text },
            "voice": {
                "languageCode": request.language_code,
                "name": request.voice.id,
            },
            "audioConfig": { "audioEncoding": "MP3" },
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: Option<String>,
}

#[async_trait]
impl SpeechProvider for GoogleCloudTtsProvider {
    fn provider_name(&self) -> &str {
        "google-cloud-tts"
    }

    fn default_voices(&self) -> VoiceTable {
        VoiceTable::google_cloud()
    }

    async fn generate_speech(&self, request: &SpeechRequest) -> Result<Vec<u8>, MindvoiceError> {
        if self.api_key.trim().is_empty() {
            return Err(MindvoiceError::Authentication(
                "Missing Google Cloud API key for speech generation".to_string(),
            ));
        }
        validate_request(request)?;

        let url = format!("{}/text:synthesize", trim_trailing_slash(&self.base_url));
        let payload = Self::build_payload(request);

        debug!(voice = %request.voice.id, language = %request.language_code, "Google TTS synthesize");

        with_timeout(self.timeout, async {
            let resp = shared_client()
                .post(url)
                .query(&[("key", self.api_key.as_str())])
                .json(&payload)
                .send()
                .await?;

            let status = resp.status().as_u16();
            if status != 200 {
                let body = resp.text().await.unwrap_or_default();
                return Err(status_to_error(status, &body));
            }

            let body = resp.text().await?;
            let parsed: SynthesizeResponse = serde_json::from_str(&body)?;
            let encoded = parsed.audio_content.filter(|c| !c.is_empty()).ok_or_else(|| {
                MindvoiceError::InvalidState("Speech response missing audioContent".to_string())
            })?;

            base64::engine::general_purpose::STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| MindvoiceError::Synthesis(format!("Invalid base64 audio: {e}")))
        })
        .await
    }
}
