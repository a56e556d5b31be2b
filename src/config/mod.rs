//! Configuration loaded from the environment (and `.env`), plus builders for
//! the providers and stores it describes.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;

use crate::audio::{
    EdgeTtsProvider, GoogleCloudTtsProvider, SpeechProvider, SpeechSynthesizer, VoiceTable,
};
use crate::error::MindvoiceError;
use crate::mindmap::{LabelMode, MindMapGenerator};
use crate::models::GoogleModel;
use crate::policy::FailurePolicy;
use crate::provider::google::GoogleProvider;
use crate::storage::supabase::{DEFAULT_BUCKET, DEFAULT_TABLE};
use crate::storage::{ArtifactPublisher, SupabaseRecords, SupabaseStorage};

const DEFAULT_TTS_TIMEOUT_SECS: u64 = 60;

/// Which speech backend narrates text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SpeechEngine {
    /// The `edge-tts` command-line tool.
    #[default]
    Edge,
    /// Google Cloud Text-to-Speech.
    GoogleCloud,
    /// No synthesis; uploads empty audio.
    Disabled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MindvoiceConfig {
    pub google_api_key: Option<String>,
    pub google_base_url: Option<String>,
    pub mindmap_model: GoogleModel,
    pub mindmap_labels: LabelMode,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub supabase_bucket: String,
    pub supabase_table: String,
    pub speech_engine: SpeechEngine,
    pub edge_tts_program: String,
    pub tts_timeout: Duration,
    pub google_tts_api_key: Option<String>,
    pub failure_policy: FailurePolicy,
}

impl Default for MindvoiceConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_base_url: None,
            mindmap_model: GoogleModel::default(),
            mindmap_labels: LabelMode::default(),
            supabase_url: None,
            supabase_key: None,
            supabase_bucket: DEFAULT_BUCKET.to_string(),
            supabase_table: DEFAULT_TABLE.to_string(),
            speech_engine: SpeechEngine::default(),
            edge_tts_program: crate::audio::edge::DEFAULT_PROGRAM.to_string(),
            tts_timeout: Duration::from_secs(DEFAULT_TTS_TIMEOUT_SECS),
            google_tts_api_key: None,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl MindvoiceConfig {
    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.google_api_key = get("GOOGLE_API_KEY").or_else(|| get("GEMINI_API_KEY"));
        config.google_base_url = get("GOOGLE_BASE_URL");
        if let Some(model) = get("MINDMAP_MODEL") {
            // EnumString falls back to `Custom`, so this cannot fail.
            config.mindmap_model = model.parse().unwrap_or(GoogleModel::Custom(model));
        }

        if let Some(labels) = get("MINDMAP_LABELS") {
            match labels.parse() {
                Ok(labels) => config.mindmap_labels = labels,
                Err(_) => warn!(value = %labels, "Unknown MINDMAP_LABELS; using default"),
            }
        }

        config.supabase_url = get("SUPABASE_URL");
        config.supabase_key = get("SUPABASE_KEY").or_else(|| get("SUPABASE_SERVICE_ROLE_KEY"));
        if let Some(bucket) = get("SUPABASE_BUCKET") {
            config.supabase_bucket = bucket;
        }
        if let Some(table) = get("SUPABASE_TABLE") {
            config.supabase_table = table;
        }

        if let Some(engine) = get("TTS_ENGINE") {
            match engine.parse() {
                Ok(engine) => config.speech_engine = engine,
                Err(_) => warn!(value = %engine, "Unknown TTS_ENGINE; using default"),
            }
        }
        if let Some(program) = get("EDGE_TTS_BIN") {
            config.edge_tts_program = program;
        }
        if let Some(secs) = get("TTS_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(n) if n > 0 => config.tts_timeout = Duration::from_secs(n),
                _ => warn!(value = %secs, "Invalid TTS_TIMEOUT_SECS; using default"),
            }
        }
        config.google_tts_api_key = get("GOOGLE_TTS_API_KEY");

        if let Some(policy) = get("FAILURE_POLICY") {
            match policy.parse() {
                Ok(policy) => config.failure_policy = policy,
                Err(_) => warn!(value = %policy, "Unknown FAILURE_POLICY; using default"),
            }
        }

        config
    }

    /// Gemini provider for the configured mind-map model.
    pub fn google_provider(&self) -> Result<GoogleProvider, MindvoiceError> {
        let api_key = self
            .google_api_key
            .clone()
            .ok_or_else(|| MindvoiceError::Authentication("Missing GOOGLE_API_KEY".into()))?;
        let provider = GoogleProvider::new(self.mindmap_model.clone(), api_key);
        Ok(match &self.google_base_url {
            Some(url) => provider.with_base_url(url.clone()),
            None => provider,
        })
    }

    fn supabase_credentials(&self) -> Result<(String, String), MindvoiceError> {
        let url = self
            .supabase_url
            .clone()
            .ok_or_else(|| MindvoiceError::Configuration("Missing SUPABASE_URL".into()))?;
        let key = self
            .supabase_key
            .clone()
            .ok_or_else(|| MindvoiceError::Authentication("Missing SUPABASE_KEY".into()))?;
        Ok((url, key))
    }

    pub fn supabase_storage(&self) -> Result<SupabaseStorage, MindvoiceError> {
        let (url, key) = self.supabase_credentials()?;
        Ok(SupabaseStorage::new(url, key).with_bucket(self.supabase_bucket.clone()))
    }

    pub fn supabase_records(&self) -> Result<SupabaseRecords, MindvoiceError> {
        let (url, key) = self.supabase_credentials()?;
        Ok(SupabaseRecords::new(url, key).with_table(self.supabase_table.clone()))
    }

    pub fn publisher(&self) -> Result<ArtifactPublisher, MindvoiceError> {
        Ok(ArtifactPublisher::new(
            Arc::new(self.supabase_storage()?),
            Arc::new(self.supabase_records()?),
        ))
    }

    /// Speech provider for the configured engine, or `None` when synthesis is
    /// disabled or cloud credentials are missing.
    pub fn speech_provider(&self) -> Option<Arc<dyn SpeechProvider>> {
        match self.speech_engine {
            SpeechEngine::Edge => Some(Arc::new(
                EdgeTtsProvider::new(&self.edge_tts_program).with_timeout(self.tts_timeout),
            )),
            SpeechEngine::GoogleCloud => match &self.google_tts_api_key {
                Some(key) => Some(Arc::new(
                    GoogleCloudTtsProvider::new(key.clone()).with_timeout(self.tts_timeout),
                )),
                None => {
                    warn!("GOOGLE_TTS_API_KEY not set; speech synthesis disabled");
                    None
                }
            },
            SpeechEngine::Disabled => None,
        }
    }

    pub fn voice_table(&self) -> VoiceTable {
        match self.speech_engine {
            SpeechEngine::GoogleCloud => VoiceTable::google_cloud(),
            SpeechEngine::Edge | SpeechEngine::Disabled => VoiceTable::edge(),
        }
    }

    pub fn mindmap_generator(&self) -> Result<MindMapGenerator, MindvoiceError> {
        Ok(
            MindMapGenerator::new(Arc::new(self.google_provider()?), self.publisher()?)
                .with_policy(self.failure_policy)
                .with_label_mode(self.mindmap_labels),
        )
    }

    pub fn speech_synthesizer(&self) -> Result<SpeechSynthesizer, MindvoiceError> {
        Ok(
            SpeechSynthesizer::new(self.speech_provider(), Arc::new(self.supabase_storage()?))
                .with_voices(self.voice_table())
                .with_policy(self.failure_policy),
        )
    }
}
