//! Shared test helpers: mock model provider and in-memory stores.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use mindvoice::audio::{SpeechProvider, SpeechRequest, VoiceTable};
use mindvoice::error::MindvoiceError;
use mindvoice::models::ModelCapabilities;
use mindvoice::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use mindvoice::storage::{ObjectStore, RecordStore, StoredObject};
use mindvoice::types::*;

/// A mock provider that returns canned responses.
pub struct MockProvider {
    model_id: String,
    capabilities: ModelCapabilities,
    responses: Mutex<Vec<Result<ProviderResponse, MindvoiceError>>>,
    pub requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            capabilities: ModelCapabilities::structured(),
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_capabilities(mut self, capabilities: ModelCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Queue a text response.
    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push(Ok(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            finish_reason: Some(FinishReason::Stop),
        }));
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: MindvoiceError) {
        self.responses.lock().unwrap().push(Err(error));
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, MindvoiceError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(MindvoiceError::InvalidState("no queued response".into()));
        }
        responses.remove(0)
    }
}

/// An uploaded object as seen by [`MemoryObjectStore`].
#[derive(Debug, Clone)]
pub struct Upload {
    pub path: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Object store that keeps uploads in memory, or rejects them all.
#[derive(Default)]
pub struct MemoryObjectStore {
    pub uploads: Mutex<Vec<Upload>>,
    fail: bool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, MindvoiceError> {
        if self.fail {
            return Err(MindvoiceError::Storage("bucket unavailable".into()));
        }
        self.uploads.lock().unwrap().push(Upload {
            path: path.to_string(),
            bytes,
            content_type: content_type.to_string(),
        });
        Ok(StoredObject {
            key: format!("test-bucket/{path}"),
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://cdn.test/public/{path}")
    }
}

/// Record store that remembers every update.
#[derive(Default)]
pub struct MemoryRecordStore {
    pub updates: Mutex<Vec<(String, serde_json::Value)>>,
    fail: bool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            updates: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn updates(&self) -> Vec<(String, serde_json::Value)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn update_record(
        &self,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<(), MindvoiceError> {
        if self.fail {
            return Err(MindvoiceError::api(500, "database offline"));
        }
        self.updates.lock().unwrap().push((id.to_string(), fields));
        Ok(())
    }
}

/// Speech provider returning fixed bytes or a fixed error.
pub struct StubSpeechProvider {
    result: Mutex<Option<Result<Vec<u8>, MindvoiceError>>>,
    pub requests: Mutex<Vec<SpeechRequest>>,
}

impl StubSpeechProvider {
    pub fn returning(audio: &[u8]) -> Self {
        Self {
            result: Mutex::new(Some(Ok(audio.to_vec()))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: MindvoiceError) -> Self {
        Self {
            result: Mutex::new(Some(Err(error))),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SpeechProvider for StubSpeechProvider {
    fn provider_name(&self) -> &str {
        "stub"
    }

    fn default_voices(&self) -> VoiceTable {
        VoiceTable::edge()
    }

    async fn generate_speech(&self, request: &SpeechRequest) -> Result<Vec<u8>, MindvoiceError> {
        self.requests.lock().unwrap().push(request.clone());
        self.result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(MindvoiceError::InvalidState("stub already used".into())))
    }
}

pub fn sample_mindmap_json() -> &'static str {
    r#"{
        "central_node": "photo",
        "nodes": [
            {"id": "photo", "label": "Photosynthesis"},
            {"id": "light", "label": "Sunlight"},
            {"id": "water", "label": "Water"},
            {"id": "chl", "label": "Chlorophyll"}
        ],
        "edges": [
            {"source": "photo", "target": "light"},
            {"source": "photo", "target": "water"},
            {"source": "light", "target": "chl"}
        ]
    }"#
}
