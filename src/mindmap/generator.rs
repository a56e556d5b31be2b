//! The mind-map flow: prompt, generate, render, upload, record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::prompt::{build_messages, StudentProfile};
use super::render::{render_html_with, LabelMode};
use super::types::MindMapStructure;
use crate::error::MindvoiceError;
use crate::generation::generate_object;
use crate::policy::FailurePolicy;
use crate::provider::ModelProvider;
use crate::storage::{mindmap_filename, ArtifactPublisher};
use crate::types::GenerationSettings;

/// Record field that receives the mind map's public URL.
pub const MINDMAP_FIELD: &str = "mindmap";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Input to one mind-map generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MindMapRequest {
    pub learning_space_id: String,
    #[serde(default)]
    pub student_profile: StudentProfile,
    #[serde(default)]
    pub summary_notes: String,
}

/// Generates a mind map with a language model and publishes it as HTML.
pub struct MindMapGenerator {
    provider: Arc<dyn ModelProvider>,
    publisher: ArtifactPublisher,
    settings: GenerationSettings,
    policy: FailurePolicy,
    labels: LabelMode,
}

impl MindMapGenerator {
    pub fn new(provider: Arc<dyn ModelProvider>, publisher: ArtifactPublisher) -> Self {
        Self {
            provider,
            publisher,
            settings: GenerationSettings::default(),
            policy: FailurePolicy::default(),
            labels: LabelMode::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_label_mode(mut self, labels: LabelMode) -> Self {
        self.labels = labels;
        self
    }

    /// Run the flow for one learning space.
    ///
    /// When the upload fails the record is left untouched and the generated
    /// structure is still returned. When generation fails the policy decides
    /// between an empty structure and the error.
    pub async fn run(&self, request: &MindMapRequest) -> Result<MindMapStructure, MindvoiceError> {
        info!(learning_space_id = %request.learning_space_id, "Running mindmap node");

        match self.generate_and_publish(request).await {
            Ok(map) => Ok(map),
            Err(e) if self.policy.degrades() => {
                error!(
                    learning_space_id = %request.learning_space_id,
                    error = %e,
                    "Error in mindmap generation; returning empty mindmap"
                );
                Ok(MindMapStructure::empty())
            }
            Err(e) => Err(e),
        }
    }

    async fn generate_and_publish(
        &self,
        request: &MindMapRequest,
    ) -> Result<MindMapStructure, MindvoiceError> {
        let messages = build_messages(&request.student_profile, &request.summary_notes);
        let result = generate_object::<MindMapStructure>(
            self.provider.as_ref(),
            messages,
            self.settings.clone(),
            MindMapStructure::json_schema(),
            "MindMapStructure",
        )
        .await?;

        info!(
            nodes = result.object.nodes.len(),
            edges = result.object.edges.len(),
            output_tokens = result.usage.output_tokens,
            finish_reason = ?result.finish_reason,
            "LLM response completed"
        );

        let map = result.object;
        let html = render_html_with(&map, self.labels);
        let filename = mindmap_filename(&request.learning_space_id, &chrono::Local::now());

        let Some(artifact) = self
            .publisher
            .publish(&filename, html.into_bytes(), HTML_CONTENT_TYPE)
            .await
        else {
            warn!(filename = %filename, "Failed to upload mindmap, skipping database update");
            return Ok(map);
        };

        self.publisher
            .update_record(&request.learning_space_id, MINDMAP_FIELD, &artifact.public_url)
            .await?;

        info!(public_url = %artifact.public_url, "Mindmap updated in database");
        Ok(map)
    }
}
