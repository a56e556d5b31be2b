//! Structured output: generate typed objects from model responses.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::MindvoiceError;
use crate::provider::{ModelProvider, ProviderRequest};
use crate::types::*;

/// Generate a typed object by asking the model to produce JSON.
///
/// Uses JSON Schema response format if the model supports it,
/// otherwise uses system prompt instructions.
pub async fn generate_object<T: DeserializeOwned>(
    provider: &dyn ModelProvider,
    mut messages: Vec<ModelMessage>,
    settings: GenerationSettings,
    schema: serde_json::Value,
    type_name: &str,
) -> Result<GenerateObjectResult<T>, MindvoiceError> {
    let capabilities = provider.capabilities();
    let mut settings = settings;

    if capabilities.supports_json_schema {
        settings.response_format = Some(ResponseFormat::JsonSchema {
            schema,
            name: type_name.to_string(),
        });
    } else {
        let schema_text = serde_json::to_string_pretty(&schema)?;
        let schema_instruction = if capabilities.supports_json_mode {
            settings.response_format = Some(ResponseFormat::JsonObject);
            format!("You must respond with valid JSON matching this schema:\n```json\n{schema_text}\n```")
        } else {
            format!(
                "You must respond with ONLY valid JSON (no markdown, no explanation) matching this schema:\n```json\n{schema_text}\n```"
            )
        };
        messages.insert(0, ModelMessage::system(schema_instruction));
    }

    debug!(
        provider = provider.provider_name(),
        model = provider.model_id(),
        type_name,
        "generate_object: calling provider"
    );

    let response = provider
        .generate_text(&ProviderRequest { messages, settings })
        .await?;

    let object: T = serde_json::from_str(strip_code_fences(&response.text))?;

    Ok(GenerateObjectResult {
        object,
        usage: response.usage,
        finish_reason: response.finish_reason,
    })
}

/// Strip markdown code fences from JSON response.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let without_opening = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_opening
        .strip_suffix("```")
        .unwrap_or(without_opening)
        .trim()
}
