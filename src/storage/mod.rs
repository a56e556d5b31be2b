//! Object storage, record updates, and the publish step that ties them together.

pub mod supabase;

pub use supabase::{SupabaseRecords, SupabaseStorage};

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::MindvoiceError;

/// Timestamp layout used in generated artifact names (one-second granularity).
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Handle returned by a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredObject {
    /// Store-specific key of the uploaded object.
    pub key: String,
}

/// An uploaded artifact and where to fetch it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublishedArtifact {
    pub file_path: String,
    pub public_url: String,
}

/// A bucket-like store for generated artifacts.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` under `path`.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, MindvoiceError>;

    /// Public URL for an object at `path`.
    fn public_url(&self, path: &str) -> String;
}

/// A table of records whose fields can be patched by id.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn update_record(
        &self,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<(), MindvoiceError>;
}

/// `mindmap_{space_id}_{YYYYMMDD_HHMMSS}.html`
pub fn mindmap_filename<Tz: TimeZone>(space_id: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "mindmap_{space_id}_{}.html",
        at.format(FILENAME_TIMESTAMP_FORMAT)
    )
}

/// `audio_{YYYYMMDD_HHMMSS}.mp3`
pub fn audio_filename<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("audio_{}.mp3", at.format(FILENAME_TIMESTAMP_FORMAT))
}

/// Upload `bytes` as `filename` and resolve its public URL.
pub async fn upload_artifact(
    store: &dyn ObjectStore,
    filename: &str,
    bytes: Vec<u8>,
    content_type: &str,
) -> Result<PublishedArtifact, MindvoiceError> {
    let size = bytes.len();
    let stored = store.upload(filename, bytes, content_type).await?;
    let public_url = store.public_url(filename);
    info!(filename, key = %stored.key, size, "Artifact uploaded");
    Ok(PublishedArtifact {
        file_path: filename.to_string(),
        public_url,
    })
}

/// Uploads artifacts and writes their URLs back into records.
#[derive(Clone)]
pub struct ArtifactPublisher {
    store: Arc<dyn ObjectStore>,
    records: Arc<dyn RecordStore>,
}

impl ArtifactPublisher {
    pub fn new(store: Arc<dyn ObjectStore>, records: Arc<dyn RecordStore>) -> Self {
        Self { store, records }
    }

    /// Upload an artifact and resolve its public URL.
    ///
    /// Upload failures are logged and reported as `None`.
    pub async fn publish(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Option<PublishedArtifact> {
        match upload_artifact(self.store.as_ref(), filename, bytes, content_type).await {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                error!(filename, error = %e, "Failed to upload artifact");
                None
            }
        }
    }

    /// Write `value` into `field` of record `id`.
    pub async fn update_record(
        &self,
        id: &str,
        field: &str,
        value: &str,
    ) -> Result<(), MindvoiceError> {
        let mut fields = serde_json::Map::new();
        fields.insert(field.to_string(), serde_json::Value::String(value.to_string()));
        self.records
            .update_record(id, serde_json::Value::Object(fields))
            .await
    }
}
