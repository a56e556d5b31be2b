//! Supabase Storage and PostgREST clients.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use tracing::debug;

use super::{ObjectStore, RecordStore, StoredObject};
use crate::error::MindvoiceError;
use crate::provider::http::{shared_client, status_to_error, trim_trailing_slash};

pub const DEFAULT_BUCKET: &str = "learning-assets";
pub const DEFAULT_TABLE: &str = "learning_space";

fn supabase_headers(service_key: &str) -> Result<HeaderMap, MindvoiceError> {
    let mut headers = HeaderMap::new();
    let key = HeaderValue::from_str(service_key)
        .map_err(|e| MindvoiceError::Configuration(format!("Invalid Supabase key: {e}")))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {service_key}"))
        .map_err(|e| MindvoiceError::Configuration(format!("Invalid Supabase key: {e}")))?;
    headers.insert("apikey", key);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

/// Percent-encode each `/`-separated segment of an object path.
fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Supabase Storage bucket (`/storage/v1`).
#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            service_key: service_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: Option<String>,
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, MindvoiceError> {
        if path.trim().is_empty() {
            return Err(MindvoiceError::InvalidArgument(
                "Object path cannot be empty".to_string(),
            ));
        }

        let url = format!(
            "{}/storage/v1/object/{}/{}",
            trim_trailing_slash(&self.base_url),
            urlencoding::encode(&self.bucket),
            encode_object_path(path)
        );
        let mut headers = supabase_headers(&self.service_key)?;
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type).map_err(|e| {
                MindvoiceError::InvalidArgument(format!("Invalid content type: {e}"))
            })?,
        );
        headers.insert("x-upsert", HeaderValue::from_static("true"));

        debug!(bucket = %self.bucket, path, size = bytes.len(), "Supabase upload");

        let resp = shared_client()
            .post(url)
            .headers(headers)
            .body(bytes)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(match status_to_error(status, &body) {
                MindvoiceError::Api { status, message } => {
                    MindvoiceError::Storage(format!("upload rejected ({status}): {message}"))
                }
                other => other,
            });
        }

        let body = resp.text().await?;
        let key = serde_json::from_str::<UploadResponse>(&body)
            .ok()
            .and_then(|r| r.key)
            .unwrap_or_else(|| format!("{}/{}", self.bucket, path));

        Ok(StoredObject { key })
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            trim_trailing_slash(&self.base_url),
            urlencoding::encode(&self.bucket),
            encode_object_path(path)
        )
    }
}

/// A PostgREST table (`/rest/v1/{table}`) whose rows are patched by `id`.
#[derive(Debug, Clone)]
pub struct SupabaseRecords {
    base_url: String,
    service_key: String,
    table: String,
}

impl SupabaseRecords {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            service_key: service_key.into(),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}

#[async_trait]
impl RecordStore for SupabaseRecords {
    async fn update_record(
        &self,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<(), MindvoiceError> {
        let url = format!(
            "{}/rest/v1/{}",
            trim_trailing_slash(&self.base_url),
            self.table
        );
        let mut headers = supabase_headers(&self.service_key)?;
        headers.insert("Prefer", HeaderValue::from_static("return=minimal"));

        debug!(table = %self.table, id, "Supabase record update");

        let filter = format!("eq.{id}");
        let resp = shared_client()
            .patch(url)
            .headers(headers)
            .query(&[("id", filter.as_str())])
            .json(&fields)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_points_at_public_bucket_path() {
        let storage = SupabaseStorage::new("https://proj.supabase.co/", "key").with_bucket("maps");
        assert_eq!(
            storage.public_url("mindmap_1_20240101_000000.html"),
            "https://proj.supabase.co/storage/v1/object/public/maps/mindmap_1_20240101_000000.html"
        );
    }

    #[test]
    fn reserved_characters_in_paths_are_encoded() {
        let storage = SupabaseStorage::new("https://proj.supabase.co", "key");
        assert_eq!(
            storage.public_url("mindmap_a?b#c d_20240101_000000.html"),
            "https://proj.supabase.co/storage/v1/object/public/learning-assets/mindmap_a%3Fb%23c%20d_20240101_000000.html"
        );
        assert_eq!(encode_object_path("spaces/7/map.html"), "spaces/7/map.html");
    }

    #[test]
    fn rejects_keys_that_cannot_be_headers() {
        assert!(matches!(
            supabase_headers("bad\nkey"),
            Err(MindvoiceError::Configuration(_))
        ));
    }
}
