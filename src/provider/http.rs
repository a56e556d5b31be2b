//! Shared HTTP client and status mapping.

use std::sync::OnceLock;

use crate::error::MindvoiceError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

/// Map a non-success HTTP status to an error.
pub fn status_to_error(status: u16, body: &str) -> MindvoiceError {
    match status {
        401 | 403 => MindvoiceError::Authentication(body.to_string()),
        429 => MindvoiceError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => MindvoiceError::api(status, body),
    }
}

/// Strip trailing slashes from a configured base URL.
pub fn trim_trailing_slash(url: &str) -> &str {
    url.trim_end_matches('/')
}

fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}
