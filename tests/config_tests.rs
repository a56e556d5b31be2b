//! Tests for environment-driven configuration.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use mindvoice::config::{MindvoiceConfig, SpeechEngine};
use mindvoice::error::MindvoiceError;
use mindvoice::policy::FailurePolicy;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 15] = [
    "GOOGLE_API_KEY",
    "GEMINI_API_KEY",
    "GOOGLE_BASE_URL",
    "MINDMAP_MODEL",
    "MINDMAP_LABELS",
    "SUPABASE_URL",
    "SUPABASE_KEY",
    "SUPABASE_SERVICE_ROLE_KEY",
    "SUPABASE_BUCKET",
    "SUPABASE_TABLE",
    "TTS_ENGINE",
    "EDGE_TTS_BIN",
    "TTS_TIMEOUT_SECS",
    "GOOGLE_TTS_API_KEY",
    "FAILURE_POLICY",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clear_config_env() -> EnvGuard {
    let guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
    guard
}

#[test]
fn from_env_reads_supabase_and_tts_settings() {
    let _lock = env_lock_guard();
    let _env = clear_config_env();

    std::env::set_var("SUPABASE_URL", "https://proj.supabase.co");
    std::env::set_var("SUPABASE_SERVICE_ROLE_KEY", "service-role");
    std::env::set_var("SUPABASE_BUCKET", "narration");
    std::env::set_var("EDGE_TTS_BIN", "/opt/tts/edge-tts");
    std::env::set_var("TTS_TIMEOUT_SECS", "20");
    std::env::set_var("FAILURE_POLICY", "PROPAGATE");

    let config = MindvoiceConfig::from_env();

    assert_eq!(config.supabase_url.as_deref(), Some("https://proj.supabase.co"));
    assert_eq!(config.supabase_key.as_deref(), Some("service-role"));
    assert_eq!(config.supabase_bucket, "narration");
    assert_eq!(config.edge_tts_program, "/opt/tts/edge-tts");
    assert_eq!(config.tts_timeout, Duration::from_secs(20));
    assert_eq!(config.failure_policy, FailurePolicy::Propagate);
    assert_eq!(config.speech_engine, SpeechEngine::Edge);

    let storage = config.supabase_storage().unwrap();
    assert_eq!(storage.bucket(), "narration");
    assert!(config.speech_synthesizer().is_ok());
}

#[test]
fn generator_requires_google_key() {
    let _lock = env_lock_guard();
    let _env = clear_config_env();

    std::env::set_var("SUPABASE_URL", "https://proj.supabase.co");
    std::env::set_var("SUPABASE_KEY", "anon");

    let config = MindvoiceConfig::from_env();
    let err = config.mindmap_generator().err().expect("missing key should fail");
    assert!(matches!(err, MindvoiceError::Authentication(_)));

    std::env::set_var("GEMINI_API_KEY", "gemini-key");
    let config = MindvoiceConfig::from_env();
    assert!(config.mindmap_generator().is_ok());
}

#[test]
fn synthesizer_requires_supabase() {
    let _lock = env_lock_guard();
    let _env = clear_config_env();

    let config = MindvoiceConfig::from_env();
    let err = config.speech_synthesizer().err().expect("missing url should fail");
    assert!(matches!(err, MindvoiceError::Configuration(_)));
}
