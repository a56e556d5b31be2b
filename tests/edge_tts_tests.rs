//! Tests for the command-line speech provider, driven by shell scripts.
#![cfg(unix)]

mod common;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::MemoryObjectStore;
use mindvoice::audio::{
    EdgeTtsProvider, SpeechProvider, SpeechRequest, SpeechSynthesizer, VoiceTable,
};
use mindvoice::error::MindvoiceError;
use tempfile::TempDir;

/// Writes every argument to `args.txt` beside the script, then writes fake
/// audio to the `--write-media` path and prints the path to `media.txt`.
const FAKE_TTS: &str = r#"
dir=$(dirname "$0")
: > "$dir/args.txt"
out=""
while [ $# -gt 0 ]; do
    printf '%s\n' "$1" >> "$dir/args.txt"
    if [ "$1" = "--write-media" ]; then
        out="$2"
    fi
    shift
done
printf 'ID3fake-mp3' > "$out"
printf '%s' "$out" > "$dir/media.txt"
"#;

fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn provider_for(script: &Path) -> EdgeTtsProvider {
    EdgeTtsProvider::new("sh").with_leading_args([script.as_os_str().to_owned()])
}

fn request(text: &str) -> SpeechRequest {
    SpeechRequest {
        text: text.to_string(),
        voice: VoiceTable::edge().voice("ta-IN"),
        language_code: "ta-IN".to_string(),
    }
}

#[tokio::test]
async fn runs_tool_with_voice_text_and_media_path() {
    let dir = TempDir::new().unwrap();
    let fake = script(&dir, "fake-tts.sh", FAKE_TTS);

    let audio = provider_for(&fake)
        .generate_speech(&request("vanakkam"))
        .await
        .unwrap();

    assert_eq!(audio, b"ID3fake-mp3");

    let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(&args[..5], &["--voice", "ta-IN-PallaviNeural", "--text", "vanakkam", "--write-media"]);
}

#[tokio::test]
async fn temporary_output_is_removed_after_success() {
    let dir = TempDir::new().unwrap();
    let fake = script(&dir, "fake-tts.sh", FAKE_TTS);

    provider_for(&fake)
        .generate_speech(&request("hello"))
        .await
        .unwrap();

    let media = std::fs::read_to_string(dir.path().join("media.txt")).unwrap();
    let media = Path::new(&media);
    assert!(!media.exists());
    assert!(!media.parent().unwrap().exists());
}

#[tokio::test]
async fn non_zero_exit_is_a_synthesis_error() {
    let dir = TempDir::new().unwrap();
    let fake = script(&dir, "broken.sh", "echo 'voice not found' >&2\nexit 3\n");

    let err = provider_for(&fake)
        .generate_speech(&request("hello"))
        .await
        .unwrap_err();

    match err {
        MindvoiceError::Synthesis(message) => assert!(message.contains("voice not found")),
        other => panic!("expected synthesis error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_output_file_is_a_synthesis_error() {
    let dir = TempDir::new().unwrap();
    let fake = script(&dir, "silent.sh", "exit 0\n");

    let err = provider_for(&fake)
        .generate_speech(&request("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, MindvoiceError::Synthesis(_)));
}

#[tokio::test]
async fn missing_binary_is_reported() {
    let provider = EdgeTtsProvider::new("mindvoice-no-such-tts-binary");

    let err = provider.generate_speech(&request("hello")).await.unwrap_err();

    assert!(matches!(err, MindvoiceError::MissingDependency(_)));
}

#[tokio::test]
async fn empty_text_is_rejected_before_spawning() {
    let provider = EdgeTtsProvider::new("mindvoice-no-such-tts-binary");

    let err = provider.generate_speech(&request("   ")).await.unwrap_err();

    assert!(matches!(err, MindvoiceError::InvalidArgument(_)));
}

#[tokio::test]
async fn slow_tool_times_out() {
    let dir = TempDir::new().unwrap();
    let slow = script(&dir, "slow.sh", "sleep 5\n");
    let provider = provider_for(&slow).with_timeout(Duration::from_millis(200));

    let started = Instant::now();
    let err = provider.generate_speech(&request("hello")).await.unwrap_err();

    assert!(matches!(err, MindvoiceError::Timeout(200)));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn timeout_yields_success_shaped_upload_with_empty_audio() {
    let dir = TempDir::new().unwrap();
    let slow = script(&dir, "slow.sh", "sleep 5\n");
    let provider = provider_for(&slow).with_timeout(Duration::from_millis(200));
    let store = Arc::new(MemoryObjectStore::new());
    let synthesizer = SpeechSynthesizer::new(Some(Arc::new(provider)), store.clone());

    let upload = synthesizer.synthesize("hello", "en-IN").await.unwrap();

    assert!(upload.success);
    assert_eq!(upload.audio_bytes, 0);
    assert!(store.uploads()[0].bytes.is_empty());
}
