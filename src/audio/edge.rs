//! Speech synthesis through the `edge-tts` command-line tool.
//!
//! The tool is invoked as `edge-tts --voice V --text T --write-media PATH`.
//! Output goes to a private temporary directory that is removed when the
//! call returns, whether or not synthesis succeeded.

use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::tts::{validate_request, SpeechProvider};
use super::types::SpeechRequest;
use super::voices::VoiceTable;
use crate::error::MindvoiceError;
use crate::util::timeout::with_timeout;

pub const DEFAULT_PROGRAM: &str = "edge-tts";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const OUTPUT_FILE: &str = "speech.mp3";

/// Runs an external synthesis binary as a subprocess.
#[derive(Debug, Clone)]
pub struct EdgeTtsProvider {
    program: OsString,
    leading_args: Vec<OsString>,
    timeout: Duration,
}

impl Default for EdgeTtsProvider {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl EdgeTtsProvider {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Arguments placed before `--voice`, e.g. `["-m", "edge_tts"]` when the
    /// program is a Python interpreter.
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn run(&self, request: &SpeechRequest) -> Result<Vec<u8>, MindvoiceError> {
        let workdir = tempfile::Builder::new()
            .prefix("mindvoice-tts-")
            .tempdir()?;
        let output_path = workdir.path().join(OUTPUT_FILE);

        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .arg("--voice")
            .arg(&request.voice.id)
            .arg("--text")
            .arg(&request.text)
            .arg("--write-media")
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(
            program = ?self.program,
            voice = %request.voice.id,
            timeout_ms = self.timeout.as_millis() as u64,
            "Spawning speech synthesis process"
        );

        let child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MindvoiceError::MissingDependency(format!(
                    "{} not found on PATH",
                    self.program.to_string_lossy()
                ))
            } else {
                MindvoiceError::Io(e)
            }
        })?;

        let output = with_timeout(self.timeout, async {
            child.wait_with_output().await.map_err(MindvoiceError::from)
        })
        .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MindvoiceError::Synthesis(format!(
                "{} exited with {}: {}",
                self.program.to_string_lossy(),
                output.status,
                stderr.trim()
            )));
        }

        let audio = match tokio::fs::read(&output_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MindvoiceError::Synthesis(
                    "synthesis process produced no output file".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        if audio.is_empty() {
            return Err(MindvoiceError::Synthesis(
                "synthesis process wrote an empty audio file".to_string(),
            ));
        }

        Ok(audio)
    }
}

#[async_trait]
impl SpeechProvider for EdgeTtsProvider {
    fn provider_name(&self) -> &str {
        "edge-tts"
    }

    fn default_voices(&self) -> VoiceTable {
        VoiceTable::edge()
    }

    async fn generate_speech(&self, request: &SpeechRequest) -> Result<Vec<u8>, MindvoiceError> {
        validate_request(request)?;
        self.run(request).await
    }
}
