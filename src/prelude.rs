//! Convenience re-exports for common use.

pub use crate::audio::{SpeechProvider, SpeechSynthesizer, SpeechUpload, VoiceTable};
pub use crate::config::{MindvoiceConfig, SpeechEngine};
pub use crate::error::{MindvoiceError, Result};
pub use crate::mindmap::{MindMapGenerator, MindMapRequest, MindMapStructure, StudentProfile};
pub use crate::policy::FailurePolicy;
pub use crate::provider::ModelProvider;
pub use crate::storage::{ArtifactPublisher, ObjectStore, PublishedArtifact, RecordStore};
