//! Text-to-speech: providers, voice tables, and the synthesize-and-upload step.

pub mod edge;
pub mod google;
pub mod synthesizer;
pub mod tts;
pub mod types;
pub mod voices;

pub use edge::EdgeTtsProvider;
pub use google::GoogleCloudTtsProvider;
pub use synthesizer::SpeechSynthesizer;
pub use tts::SpeechProvider;
pub use types::*;
pub use voices::VoiceTable;
