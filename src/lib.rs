//! mindvoice: learning-space artifact generation.
//!
//! Two independent flows:
//!
//! - [`mindmap::MindMapGenerator`] asks Gemini for a mind-map structure,
//!   renders it to a static HTML page, uploads it, and stores the public URL
//!   on the learning-space record.
//! - [`audio::SpeechSynthesizer`] turns text into MP3 narration through an
//!   external TTS engine and uploads the audio.
//!
//! # Quick Start
//!
//! ```no_run
//! use mindvoice::prelude::*;
//!
//! # async fn example() -> mindvoice::error::Result<()> {
//! let config = MindvoiceConfig::from_env();
//!
//! let request = MindMapRequest {
//!     learning_space_id: "space-1".into(),
//!     summary_notes: "Plants turn light into chemical energy.".into(),
//!     ..Default::default()
//! };
//! let map = config.mindmap_generator()?.run(&request).await?;
//! println!("{} nodes", map.nodes.len());
//!
//! let upload = config.speech_synthesizer()?.synthesize("Namaste!", "hi-IN").await?;
//! println!("{:?}", upload.public_url);
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod generation;
pub mod mindmap;
pub mod models;
pub mod policy;
pub mod prelude;
pub mod provider;
pub mod storage;
pub mod types;
pub mod util;
