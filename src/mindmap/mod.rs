//! Mind maps: data model, prompt, HTML rendering, and the generation flow.

pub mod generator;
pub mod prompt;
pub mod render;
pub mod types;

pub use generator::{MindMapGenerator, MindMapRequest, MINDMAP_FIELD};
pub use prompt::StudentProfile;
pub use render::{render_html, render_html_with, LabelMode};
pub use types::{MindMapEdge, MindMapNode, MindMapStructure};
