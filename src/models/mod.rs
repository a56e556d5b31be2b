//! Model identifiers and capability descriptors.

pub mod google;

pub use google::GoogleModel;

use serde::{Deserialize, Serialize};

/// Describes what a model can do.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelCapabilities {
    pub supports_json_mode: bool,
    pub supports_json_schema: bool,
}

impl ModelCapabilities {
    /// Capabilities of a model with native structured output.
    pub fn structured() -> Self {
        Self {
            supports_json_mode: true,
            supports_json_schema: true,
        }
    }
}
