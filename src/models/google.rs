//! Google Gemini model definitions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::ModelCapabilities;

/// Google Gemini models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
pub enum GoogleModel {
    #[strum(serialize = "gemini-2.5-pro")]
    Gemini25Pro,
    #[strum(serialize = "gemini-2.5-flash")]
    Gemini25Flash,
    #[strum(serialize = "gemini-2.0-flash")]
    Gemini20Flash,
    #[strum(serialize = "gemini-1.5-flash")]
    Gemini15Flash,
    /// Custom/unknown Google model.
    #[strum(default)]
    Custom(String),
}

impl Default for GoogleModel {
    fn default() -> Self {
        Self::Gemini20Flash
    }
}

impl GoogleModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gemini25Pro => "gemini-2.5-pro",
            Self::Gemini25Flash => "gemini-2.5-flash",
            Self::Gemini20Flash => "gemini-2.0-flash",
            Self::Gemini15Flash => "gemini-1.5-flash",
            Self::Custom(s) => s,
        }
    }

    /// Every listed Gemini model accepts `responseSchema`.
    pub fn capabilities(&self) -> ModelCapabilities {
        ModelCapabilities::structured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_and_custom_ids() {
        assert_eq!("gemini-2.0-flash".parse::<GoogleModel>().unwrap(), GoogleModel::Gemini20Flash);
        assert_eq!(
            "gemini-exp-1206".parse::<GoogleModel>().unwrap(),
            GoogleModel::Custom("gemini-exp-1206".to_string())
        );
    }

    #[test]
    fn custom_model_round_trips_its_id() {
        let model = GoogleModel::Custom("gemini-exp".to_string());
        assert_eq!(model.as_str(), "gemini-exp");
        assert!(model.capabilities().supports_json_schema);
    }
}
