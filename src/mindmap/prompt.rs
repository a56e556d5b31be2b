//! Prompt construction for mind-map generation.

use serde::{Deserialize, Serialize};

use crate::types::ModelMessage;

pub const DEFAULT_TOPIC_SUMMARY: &str = "No summary available";

/// The student the mind map is written for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StudentProfile {
    pub grade_level: String,
    pub language: String,
    pub gender: String,
}

impl Default for StudentProfile {
    fn default() -> Self {
        Self {
            grade_level: "general".to_string(),
            language: "English".to_string(),
            gender: String::new(),
        }
    }
}

/// System and user messages asking for a mind map of `topic_summary`.
///
/// A blank summary is replaced with [`DEFAULT_TOPIC_SUMMARY`].
pub fn build_messages(profile: &StudentProfile, topic_summary: &str) -> Vec<ModelMessage> {
    let summary = if topic_summary.trim().is_empty() {
        DEFAULT_TOPIC_SUMMARY
    } else {
        topic_summary
    };

    let system = format!(
        "You are a helpful academic tutor.\n\
         Use the below context to create a json response to create a mind map. \
         The mind map should clearly explain the core concepts and key ideas.\n\
         \n\
         Student Profile:\n\
         \x20   - Class Level: {}\n\
         \x20   - Language: {}\n\
         \x20   - Gender: {}\n\
         \n\
         1. Adapt your language and complexity based on the student's profile provided.\n\
         2. Respond in JSON format which can be used to render.\n\
         3. Create a hierarchical structure with a central topic and branching concepts.",
        profile.grade_level, profile.language, profile.gender
    );

    vec![
        ModelMessage::system(system),
        ModelMessage::user(format!("Topic Summary: {summary}")),
    ]
}
