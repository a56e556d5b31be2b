//! Mind-map data model.

use serde::{Deserialize, Serialize};

/// A mind map as produced by the model: one central node plus an edge list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MindMapStructure {
    #[serde(default)]
    pub central_node: String,
    #[serde(default)]
    pub nodes: Vec<MindMapNode>,
    #[serde(default)]
    pub edges: Vec<MindMapEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MindMapNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MindMapEdge {
    pub source: String,
    pub target: String,
}

impl MindMapNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl MindMapEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl MindMapStructure {
    /// The value handed back when generation is abandoned.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.central_node.is_empty() && self.nodes.is_empty() && self.edges.is_empty()
    }

    /// First node with the given id.
    pub fn node(&self, id: &str) -> Option<&MindMapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Response schema for structured output, in the Gemini schema dialect.
    pub fn json_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "central_node": {
                    "type": "STRING",
                    "description": "Id of the central topic node"
                },
                "nodes": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "id": {"type": "STRING"},
                            "label": {"type": "STRING"}
                        },
                        "required": ["id", "label"]
                    }
                },
                "edges": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "source": {"type": "STRING"},
                            "target": {"type": "STRING"}
                        },
                        "required": ["source", "target"]
                    }
                }
            },
            "required": ["central_node", "nodes", "edges"]
        })
    }
}
