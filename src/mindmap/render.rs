//! Static HTML rendering of a mind map.
//!
//! The document has three tiers derived from the edge list: the central
//! node, its direct targets (level 1), and the targets of those (level 2).
//! There is no cycle detection; a node reached by several paths is drawn
//! once per path.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::types::{MindMapNode, MindMapStructure};

/// How node labels are written into the document.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LabelMode {
    /// Labels are HTML-escaped and always display as plain text.
    #[default]
    Escaped,
    /// Labels are inserted as-is, so markup such as `H<sub>2</sub>O` renders.
    Verbatim,
}

impl LabelMode {
    fn apply(self, label: &str) -> Cow<'_, str> {
        match self {
            Self::Escaped => Cow::Owned(escape_html(label)),
            Self::Verbatim => Cow::Borrowed(label),
        }
    }
}

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Mindmap</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
        }
        .mindmap-container {
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 80vh;
        }
        .mindmap {
            background: white;
            border-radius: 10px;
            padding: 30px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
            max-width: 800px;
            width: 100%;
        }
        .central-node {
            text-align: center;
            background: #FF6B6B;
            color: white;
            padding: 15px 25px;
            border-radius: 25px;
            font-size: 18px;
            font-weight: bold;
            margin-bottom: 30px;
            display: inline-block;
        }
        .level-1-container {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 20px;
            margin-bottom: 20px;
        }
        .level-1-node {
            background: #4ECDC4;
            color: black;
            padding: 12px 20px;
            border-radius: 15px;
            text-align: center;
            font-weight: bold;
            position: relative;
        }
        .level-2-nodes {
            margin-top: 10px;
            display: flex;
            flex-wrap: wrap;
            gap: 8px;
            justify-content: center;
        }
        .level-2-node {
            background: #96CEB4;
            color: black;
            padding: 8px 15px;
            border-radius: 12px;
            font-size: 14px;
        }
        .connection-line {
            width: 2px;
            height: 20px;
            background: #ddd;
            margin: 0 auto;
        }
    </style>
</head>
<body>
    <div class="mindmap-container">
        <div class="mindmap">
"#;

const DOCUMENT_TAIL: &str = r#"
        </div>
    </div>
</body>
</html>
"#;

/// Render a mind map as a self-contained HTML document with escaped labels.
pub fn render_html(map: &MindMapStructure) -> String {
    render_html_with(map, LabelMode::Escaped)
}

/// Render a mind map, writing labels according to `labels`.
pub fn render_html_with(map: &MindMapStructure, labels: LabelMode) -> String {
    let central_label = map
        .node(&map.central_node)
        .map(|n| n.label.as_str())
        .unwrap_or("");

    let level_1 = level_one(map);
    let level_2 = level_two(map, &level_1);

    let mut html = String::with_capacity(DOCUMENT_HEAD.len() + DOCUMENT_TAIL.len() + 1024);
    html.push_str(DOCUMENT_HEAD);
    html.push_str(&format!(
        r#"<div class="central-node">{}</div>"#,
        labels.apply(central_label)
    ));
    html.push_str(r#"<div class="connection-line"></div>"#);

    html.push_str(r#"<div class="level-1-container">"#);
    for node in &level_1 {
        html.push_str(r#"<div class="level-1-branch">"#);
        html.push_str(&format!(
            r#"<div class="level-1-node">{}</div>"#,
            labels.apply(&node.label)
        ));

        if let Some(children) = level_2.get(node.id.as_str()).filter(|c| !c.is_empty()) {
            html.push_str(r#"<div class="level-2-nodes">"#);
            for child in children {
                html.push_str(&format!(
                    r#"<div class="level-2-node">{}</div>"#,
                    labels.apply(&child.label)
                ));
            }
            html.push_str("</div>");
        }

        html.push_str("</div>");
    }
    html.push_str("</div>");
    html.push_str(DOCUMENT_TAIL);

    html
}

/// Targets of edges leaving the central node, in edge order.
fn level_one(map: &MindMapStructure) -> Vec<&MindMapNode> {
    map.edges
        .iter()
        .filter(|e| e.source == map.central_node)
        .filter_map(|e| map.node(&e.target))
        .collect()
}

/// Children of each level-1 node, keyed by the level-1 id.
fn level_two<'a>(
    map: &'a MindMapStructure,
    level_1: &[&MindMapNode],
) -> HashMap<&'a str, Vec<&'a MindMapNode>> {
    let mut children: HashMap<&str, Vec<&MindMapNode>> = HashMap::new();
    for edge in &map.edges {
        if !level_1.iter().any(|n| n.id == edge.source) {
            continue;
        }
        if let Some(target) = map.node(&edge.target) {
            children.entry(edge.source.as_str()).or_default().push(target);
        }
    }
    children
}

/// Escape text for use inside an HTML element.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
