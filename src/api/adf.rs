//! Atlassian Document Format (ADF).
//!
//! Jira stores long-text fields such as issue descriptions and comment bodies
//! as a tree of typed nodes rather than plain strings. Writes must send a
//! document; reads flatten one back to text for display.

use serde::{Deserialize, Serialize};

/// A node in an ADF tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdfNode {
    /// Node type, e.g. `paragraph`, `text`, `bulletList`.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Text payload for `text` nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<AdfNode>,
    /// Node attributes (mention text, emoji short names, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<serde_json::Value>,
    /// Inline formatting marks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<serde_json::Value>,
}

impl AdfNode {
    fn new(node_type: &str) -> Self {
        Self {
            node_type: node_type.to_string(),
            text: None,
            content: Vec::new(),
            attrs: None,
            marks: Vec::new(),
        }
    }

    /// A `text` run.
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::new("text")
        }
    }

    /// A `paragraph` holding the given inline nodes.
    pub fn paragraph(content: Vec<AdfNode>) -> Self {
        Self {
            content,
            ..Self::new("paragraph")
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.as_ref()?.get(name)?.as_str()
    }
}

/// The root of an ADF document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlassianDoc {
    /// Always `doc` for a root node.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Format version, currently 1.
    #[serde(default)]
    pub version: Option<u32>,
    /// Top-level block nodes.
    #[serde(default)]
    pub content: Vec<AdfNode>,
}

impl Default for AtlassianDoc {
    fn default() -> Self {
        Self {
            doc_type: "doc".to_string(),
            version: Some(1),
            content: vec![],
        }
    }
}

impl AtlassianDoc {
    /// Build a document from plain text, one paragraph per non-blank line.
    pub fn from_plain_text(text: &str) -> Self {
        let content = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(|line| AdfNode::paragraph(vec![AdfNode::text(line)]))
            .collect();

        Self {
            content,
            ..Self::default()
        }
    }

    /// Try to read a field value as a document.
    ///
    /// Older instances and some custom fields still return plain strings;
    /// those are wrapped so callers can treat both the same way.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::from_plain_text(s)),
            serde_json::Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    /// Flatten the document to plain text for display.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.content {
            write_node(node, &mut out);
        }
        out.trim().to_string()
    }

    /// Whether the document has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

fn write_children(node: &AdfNode, out: &mut String) {
    for child in &node.content {
        write_node(child, out);
    }
}

fn end_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn write_node(node: &AdfNode, out: &mut String) {
    match node.node_type.as_str() {
        "text" => {
            if let Some(text) = &node.text {
                out.push_str(text);
            }
        }
        "paragraph" | "heading" | "codeBlock" => {
            write_children(node, out);
            end_line(out);
        }
        "hardBreak" => out.push('\n'),
        "listItem" => {
            out.push_str("• ");
            write_children(node, out);
            end_line(out);
        }
        "blockquote" => {
            out.push_str("> ");
            write_children(node, out);
        }
        "mention" => {
            if let Some(text) = node.attr("text") {
                if !text.starts_with('@') {
                    out.push('@');
                }
                out.push_str(text);
            }
        }
        "emoji" => {
            if let Some(short_name) = node.attr("shortName") {
                out.push_str(short_name);
            }
        }
        "inlineCard" => {
            if let Some(url) = node.attr("url") {
                out.push_str(url);
            }
        }
        "mediaGroup" | "mediaSingle" | "media" => {}
        _ => write_children(node, out),
    }
}
