//! DOM tree construction from host snapshots
//!
//! Builds a [`DomArena`] out of a CDP-style JSON DOM snapshot, the format a
//! browser host hands over when asked for its document:
//!
//! ```json
//! {
//!   "root": {
//!     "nodeId": 1,
//!     "nodeType": 9,
//!     "nodeName": "#document",
//!     "nodeValue": "",
//!     "attributes": ["id", "main", "class", "wrap"],
//!     "children": [...]
//!   }
//! }
//! ```
//!
//! Attributes arrive as a flat interleaved key/value array.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType};
use serde_json::Value;
use std::collections::HashMap;

/// Parses host DOM snapshots into an arena.
#[derive(Debug, Default)]
pub struct DomTreeBuilder {
    arena: DomArena,
}

impl DomTreeBuilder {
    pub fn new() -> Self {
        Self {
            arena: DomArena::new(),
        }
    }

    /// Get reference to the built arena.
    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    /// Consume the builder, yielding the arena.
    pub fn into_arena(self) -> DomArena {
        self.arena
    }

    /// Parse a snapshot and (re)build the arena, returning the root ID.
    pub fn parse_snapshot(&mut self, snapshot: &Value) -> Result<NodeId> {
        let root = snapshot.get("root").ok_or(DomError::MissingField("root"))?;

        self.arena.clear();
        let root_id = self.parse_node(root, None)?;
        self.arena.set_root(root_id)?;

        Ok(root_id)
    }

    /// Recursively parse one snapshot node and its children.
    fn parse_node(&mut self, value: &Value, parent_id: Option<NodeId>) -> Result<NodeId> {
        let node_type_code = value["nodeType"]
            .as_u64()
            .ok_or(DomError::MissingField("nodeType"))? as u8;
        let node_type = NodeType::from_u8(node_type_code)
            .ok_or(DomError::InvalidNodeType(node_type_code))?;

        let node_name = value["nodeName"]
            .as_str()
            .ok_or(DomError::MissingField("nodeName"))?
            .to_string();

        let mut attributes = HashMap::new();
        if let Some(attrs) = value["attributes"].as_array() {
            let mut i = 0;
            while i + 1 < attrs.len() {
                if let (Some(key), Some(val)) = (attrs[i].as_str(), attrs[i + 1].as_str()) {
                    attributes.insert(key.to_string(), val.to_string());
                }
                i += 2;
            }
        }

        let mut node = DomNode::new(node_type, node_name);
        node.node_value = value["nodeValue"].as_str().unwrap_or("").to_string();
        node.attributes = attributes;
        node.parent_id = parent_id;

        let current_id = self.arena.add_node(node);

        if let Some(children) = value["children"].as_array() {
            let mut child_ids = smallvec::SmallVec::new();
            for child in children {
                let child_id = self.parse_node(child, Some(current_id))?;
                child_ids.push(child_id);
            }
            self.arena.get_mut(current_id)?.children_ids = child_ids;
        }

        Ok(current_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_snapshot() {
        let snapshot = serde_json::json!({
            "root": {
                "nodeId": 1,
                "nodeType": 9,
                "nodeName": "#document",
                "nodeValue": "",
                "children": [{
                    "nodeId": 2,
                    "nodeType": 1,
                    "nodeName": "HTML",
                    "nodeValue": "",
                    "attributes": ["lang", "en"],
                    "children": [{
                        "nodeId": 3,
                        "nodeType": 3,
                        "nodeName": "#text",
                        "nodeValue": "Hello"
                    }]
                }]
            }
        });

        let mut builder = DomTreeBuilder::new();
        let root_id = builder.parse_snapshot(&snapshot).unwrap();
        let arena = builder.arena();

        assert_eq!(root_id, 0);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.root_id(), Some(root_id));

        let html = arena.children(root_id).unwrap()[0];
        assert_eq!(html.node_name, "HTML");
        assert_eq!(html.attr("lang"), Some("en"));
        assert_eq!(html.parent_id, Some(root_id));

        let text = arena.children(html.node_id).unwrap()[0];
        assert_eq!(text.node_type, NodeType::Text);
        assert_eq!(text.node_value, "Hello");
    }

    #[test]
    fn test_id_attributes_are_indexed() {
        let snapshot = serde_json::json!({
            "root": {
                "nodeType": 9,
                "nodeName": "#document",
                "children": [{
                    "nodeType": 1,
                    "nodeName": "DIV",
                    "attributes": ["id", "content"]
                }]
            }
        });

        let mut builder = DomTreeBuilder::new();
        builder.parse_snapshot(&snapshot).unwrap();

        let found = builder.arena().find_by_id("content").unwrap();
        assert_eq!(builder.arena().get(found).unwrap().node_name, "DIV");
    }

    #[test]
    fn test_missing_root_errors() {
        let mut builder = DomTreeBuilder::new();
        let err = builder.parse_snapshot(&serde_json::json!({})).unwrap_err();
        assert!(matches!(err, DomError::MissingField("root")));
    }

    #[test]
    fn test_unknown_node_type_errors() {
        let snapshot = serde_json::json!({
            "root": { "nodeType": 42, "nodeName": "#document" }
        });
        let mut builder = DomTreeBuilder::new();
        let err = builder.parse_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, DomError::InvalidNodeType(42)));
    }

    #[test]
    fn test_reparse_clears_previous_tree() {
        let first = serde_json::json!({
            "root": {
                "nodeType": 9,
                "nodeName": "#document",
                "children": [
                    { "nodeType": 1, "nodeName": "DIV", "attributes": ["id", "old"] }
                ]
            }
        });
        let second = serde_json::json!({
            "root": { "nodeType": 9, "nodeName": "#document" }
        });

        let mut builder = DomTreeBuilder::new();
        builder.parse_snapshot(&first).unwrap();
        builder.parse_snapshot(&second).unwrap();

        assert_eq!(builder.arena().len(), 1);
        assert_eq!(builder.arena().find_by_id("old"), None);
    }
}
