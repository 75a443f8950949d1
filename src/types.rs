//! Core type definitions for the synchronized-DOM tree.
//!
//! Design notes:
//! 1. Use u32 indices instead of pointers (4 bytes, no Rc/Arc overhead)
//! 2. Use SmallVec for children (most nodes have fewer than 4)
//! 3. Node names are stored as the host delivers them (uppercase for HTML
//!    elements in CDP snapshots); XPath node tests use the lowercased form

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Node identifier (index into the arena).
/// u32 allows 4 billion nodes, enough for any webpage.
pub type NodeId = u32;

/// Node type matching the DOM specification's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            4 => Some(NodeType::CdataSection),
            5 => Some(NodeType::EntityReference),
            6 => Some(NodeType::Entity),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            12 => Some(NodeType::Notation),
            _ => None,
        }
    }
}

/// A node in the synchronized DOM tree.
///
/// Navigation goes through indices; the arena owns all nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    /// Node name as delivered by the host (e.g. "DIV", "#text", "#document").
    pub node_name: String,
    /// Text content for text/comment/CDATA nodes, empty otherwise.
    pub node_value: String,
    pub attributes: HashMap<String, String>,

    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>,
}

impl DomNode {
    /// Create a new node. The arena assigns `node_id` on insertion.
    pub fn new(node_type: NodeType, node_name: String) -> Self {
        Self {
            node_id: 0,
            node_type,
            node_name,
            node_value: String::new(),
            attributes: HashMap::new(),
            parent_id: None,
            children_ids: SmallVec::new(),
        }
    }

    /// Check if node is an element.
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text.
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Lowercased element name, the form XPath node tests are written in.
    /// None for non-element nodes.
    pub fn local_name(&self) -> Option<String> {
        if self.is_element() {
            Some(self.node_name.to_ascii_lowercase())
        } else {
            None
        }
    }

    /// Get attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_from_u8() {
        assert_eq!(NodeType::from_u8(1), Some(NodeType::Element));
        assert_eq!(NodeType::from_u8(4), Some(NodeType::CdataSection));
        assert_eq!(NodeType::from_u8(9), Some(NodeType::Document));
        assert_eq!(NodeType::from_u8(0), None);
        assert_eq!(NodeType::from_u8(13), None);
    }

    #[test]
    fn test_local_name_lowercases_elements() {
        let node = DomNode::new(NodeType::Element, "DIV".to_string());
        assert_eq!(node.local_name().as_deref(), Some("div"));

        let text = DomNode::new(NodeType::Text, "#text".to_string());
        assert_eq!(text.local_name(), None);
    }

    #[test]
    fn test_attr() {
        let mut node = DomNode::new(NodeType::Element, "A".to_string());
        node.attributes
            .insert("href".to_string(), "/index".to_string());
        assert_eq!(node.attr("href"), Some("/index"));
        assert_eq!(node.attr("id"), None);
    }
}
