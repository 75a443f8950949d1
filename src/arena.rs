//! Arena-based DOM tree storage
//!
//! A single `Vec<DomNode>` holds the whole tree; parent/child links are
//! 4-byte indices. No Rc/Arc, no recursion-prone ownership cycles, and a
//! fixed precondition: parent references are acyclic (the host supplies a
//! real document tree, which cannot contain parent cycles).

use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType};
use ahash::AHashMap;

/// Arena allocator for DOM nodes.
///
/// Besides sequential node storage it maintains an index over `id`
/// attributes, so id-shortcut paths (`//*[@id="..."]`) resolve without a
/// tree scan.
#[derive(Debug, Default)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly).
    nodes: Vec<DomNode>,

    /// `id` attribute -> NodeId. First occurrence wins, matching
    /// getElementById semantics for duplicate ids.
    id_map: AHashMap<String, NodeId>,

    /// Root node ID (if set).
    root_id: Option<NodeId>,
}

impl DomArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create arena with specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            id_map: AHashMap::with_capacity(capacity / 8),
            root_id: None,
        }
    }

    /// Add a node to the arena, returns its ID.
    ///
    /// The arena index becomes the node's identity; any `node_id` set on the
    /// value beforehand is overwritten.
    pub fn add_node(&mut self, mut node: DomNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        node.node_id = node_id;

        let elem_id = if node.node_type == NodeType::Element {
            node.attr("id").filter(|v| !v.is_empty()).map(str::to_string)
        } else {
            None
        };
        if let Some(key) = elem_id {
            self.id_map.entry(key).or_insert(node_id);
        }

        self.nodes.push(node);
        node_id
    }

    /// Add a node as the last child of `parent_id`, wiring both links.
    pub fn add_child(&mut self, parent_id: NodeId, mut node: DomNode) -> Result<NodeId> {
        self.get(parent_id)?;
        node.parent_id = Some(parent_id);
        let node_id = self.add_node(node);
        self.get_mut(parent_id)?.children_ids.push(node_id);
        Ok(node_id)
    }

    /// Get node by ID (immutable).
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable).
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Set root node.
    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    /// Get root node ID.
    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    /// Get root node.
    pub fn root(&self) -> Result<&DomNode> {
        let root_id = self.root_id.ok_or(DomError::NoRoot)?;
        self.get(root_id)
    }

    /// Get parent of a node.
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&DomNode>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Get children of a node, in document order.
    pub fn children(&self, node_id: NodeId) -> Result<Vec<&DomNode>> {
        let node = self.get(node_id)?;
        node.children_ids
            .iter()
            .map(|&child_id| self.get(child_id))
            .collect()
    }

    /// Find element by `id` attribute.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_map.get(id).copied()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Clear arena (reuse allocation).
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.id_map.clear();
        self.root_id = None;
    }
}
