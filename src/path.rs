//! Canonical XPath computation for DOM nodes
//!
//! [`xpath`] produces a location path that, evaluated against the same
//! unmodified document, resolves back to exactly the input node. The walk
//! goes node-to-root, one step per ancestor, with positional predicates
//! only where sibling names collide. With `optimized` set, an element
//! carrying a non-empty `id` attribute short-circuits the whole path to
//! `//*[@id="..."]`.
//!
//! Stateless module of pure functions over an immutable arena snapshot.

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{DomNode, NodeId, NodeType};
use std::fmt;

/// One segment of a location path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    text: String,
    terminal: bool,
}

impl PathStep {
    fn new(text: String, terminal: bool) -> Self {
        Self { text, terminal }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// A terminal step is a complete absolute shortcut (the id optimization
    /// or the document node); the upward walk stops at it.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A node's 1-based rank among similar siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingRank {
    /// Only node of its kind under this parent; no predicate needed.
    Only,
    /// 1-based position among similar siblings (XPath indices start at 1).
    At(u32),
    /// Node absent from its own parent's child list; the tree view held by
    /// the caller is stale or corrupted.
    Missing,
}

/// Compute the canonical XPath for `node_id`.
///
/// Returns `Ok(None)` when any node along the ancestor chain cannot be
/// ranked among its siblings (see [`SiblingRank::Missing`]); callers must
/// treat that as identification failure and fall back to another strategy.
/// `Err` is reserved for arena-level failures such as a dangling `NodeId`.
pub fn xpath(arena: &DomArena, node_id: NodeId, optimized: bool) -> Result<Option<String>> {
    if arena.get(node_id)?.node_type == NodeType::Document {
        return Ok(Some("/".to_string()));
    }

    let mut steps = Vec::new();
    let mut current = Some(node_id);

    while let Some(id) = current {
        let step = match step_for(arena, id, optimized)? {
            Some(step) => step,
            None => return Ok(None),
        };
        let terminal = step.is_terminal();
        steps.push(step);
        if terminal {
            break;
        }
        current = arena.get(id)?.parent_id;
    }

    steps.reverse();

    // Terminal first steps already begin with "//"; everything else is
    // anchored at the document root.
    let mut path = String::new();
    if !steps.first().is_some_and(|step| step.is_terminal()) {
        path.push('/');
    }
    for (i, step) in steps.iter().enumerate() {
        if i > 0 {
            path.push('/');
        }
        path.push_str(step.text());
    }

    Ok(Some(path))
}

/// Produce the path step for a single node, or `None` when the node cannot
/// be ranked among its siblings.
pub fn step_for(arena: &DomArena, node_id: NodeId, optimized: bool) -> Result<Option<PathStep>> {
    let rank = sibling_index(arena, node_id)?;
    if rank == SiblingRank::Missing {
        return Ok(None);
    }

    let node = arena.get(node_id)?;
    let mut text = match node.node_type {
        NodeType::Element => {
            if optimized {
                if let Some(id) = node.attr("id").filter(|v| !v.is_empty()) {
                    // Known limitation: a quote character inside the id is
                    // embedded as-is and corrupts the expression.
                    let step = PathStep::new(format!("//*[@id=\"{}\"]", id), true);
                    return Ok(Some(step));
                }
            }
            node.local_name().unwrap_or_default()
        }
        NodeType::Attribute => format!("@{}", node.node_name),
        // XPath has no CDATA node test; CDATA sections count as text.
        NodeType::Text | NodeType::CdataSection => "text()".to_string(),
        NodeType::ProcessingInstruction => "processing-instruction()".to_string(),
        NodeType::Comment => "comment()".to_string(),
        NodeType::Document => String::new(),
        _ => String::new(),
    };

    if let SiblingRank::At(index) = rank {
        text.push_str(&format!("[{}]", index));
    }

    let terminal = node.node_type == NodeType::Document;
    Ok(Some(PathStep::new(text, terminal)))
}

/// Rank `node_id` among siblings that an XPath node test could confuse it
/// with.
pub fn sibling_index(arena: &DomArena, node_id: NodeId) -> Result<SiblingRank> {
    let node = arena.get(node_id)?;
    let parent_id = match node.parent_id {
        Some(parent_id) => parent_id,
        None => return Ok(SiblingRank::Only),
    };
    let parent = arena.get(parent_id)?;

    let mut has_similar_sibling = false;
    for &sibling_id in &parent.children_ids {
        if sibling_id != node_id && similar(node, arena.get(sibling_id)?) {
            has_similar_sibling = true;
            break;
        }
    }
    if !has_similar_sibling {
        return Ok(SiblingRank::Only);
    }

    let mut rank = 1u32;
    for &sibling_id in &parent.children_ids {
        if sibling_id == node_id {
            return Ok(SiblingRank::At(rank));
        }
        if similar(node, arena.get(sibling_id)?) {
            rank += 1;
        }
    }

    Ok(SiblingRank::Missing)
}

/// Two nodes are similar when the same node test with a positional
/// predicate could match either of them.
fn similar(left: &DomNode, right: &DomNode) -> bool {
    if left.node_id == right.node_id {
        return true;
    }
    if left.is_element() && right.is_element() {
        return left.node_name.eq_ignore_ascii_case(&right.node_name);
    }
    normalize_kind(left.node_type) == normalize_kind(right.node_type)
}

fn normalize_kind(node_type: NodeType) -> NodeType {
    if node_type == NodeType::CdataSection {
        NodeType::Text
    } else {
        node_type
    }
}
