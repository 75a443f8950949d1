//! Error types for DOM operations
//!
//! Simple, flat error hierarchy. Algorithmic failure (a node missing from
//! its parent's child list) is not an error; path computation reports it
//! through an `Option` channel instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Invalid node type code: {0}")]
    InvalidNodeType(u8),

    #[error("Missing field in DOM snapshot: {0}")]
    MissingField(&'static str),

    #[error("No root node set")]
    NoRoot,

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
